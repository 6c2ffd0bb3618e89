//! Catalog records shared by both statblock formats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which source convention a catalog record was parsed from.
/// Ordering matters for dedup: `Yaml` outranks `Markdown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Markdown,
    Yaml,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed stat line. Values are kept in display form so both formats share one shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonsterStats {
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub speed: String,
    #[serde(default)]
    pub stamina: String,
    #[serde(default)]
    pub stability: String,
    #[serde(default)]
    pub free_strike: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    #[serde(default)]
    pub icon: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub ability_type: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub description: String,
}

impl Ability {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub name: String,
    #[serde(rename = "type", default)]
    pub monster_type: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub ev: u32,
    #[serde(default)]
    pub stats: MonsterStats,
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SourceFormat>,
}

impl Monster {
    /// Numeric level, or `None` when the display string is not a number.
    pub fn level_number(&self) -> Option<u32> {
        self.level.trim().parse().ok()
    }

    /// Whitespace-separated role tokens, e.g. `"Minion Artillery"` -> `["Minion", "Artillery"]`.
    pub fn role_tokens(&self) -> impl Iterator<Item = &str> {
        self.role.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monster_serializes_with_catalog_field_names() {
        let monster = Monster {
            name: "Goblin Sniper".to_string(),
            monster_type: "Goblin".to_string(),
            level: "1".to_string(),
            role: "Minion Artillery".to_string(),
            ev: 3,
            stats: MonsterStats {
                free_strike: "1".to_string(),
                ..MonsterStats::default()
            },
            abilities: vec![Ability::named("Bow")],
            source_file: Some("Goblins/Goblin Sniper.md".to_string()),
            format: Some(SourceFormat::Markdown),
        };

        let value = serde_json::to_value(&monster).unwrap();
        assert_eq!(value["type"], "Goblin");
        assert_eq!(value["stats"]["freeStrike"], "1");
        assert_eq!(value["sourceFile"], "Goblins/Goblin Sniper.md");
        assert_eq!(value["format"], "markdown");
        assert_eq!(value["abilities"][0]["type"], "");
    }

    #[test]
    fn custom_records_omit_provenance() {
        let value = serde_json::to_value(Monster::default()).unwrap();
        assert!(value.get("sourceFile").is_none());
        assert!(value.get("format").is_none());
    }

    #[test]
    fn yaml_outranks_markdown() {
        assert!(SourceFormat::Yaml > SourceFormat::Markdown);
    }

    #[test]
    fn level_number_ignores_non_numeric_levels() {
        let mut monster = Monster::default();
        monster.level = " 4 ".to_string();
        assert_eq!(monster.level_number(), Some(4));
        monster.level = "Varies".to_string();
        assert_eq!(monster.level_number(), None);
    }
}
