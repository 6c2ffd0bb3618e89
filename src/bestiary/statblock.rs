//! Structured statblock format: YAML documents fenced by `~~~ds-statblock` / `~~~`.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::warn;

use crate::bestiary::ingest::normalize_ev;
use crate::bestiary::model::{Ability, Monster, MonsterStats, SourceFormat};

static STATBLOCK_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)~~~ds-statblock\s*(.*?)\s*~~~").expect("Invalid statblock fence regex")
});

/// Power-roll tiers in display order: YAML key and the roll band it covers.
const ROLL_TIERS: &[(&str, &str)] = &[("tier1", "≤11"), ("tier2", "12-16"), ("tier3", "17+")];

#[derive(Debug, thiserror::Error)]
pub enum StatblockError {
    #[error("invalid statblock YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("statblock has no name")]
    MissingName,
}

#[derive(Debug, Deserialize)]
struct RawStatblock {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    ancestry: Option<Value>,
    #[serde(default)]
    level: Option<Value>,
    #[serde(default)]
    roles: Option<Value>,
    #[serde(default)]
    ev: Option<Value>,
    #[serde(default)]
    size: Option<Value>,
    #[serde(default)]
    speed: Option<Value>,
    #[serde(default)]
    stamina: Option<Value>,
    #[serde(default)]
    stability: Option<Value>,
    #[serde(default)]
    free_strike: Option<Value>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    icon: Option<Value>,
    #[serde(default)]
    ability_type: Option<Value>,
    #[serde(default)]
    feature_type: Option<Value>,
    #[serde(default)]
    keywords: Option<Value>,
    #[serde(default)]
    distance: Option<Value>,
    #[serde(default)]
    target: Option<Value>,
    #[serde(default)]
    effects: Vec<Value>,
}

/// Scalar YAML values in display form. Sequences and mappings have none.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn field_text(value: Option<&Value>) -> String {
    value.and_then(scalar_text).unwrap_or_default()
}

/// Non-empty scalar under `key` of a mapping value.
fn entry_text(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(scalar_text)
        .filter(|text| !text.is_empty())
}

/// A sequence joined with `separator`; a lone scalar is used as is.
fn joined_text(value: Option<&Value>, separator: &str) -> String {
    match value {
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(separator),
        other => field_text(other),
    }
}

fn keyword_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn render_roll(roll: &str, effect: &Value) -> String {
    let mut text = format!("**{roll}**");
    for (key, band) in ROLL_TIERS {
        if let Some(outcome) = entry_text(effect, key) {
            let _ = write!(text, "\n• **{band}:** {outcome}");
        }
    }
    text
}

/// Render one entry of a feature's `effects` list as description text.
///
/// Plain text is used verbatim; `name`/`cost` labelled effects are bolded;
/// `roll` entries become a power-roll block with one bullet per tier.
/// Entries with nothing recognizable render as an empty string.
pub fn render_effect(effect: &Value) -> String {
    if let Some(text) = scalar_text(effect) {
        return text;
    }

    match (
        entry_text(effect, "name"),
        entry_text(effect, "cost"),
        entry_text(effect, "effect"),
    ) {
        (Some(name), _, Some(text)) => format!("**{name}:** {text}"),
        (None, Some(cost), Some(text)) => format!("**{cost}:** {text}"),
        (None, None, Some(text)) => text,
        _ => entry_text(effect, "roll")
            .map(|roll| render_roll(&roll, effect))
            .unwrap_or_default(),
    }
}

fn feature_to_ability(feature: RawFeature) -> Ability {
    let ability_type = feature
        .ability_type
        .as_ref()
        .and_then(scalar_text)
        .filter(|text| !text.is_empty())
        .or_else(|| feature.feature_type.as_ref().and_then(scalar_text))
        .unwrap_or_default();

    let description = feature
        .effects
        .iter()
        .map(render_effect)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ability {
        icon: field_text(feature.icon.as_ref()),
        name: field_text(feature.name.as_ref()),
        ability_type,
        keywords: keyword_list(feature.keywords.as_ref()),
        distance: field_text(feature.distance.as_ref()),
        target: field_text(feature.target.as_ref()),
        description,
    }
}

/// Parse the YAML body of a single statblock.
pub fn parse_statblock(yaml: &str, source_file: &str) -> Result<Monster, StatblockError> {
    let raw: RawStatblock = serde_yaml::from_str(yaml)?;

    let name = field_text(raw.name.as_ref());
    if name.trim().is_empty() {
        return Err(StatblockError::MissingName);
    }

    let abilities = raw
        .features
        .into_iter()
        .map(feature_to_ability)
        .filter(|ability| {
            if ability.name.is_empty() {
                warn!("dropping unnamed feature of '{name}' in {source_file}");
            }
            !ability.name.is_empty()
        })
        .collect();

    Ok(Monster {
        monster_type: joined_text(raw.ancestry.as_ref(), ", "),
        level: field_text(raw.level.as_ref()),
        role: joined_text(raw.roles.as_ref(), " "),
        ev: normalize_ev(&field_text(raw.ev.as_ref())),
        stats: MonsterStats {
            size: field_text(raw.size.as_ref()),
            speed: field_text(raw.speed.as_ref()),
            stamina: field_text(raw.stamina.as_ref()),
            stability: field_text(raw.stability.as_ref()),
            free_strike: field_text(raw.free_strike.as_ref()),
        },
        abilities,
        source_file: Some(source_file.to_string()),
        format: Some(SourceFormat::Yaml),
        name,
    })
}

/// Parse every fenced statblock in a document. Malformed blocks are logged and skipped.
pub fn parse_statblock_document(content: &str, source_file: &str) -> Vec<Monster> {
    STATBLOCK_BLOCK
        .captures_iter(content)
        .enumerate()
        .filter_map(|(index, caps)| match parse_statblock(&caps[1], source_file) {
            Ok(monster) => Some(monster),
            Err(err) => {
                warn!("skipping statblock #{index} in {source_file}: {err}");
                None
            }
        })
        .collect()
}
