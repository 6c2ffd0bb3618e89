//! Structural validation of a catalog file. Works on raw JSON so records that
//! would not deserialize still get a precise diagnostic.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::bestiary::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }

    pub fn count(&self, severity: ValidationSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity == severity)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Ability type stems seen across both statblock formats, lowercase. Numbered
/// variants (`Villain Action 2`) match their stem.
const ABILITY_TYPES: &[&str] = &[
    "action",
    "main action",
    "maneuver",
    "free maneuver",
    "triggered",
    "triggered action",
    "free triggered action",
    "trait",
    "signature",
    "signature ability",
    "villain action",
    "free strike",
    "no action",
];

const STAT_FIELDS: &[&str] = &["size", "speed", "stamina", "stability", "freeStrike"];

/// True for an empty type (traits often carry none) or a recognized stem.
pub fn is_known_ability_type(raw: &str) -> bool {
    let normalized = raw
        .trim()
        .trim_end_matches(|ch: char| ch.is_ascii_digit() || ch.is_whitespace())
        .to_lowercase();
    normalized.is_empty() || ABILITY_TYPES.contains(&normalized.as_str())
}

pub fn validate_catalog_file(path: impl AsRef<Path>) -> Result<ValidationReport, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: Value = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(validate_catalog_value(&payload))
}

pub fn validate_catalog_value(payload: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();
    let Some(entries) = payload.as_array() else {
        report.push(
            ValidationSeverity::Error,
            "catalog",
            "expected top-level JSON array of monsters",
        );
        return report;
    };

    let mut seen_names = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        let base_context = format!("entry[{index}]");
        let Some(object) = entry.as_object() else {
            report.push(ValidationSeverity::Error, base_context, "entry is not an object");
            continue;
        };

        let name = match object.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {
                if !seen_names.insert(name) {
                    report.push(
                        ValidationSeverity::Error,
                        format!("{base_context}.name"),
                        format!("duplicate name '{name}'"),
                    );
                }
                name
            }
            _ => {
                report.push(
                    ValidationSeverity::Error,
                    format!("{base_context}.name"),
                    "missing non-empty 'name'",
                );
                "<missing-name>"
            }
        };
        let context = format!("{base_context} name='{name}'");

        match object.get("ev") {
            Some(ev) if ev.is_u64() => {}
            _ => report.push(
                ValidationSeverity::Error,
                format!("{context}.ev"),
                "expected non-negative integer 'ev'",
            ),
        }

        if let Some(level) = object.get("level").and_then(Value::as_str) {
            if level.trim().parse::<u32>().is_err() {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{context}.level"),
                    format!("non-numeric level '{level}'"),
                );
            }
        }

        validate_stats(&mut report, object, &context);
        validate_abilities(&mut report, object, &context);
    }

    report
}

fn validate_stats(report: &mut ValidationReport, object: &Map<String, Value>, context: &str) {
    let Some(stats) = object.get("stats").and_then(Value::as_object) else {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.stats"),
            "missing 'stats' object",
        );
        return;
    };
    for field in STAT_FIELDS {
        let present = stats
            .get(*field)
            .and_then(Value::as_str)
            .map_or(false, |value| !value.trim().is_empty());
        if !present {
            report.push(
                ValidationSeverity::Info,
                format!("{context}.stats.{field}"),
                "empty stat",
            );
        }
    }
}

fn validate_abilities(report: &mut ValidationReport, object: &Map<String, Value>, context: &str) {
    let Some(abilities) = object.get("abilities") else {
        return;
    };
    let Some(abilities) = abilities.as_array() else {
        report.push(
            ValidationSeverity::Error,
            format!("{context}.abilities"),
            "expected array",
        );
        return;
    };

    for (ability_index, ability) in abilities.iter().enumerate() {
        let ability_context = format!("{context}.abilities[{ability_index}]");
        let Some(ability) = ability.as_object() else {
            report.push(
                ValidationSeverity::Error,
                ability_context,
                "ability is not an object",
            );
            continue;
        };

        match ability.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {}
            _ => report.push(
                ValidationSeverity::Error,
                format!("{ability_context}.name"),
                "missing non-empty 'name'",
            ),
        }

        if let Some(ability_type) = ability.get("type").and_then(Value::as_str) {
            if !is_known_ability_type(ability_type) {
                report.push(
                    ValidationSeverity::Warning,
                    format!("{ability_context}.type"),
                    format!("unrecognized ability type '{ability_type}'"),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn monster(name: &str) -> Value {
        json!({
            "name": name,
            "type": "Orc",
            "level": "1",
            "role": "Brute",
            "ev": 3,
            "stats": {"size": "1M", "speed": "5", "stamina": "10", "stability": "0", "freeStrike": "2"},
            "abilities": [{"name": "Axe", "type": "Signature Ability"}]
        })
    }

    #[test]
    fn clean_catalog_has_no_diagnostics() {
        let report = validate_catalog_value(&json!([monster("Orc"), monster("Goblin")]));
        assert!(report.is_empty(), "{:?}", report.diagnostics);
    }

    #[test]
    fn duplicate_names_are_errors() {
        let report = validate_catalog_value(&json!([monster("Orc"), monster("Orc")]));
        assert!(report.has_errors());
        assert!(report.diagnostics[0].message.contains("duplicate name 'Orc'"));
    }

    #[test]
    fn empty_ability_name_and_unknown_type() {
        let mut entry = monster("Orc");
        entry["abilities"] = json!([{"name": " ", "type": "Dance"}]);
        let report = validate_catalog_value(&json!([entry]));
        assert_eq!(report.count(ValidationSeverity::Error), 1);
        assert_eq!(report.count(ValidationSeverity::Warning), 1);
    }

    #[test]
    fn non_array_catalog_is_rejected() {
        assert!(validate_catalog_value(&json!({"monsters": []})).has_errors());
    }

    #[test]
    fn numbered_villain_actions_are_known() {
        assert!(is_known_ability_type("Villain Action 3"));
        assert!(is_known_ability_type("Triggered Action"));
        assert!(is_known_ability_type(""));
        assert!(!is_known_ability_type("Dance"));
    }
}
