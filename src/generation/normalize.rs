use serde_json::{Map, Number, Value};

use crate::bestiary::{normalize_ev, Ability, Monster};
use crate::generation::GenerationError;
use crate::store::new_custom_monster;
use crate::validate::{is_known_ability_type, ValidationReport, ValidationSeverity};

fn number_text(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < 1e15 => format!("{}", value as i64),
        _ => number.to_string(),
    }
}

/// Display form of a scalar; `None` for null, empty strings, and containers.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number_text(number),
        Value::Bool(flag) => flag.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(scalar_text)
}

fn keyword_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn ev_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().filter(|ev| *ev >= 0.0).map(|ev| ev.round() as u64))
            .map(|ev| u32::try_from(ev).unwrap_or(u32::MAX)),
        Value::String(text) => Some(normalize_ev(text)),
        _ => None,
    }
}

fn normalize_ability(object: &Map<String, Value>) -> Option<Ability> {
    let name = text_field(object, "name")?;
    Some(Ability {
        icon: text_field(object, "icon").unwrap_or_default(),
        name,
        ability_type: text_field(object, "type").unwrap_or_default(),
        keywords: keyword_list(object.get("keywords")),
        distance: text_field(object, "distance").unwrap_or_default(),
        target: text_field(object, "target").unwrap_or_default(),
        description: object
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Merge a generated monster object over the creator defaults.
///
/// Stats given as numbers or strings are stored as strings; `ev` takes the first
/// digit run of a string or the rounded value of a number. Abilities without a name
/// are dropped. Everything repaired or dropped is recorded in the report; a missing
/// monster name is an error the caller should refuse to save.
pub fn normalize_generated(value: Value) -> Result<(Monster, ValidationReport), GenerationError> {
    let Value::Object(object) = value else {
        return Err(GenerationError::Schema(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };

    let mut report = ValidationReport::default();
    let mut monster = new_custom_monster("").monster;

    match text_field(&object, "name") {
        Some(name) => monster.name = name,
        None => report.push(ValidationSeverity::Error, "name", "missing non-empty 'name'"),
    }
    let context = format!("monster '{}'", monster.name);

    for (key, slot) in [
        ("type", &mut monster.monster_type),
        ("level", &mut monster.level),
        ("role", &mut monster.role),
    ] {
        match text_field(&object, key) {
            Some(text) => *slot = text,
            None => report.push(
                ValidationSeverity::Warning,
                format!("{context}.{key}"),
                format!("missing '{key}', using default '{slot}'"),
            ),
        }
    }

    match object.get("ev").and_then(ev_value) {
        Some(ev) => monster.ev = ev,
        None => report.push(
            ValidationSeverity::Warning,
            format!("{context}.ev"),
            format!("missing or invalid 'ev', using default {}", monster.ev),
        ),
    }

    match object.get("stats").and_then(Value::as_object) {
        Some(stats) => {
            let stats_slots = [
                ("size", &mut monster.stats.size),
                ("speed", &mut monster.stats.speed),
                ("stamina", &mut monster.stats.stamina),
                ("stability", &mut monster.stats.stability),
                ("freeStrike", &mut monster.stats.free_strike),
            ];
            for (key, slot) in stats_slots {
                match text_field(stats, key) {
                    Some(text) => *slot = text,
                    None => report.push(
                        ValidationSeverity::Info,
                        format!("{context}.stats.{key}"),
                        format!("missing stat, using default '{slot}'"),
                    ),
                }
            }
        }
        None => report.push(
            ValidationSeverity::Warning,
            format!("{context}.stats"),
            "missing 'stats' object, using defaults",
        ),
    }

    let abilities = object
        .get("abilities")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    for (index, entry) in abilities.iter().enumerate() {
        let ability_context = format!("{context}.abilities[{index}]");
        let Some(ability) = entry.as_object().and_then(normalize_ability) else {
            report.push(
                ValidationSeverity::Warning,
                ability_context,
                "dropped ability without a name",
            );
            continue;
        };
        if !is_known_ability_type(&ability.ability_type) {
            report.push(
                ValidationSeverity::Info,
                format!("{ability_context}.type"),
                format!("unrecognized ability type '{}'", ability.ability_type),
            );
        }
        monster.abilities.push(ability);
    }

    Ok((monster, report))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
