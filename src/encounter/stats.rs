//! Stat suggestions for a new monster from its level and role string.

use serde::{Deserialize, Serialize};

/// Stamina multiplier per role token. Rank tokens (Minion, Elite, Solo) set the
/// multiplier outright; any other known token scales it by `value / 10`.
const ROLE_STAMINA: &[(&str, f64)] = &[
    ("Minion", 4.0),
    ("Standard", 10.0),
    ("Elite", 20.0),
    ("Solo", 40.0),
    ("Leader", 15.0),
    ("Artillery", 0.8),
    ("Controller", 0.9),
    ("Brute", 1.2),
    ("Hexer", 0.8),
    ("Ambusher", 0.9),
    ("Defender", 1.3),
    ("Support", 1.0),
    ("Skirmisher", 1.0),
];

const RANK_TOKENS: &[&str] = &["Minion", "Elite", "Solo"];
const BASE_STAMINA_MULTIPLIER: f64 = 10.0;
const DEFAULT_SPEED: u32 = 6;
const DEFAULT_SIZE: &str = "1M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedStats {
    pub stamina: u32,
    pub stability: u32,
    pub free_strike: u32,
    pub speed: u32,
    pub size: String,
    pub ev: u32,
}

/// Leading integer of a level field; missing, zero, or non-numeric levels read as 1.
pub fn parse_level(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(level) if level > 0 => level,
        _ => 1,
    }
}

fn stamina_multiplier(role: &str) -> f64 {
    role.split(' ')
        .filter_map(|token| ROLE_STAMINA.iter().find(|(name, _)| *name == token))
        .fold(BASE_STAMINA_MULTIPLIER, |multiplier, (name, value)| {
            if RANK_TOKENS.contains(name) {
                *value
            } else {
                multiplier * (value / 10.0)
            }
        })
}

/// Suggested stats for a monster of `level` with `role`.
///
/// EV starts at `12 + (level - 1) * 4`, then Minion divides it by four (rounding
/// up), Elite doubles it, and Solo quadruples it. Each of those matches anywhere
/// in the role string, so a role naming several applies all of them.
pub fn auto_calculate_stats(level: u32, role: &str) -> SuggestedStats {
    let level = level.max(1);
    let multiplier = stamina_multiplier(role);
    let stamina = (f64::from(level) * multiplier).floor() as u32 + 10;

    let mut ev = 12u32.saturating_add((level - 1).saturating_mul(4));
    if role.contains("Minion") {
        ev = ev.div_ceil(4);
    }
    if role.contains("Elite") {
        ev = ev.saturating_mul(2);
    }
    if role.contains("Solo") {
        ev = ev.saturating_mul(4);
    }

    SuggestedStats {
        stamina,
        stability: level / 3,
        free_strike: level / 2 + 2,
        speed: DEFAULT_SPEED,
        size: DEFAULT_SIZE.to_string(),
        ev,
    }
}
