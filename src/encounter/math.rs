//! Encounter strength and difficulty.
//!
//! A party's encounter strength (ES) is its effective hero count times the
//! per-hero strength for its level. Difficulty compares the total encounter value
//! (EV) of the monsters against ES in steps of one hero's strength:
//!
//! | tier     | total EV                        |
//! |----------|---------------------------------|
//! | Trivial  | `< ES - hero`                   |
//! | Easy     | `< ES`                          |
//! | Standard | `<= ES + hero`                  |
//! | Hard     | `<= ES + 3 * hero`              |
//! | Extreme  | anything above                  |

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MAX_PARTY_LEVEL: u32 = 10;
/// Upper bound reported for the open-ended Extreme budget: the largest total EV.
pub const EXTREME_BUDGET_CEILING: i64 = u32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Trivial,
    Easy,
    Standard,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Trivial,
        Difficulty::Easy,
        Difficulty::Standard,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trivial => "Trivial",
            Self::Easy => "Easy",
            Self::Standard => "Standard",
            Self::Hard => "Hard",
            Self::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive EV range. `max < min` means the tier is unreachable for this party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: i64,
    pub max: i64,
}

impl BudgetRange {
    pub fn contains(&self, ev: i64) -> bool {
        ev >= self.min && ev <= self.max
    }
}

/// Encounter strength contributed by one hero of `level`: 6 at level 1 up to 24 at
/// level 10. Levels outside 1..=10 contribute nothing.
pub fn strength_per_hero(level: u32) -> u32 {
    if (1..=MAX_PARTY_LEVEL).contains(&level) {
        4 + 2 * level
    } else {
        0
    }
}

/// Every two victories count as one extra hero.
pub fn party_strength(level: u32, hero_count: u32, victories: u32) -> u32 {
    let effective_heroes = hero_count.saturating_add(victories / 2);
    effective_heroes.saturating_mul(strength_per_hero(level))
}

/// Classify `total_ev` against `party_strength`. `hero_count` does not enter the
/// formula; the hero step comes from `level` alone.
pub fn difficulty_tier(
    party_strength: u32,
    total_ev: u32,
    _hero_count: u32,
    level: u32,
) -> Difficulty {
    let es = i64::from(party_strength);
    let hero = i64::from(strength_per_hero(level));
    let ev = i64::from(total_ev);

    if ev < es - hero {
        Difficulty::Trivial
    } else if ev < es {
        Difficulty::Easy
    } else if ev <= es + hero {
        Difficulty::Standard
    } else if ev <= es + 3 * hero {
        Difficulty::Hard
    } else {
        Difficulty::Extreme
    }
}

/// EV range that [difficulty_tier] maps to `tier`.
pub fn budget_range(tier: Difficulty, party_strength: u32, level: u32) -> BudgetRange {
    let es = i64::from(party_strength);
    let hero = i64::from(strength_per_hero(level));

    let (min, max) = match tier {
        Difficulty::Trivial => (0, es - hero - 1),
        Difficulty::Easy => (es - hero, es - 1),
        Difficulty::Standard => (es, es + hero),
        Difficulty::Hard => (es + hero + 1, es + 3 * hero),
        Difficulty::Extreme => {
            let min = es + 3 * hero + 1;
            (min, EXTREME_BUDGET_CEILING.max(min))
        }
    };
    BudgetRange { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_hero_table_matches_rules() {
        let table: Vec<u32> = (1..=10).map(strength_per_hero).collect();
        assert_eq!(table, vec![6, 8, 10, 12, 14, 16, 18, 20, 22, 24]);
        assert_eq!(strength_per_hero(0), 0);
        assert_eq!(strength_per_hero(11), 0);
    }

    #[test]
    fn victories_add_heroes_in_pairs() {
        assert_eq!(party_strength(3, 4, 2), 50);
        assert_eq!(party_strength(3, 4, 3), 50);
        assert_eq!(party_strength(3, 4, 4), 60);
    }

    #[test]
    fn boundaries_use_exact_operators() {
        // ES 50, hero 10 at level 3.
        assert_eq!(difficulty_tier(50, 39, 4, 3), Difficulty::Trivial);
        assert_eq!(difficulty_tier(50, 40, 4, 3), Difficulty::Easy);
        assert_eq!(difficulty_tier(50, 49, 4, 3), Difficulty::Easy);
        assert_eq!(difficulty_tier(50, 50, 4, 3), Difficulty::Standard);
        assert_eq!(difficulty_tier(50, 60, 4, 3), Difficulty::Standard);
        assert_eq!(difficulty_tier(50, 61, 4, 3), Difficulty::Hard);
        assert_eq!(difficulty_tier(50, 80, 4, 3), Difficulty::Hard);
        assert_eq!(difficulty_tier(50, 81, 4, 3), Difficulty::Extreme);
    }

    #[test]
    fn budget_ranges_for_level_three_party() {
        assert_eq!(budget_range(Difficulty::Trivial, 50, 3), BudgetRange { min: 0, max: 39 });
        assert_eq!(budget_range(Difficulty::Easy, 50, 3), BudgetRange { min: 40, max: 49 });
        assert_eq!(budget_range(Difficulty::Standard, 50, 3), BudgetRange { min: 50, max: 60 });
        assert_eq!(budget_range(Difficulty::Hard, 50, 3), BudgetRange { min: 61, max: 80 });
        assert_eq!(
            budget_range(Difficulty::Extreme, 50, 3),
            BudgetRange { min: 81, max: EXTREME_BUDGET_CEILING }
        );
    }

    #[test]
    fn extreme_range_reaches_largest_total_ev() {
        let range = budget_range(Difficulty::Extreme, 50, 3);
        for ev in [10_000, u32::MAX] {
            assert_eq!(difficulty_tier(50, ev, 4, 3), Difficulty::Extreme);
            assert!(range.contains(i64::from(ev)), "{range:?} misses {ev}");
        }
    }

    #[test]
    fn unknown_level_degrades_to_zero_step() {
        assert_eq!(party_strength(12, 4, 0), 0);
        assert_eq!(difficulty_tier(0, 0, 4, 12), Difficulty::Standard);
        assert_eq!(difficulty_tier(0, 1, 4, 12), Difficulty::Extreme);
    }
}
