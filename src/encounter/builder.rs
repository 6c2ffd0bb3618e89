//! Encounter composition: the party, the monsters picked for it, and the
//! resulting balance summary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bestiary::Monster;
use crate::encounter::math::{
    budget_range, difficulty_tier, party_strength, BudgetRange, Difficulty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyConfig {
    pub level: u32,
    pub hero_count: u32,
    pub victories: u32,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            level: 1,
            hero_count: 4,
            victories: 0,
        }
    }
}

impl PartyConfig {
    pub fn strength(&self) -> u32 {
        party_strength(self.level, self.hero_count, self.victories)
    }
}

/// One monster placed in an encounter. The same catalog monster may appear many
/// times, so each placement gets its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterEntry {
    pub id: Uuid,
    #[serde(flatten)]
    pub monster: Monster,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    entries: Vec<EncounterEntry>,
}

impl Encounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a copy of `monster`; returns the new entry's id.
    pub fn add(&mut self, monster: Monster) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(EncounterEntry { id, monster });
        id
    }

    /// Remove the entry with `id`. Returns false when there is none.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> &[EncounterEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_ev(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |total, entry| total.saturating_add(entry.monster.ev))
    }

    pub fn summarize(&self, party: &PartyConfig) -> EncounterSummary {
        EncounterSummary::new(party, self.total_ev())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSummary {
    pub party_strength: u32,
    pub total_ev: u32,
    pub difficulty: Difficulty,
    pub budget: BudgetRange,
    /// Share of twice the party strength spent, capped at 100.
    pub gauge_percent: f64,
}

impl EncounterSummary {
    pub fn new(party: &PartyConfig, total_ev: u32) -> Self {
        let strength = party.strength();
        let difficulty = difficulty_tier(strength, total_ev, party.hero_count, party.level);
        let gauge_percent = if strength == 0 {
            0.0
        } else {
            (f64::from(total_ev) / (f64::from(strength) * 2.0) * 100.0).min(100.0)
        };

        Self {
            party_strength: strength,
            total_ev,
            difficulty,
            budget: budget_range(difficulty, strength, party.level),
            gauge_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(name: &str, ev: u32) -> Monster {
        Monster {
            name: name.to_string(),
            ev,
            ..Monster::default()
        }
    }

    #[test]
    fn default_party_is_four_level_one_heroes() {
        let party = PartyConfig::default();
        assert_eq!(party.strength(), 24);
    }

    #[test]
    fn duplicate_monsters_get_distinct_entries() {
        let mut encounter = Encounter::new();
        let first = encounter.add(monster("Goblin", 3));
        let second = encounter.add(monster("Goblin", 3));
        assert_ne!(first, second);
        assert_eq!(encounter.total_ev(), 6);

        assert!(encounter.remove(first));
        assert!(!encounter.remove(first));
        assert_eq!(encounter.len(), 1);
        assert_eq!(encounter.entries()[0].id, second);
    }

    #[test]
    fn summary_classifies_and_reports_gauge() {
        let party = PartyConfig {
            level: 3,
            hero_count: 4,
            victories: 2,
        };
        let summary = EncounterSummary::new(&party, 55);
        assert_eq!(summary.party_strength, 50);
        assert_eq!(summary.difficulty, Difficulty::Standard);
        assert_eq!(summary.budget, BudgetRange { min: 50, max: 60 });
        assert!((summary.gauge_percent - 55.0).abs() < 1e-9);
    }

    #[test]
    fn gauge_caps_and_handles_empty_party() {
        let party = PartyConfig::default();
        assert_eq!(EncounterSummary::new(&party, 500).gauge_percent, 100.0);

        let nobody = PartyConfig {
            hero_count: 0,
            ..PartyConfig::default()
        };
        assert_eq!(EncounterSummary::new(&nobody, 10).gauge_percent, 0.0);
    }

    #[test]
    fn empty_encounter_summary_is_trivial_for_real_party() {
        let summary = Encounter::new().summarize(&PartyConfig::default());
        assert_eq!(summary.total_ev, 0);
        assert_eq!(summary.difficulty, Difficulty::Trivial);
    }
}
