//! Encounter balancing: party strength, difficulty tiers, budget ranges, and
//! stat suggestions for new monsters. Everything here is pure arithmetic.

pub mod builder;
pub mod math;
pub mod stats;

pub use builder::{Encounter, EncounterEntry, EncounterSummary, PartyConfig};
pub use math::{
    budget_range, difficulty_tier, party_strength, strength_per_hero, BudgetRange, Difficulty,
    EXTREME_BUDGET_CEILING, MAX_PARTY_LEVEL,
};
pub use stats::{auto_calculate_stats, parse_level, SuggestedStats};
