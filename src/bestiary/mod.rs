//! Bestiary ingestion: parses statblock documents (legacy markdown tables and
//! `ds-statblock` YAML blocks) into [Monster] records, deduplicates them, and
//! flattens their abilities into a reusable library.

pub mod catalog;
mod ingest;
mod legacy;
pub mod library;
mod model;
mod statblock;

pub use catalog::{
    level_options, load_catalog, role_options, write_catalog, CatalogError, MonsterFilter,
    DEFAULT_CATALOG_PATH,
};
pub use ingest::{
    dedupe_monsters, ingest_dir, normalize_ev, parse_document, parse_monster_file, IngestReport,
    DEFAULT_BESTIARY_DIR, STATBLOCK_FENCE,
};
pub use legacy::{parse_legacy_document, AbilityScanner};
pub use library::{build_ability_library, search_abilities, LibraryAbility};
pub use model::{Ability, Monster, MonsterStats, SourceFormat};
pub use statblock::{parse_statblock_document, render_effect, StatblockError};
