//! Monster catalog tooling for Draw Steel encounter building: statblock ingestion,
//! encounter balancing, custom monster storage, and AI-assisted drafting.

pub mod bestiary;
pub mod cli;
pub mod config;
pub mod encounter;
pub mod generation;
pub mod store;
pub mod validate;
