//! Runtime configuration from the environment (plus an optional `.env`).

use std::env;
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::bestiary::{DEFAULT_BESTIARY_DIR, DEFAULT_CATALOG_PATH};
use crate::generation::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::store::DEFAULT_STORE_PATH;

const DEFAULT_LOG_FILTER: &str = "steelforge=info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root of the markdown bestiary.
    pub bestiary_dir: PathBuf,
    /// Catalog JSON written by `parse`, read by everything else.
    pub catalog_path: PathBuf,
    /// JSON file backing the custom monster store.
    pub store_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            bestiary_dir: var("STEELFORGE_BESTIARY_DIR")
                .unwrap_or_else(|| DEFAULT_BESTIARY_DIR.to_string())
                .into(),
            catalog_path: var("STEELFORGE_CATALOG_PATH")
                .unwrap_or_else(|| DEFAULT_CATALOG_PATH.to_string())
                .into(),
            store_path: var("STEELFORGE_STORE_PATH")
                .unwrap_or_else(|| DEFAULT_STORE_PATH.to_string())
                .into(),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: var("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

/// Load `.env` if present and install the stderr log subscriber. `RUST_LOG`
/// overrides the default filter. Safe to call more than once.
pub fn init_tracing() {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
