//! Catalog artifact (`monsters.json`): read/write plus the browse filters the
//! encounter builder offers over it.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bestiary::model::Monster;

pub const DEFAULT_CATALOG_PATH: &str = "data/monsters.json";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("bestiary directory not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<Monster>, CatalogError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the catalog as pretty JSON (two-space indent), creating parent directories.
/// Output depends only on `monsters`, so identical input gives identical bytes.
pub fn write_catalog(path: impl AsRef<Path>, monsters: &[Monster]) -> Result<(), CatalogError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let payload = serde_json::to_string_pretty(monsters)?;
    fs::write(path, payload).map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Browse filter. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterFilter {
    /// Case-insensitive substring of name or type.
    #[serde(default)]
    pub search: String,
    /// Substring of the role string, e.g. `Brute` matches `Elite Brute`.
    #[serde(default)]
    pub role: String,
    /// Exact level string.
    #[serde(default)]
    pub level: String,
}

impl MonsterFilter {
    pub fn matches(&self, monster: &Monster) -> bool {
        let search = self.search.to_lowercase();
        let matches_search = monster.name.to_lowercase().contains(&search)
            || monster.monster_type.to_lowercase().contains(&search);
        let matches_role = self.role.is_empty() || monster.role.contains(&self.role);
        let matches_level = self.level.is_empty() || monster.level == self.level;
        matches_search && matches_role && matches_level
    }

    pub fn apply<'a>(&self, monsters: &'a [Monster]) -> Vec<&'a Monster> {
        monsters.iter().filter(|monster| self.matches(monster)).collect()
    }
}

/// Role dropdown entries: the descriptor token when a role has one (`Minion Artillery`
/// -> `Artillery`), otherwise the whole role. Unique and sorted.
pub fn role_options(monsters: &[Monster]) -> Vec<String> {
    monsters
        .iter()
        .map(|monster| {
            monster
                .role
                .split(' ')
                .nth(1)
                .filter(|token| !token.is_empty())
                .unwrap_or(&monster.role)
                .to_string()
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Level dropdown entries, unique and sorted numerically. Non-numeric levels sort last.
pub fn level_options(monsters: &[Monster]) -> Vec<String> {
    let mut levels: Vec<String> = monsters
        .iter()
        .map(|monster| monster.level.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    levels.sort_by_key(|level| (level.trim().parse::<u32>().unwrap_or(u32::MAX), level.clone()));
    levels
}
