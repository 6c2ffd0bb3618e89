use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::bestiary::{Monster, MonsterStats};
use crate::encounter::{auto_calculate_stats, parse_level};
use crate::store::{KeyValueStore, StoreError};

pub const STORAGE_KEY: &str = "draw_steel_custom_monsters";
pub const COPY_SUFFIX: &str = " (Copy)";

/// A user-authored monster. Serialized flat: the monster's catalog fields plus
/// `id` and `updatedAt`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMonster {
    pub id: Uuid,
    #[serde(flatten)]
    pub monster: Monster,
    pub updated_at: DateTime<Utc>,
}

impl CustomMonster {
    pub fn new(monster: Monster) -> Self {
        Self {
            id: Uuid::new_v4(),
            monster,
            updated_at: Utc::now(),
        }
    }
}

/// Blank monster as the creator starts it: level 1 Standard Humanoid worth 3 EV.
pub fn new_custom_monster(name: impl Into<String>) -> CustomMonster {
    CustomMonster::new(Monster {
        name: name.into(),
        monster_type: "Humanoid".to_string(),
        level: "1".to_string(),
        role: "Standard".to_string(),
        ev: 3,
        stats: MonsterStats {
            size: "1M".to_string(),
            speed: "6".to_string(),
            stamina: "10".to_string(),
            stability: "0".to_string(),
            free_strike: "2".to_string(),
        },
        ..Monster::default()
    })
}

/// Editable copy of `source` under a fresh id. Provenance is dropped: the copy
/// no longer comes from a bestiary file.
pub fn clone_monster(source: &Monster) -> CustomMonster {
    CustomMonster::new(Monster {
        name: format!("{}{COPY_SUFFIX}", source.name),
        source_file: None,
        format: None,
        ..source.clone()
    })
}

/// Overwrite `ev` and the stat line with suggestions for the monster's level and role.
pub fn apply_auto_stats(monster: &mut Monster) {
    let suggested = auto_calculate_stats(parse_level(&monster.level), &monster.role);
    monster.ev = suggested.ev;
    monster.stats = MonsterStats {
        size: suggested.size,
        speed: suggested.speed.to_string(),
        stamina: suggested.stamina.to_string(),
        stability: suggested.stability.to_string(),
        free_strike: suggested.free_strike.to_string(),
    };
}

/// Custom monster list kept as one JSON array under [STORAGE_KEY].
#[derive(Debug, Clone)]
pub struct CustomMonsterStore<S> {
    backend: S,
}

impl<S: KeyValueStore> CustomMonsterStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Stored monsters in save order. A payload that does not decode is logged and
    /// treated as empty; backend failures propagate.
    pub fn list(&self) -> Result<Vec<CustomMonster>, StoreError> {
        let Some(raw) = self.backend.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(monsters) => Ok(monsters),
            Err(err) => {
                warn!("failed to load custom monsters: {err}");
                Ok(Vec::new())
            }
        }
    }

    pub fn get(&self, id: Uuid) -> Result<Option<CustomMonster>, StoreError> {
        Ok(self.list()?.into_iter().find(|entry| entry.id == id))
    }

    /// Insert or replace by id, stamping `updatedAt`. Returns the updated list.
    pub fn save(&mut self, mut monster: CustomMonster) -> Result<Vec<CustomMonster>, StoreError> {
        monster.updated_at = Utc::now();
        let mut current = self.list()?;
        match current.iter_mut().find(|entry| entry.id == monster.id) {
            Some(existing) => *existing = monster,
            None => current.push(monster),
        }
        self.persist(&current)?;
        Ok(current)
    }

    /// Remove by id. Unknown ids leave the list unchanged. Returns the updated list.
    pub fn delete(&mut self, id: Uuid) -> Result<Vec<CustomMonster>, StoreError> {
        let mut current = self.list()?;
        current.retain(|entry| entry.id != id);
        self.persist(&current)?;
        Ok(current)
    }

    fn persist(&mut self, monsters: &[CustomMonster]) -> Result<(), StoreError> {
        let payload = serde_json::to_string(monsters)?;
        self.backend.set(STORAGE_KEY, payload)
    }
}
