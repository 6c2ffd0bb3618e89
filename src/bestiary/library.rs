//! Ability library: every distinct ability in the catalog, for reuse when
//! building new monsters.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::bestiary::model::{Ability, Monster};

/// Library entry: the ability plus the monster it was first seen on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryAbility {
    #[serde(flatten)]
    pub ability: Ability,
    pub source_monster: String,
    pub source_role: String,
}

/// Flatten abilities across `monsters`, keeping the first occurrence of each
/// `(name, type)` pair in catalog order, sorted by name case-insensitively.
pub fn build_ability_library(monsters: &[Monster]) -> Vec<LibraryAbility> {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut library = Vec::new();

    for monster in monsters {
        for ability in &monster.abilities {
            if seen.insert((ability.name.as_str(), ability.ability_type.as_str())) {
                library.push(LibraryAbility {
                    ability: ability.clone(),
                    source_monster: monster.name.clone(),
                    source_role: monster.role.clone(),
                });
            }
        }
    }

    // Stable sort: equal names keep catalog order.
    library.sort_by_cached_key(|entry| entry.ability.name.to_lowercase());
    library
}

/// Case-insensitive substring search on ability name or type, capped at `limit`.
/// An empty query returns nothing.
pub fn search_abilities<'a>(
    library: &'a [LibraryAbility],
    query: &str,
    limit: usize,
) -> Vec<&'a LibraryAbility> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    library
        .iter()
        .filter(|entry| {
            entry.ability.name.to_lowercase().contains(&query)
                || entry.ability.ability_type.to_lowercase().contains(&query)
        })
        .take(limit)
        .collect()
}
