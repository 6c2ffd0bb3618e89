use std::path::PathBuf;

use steelforge::bestiary::{build_ability_library, ingest_dir, search_abilities, Ability, Monster};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

fn monster(name: &str, role: &str, abilities: &[(&str, &str)]) -> Monster {
    Monster {
        name: name.to_string(),
        role: role.to_string(),
        abilities: abilities
            .iter()
            .map(|(ability_name, ability_type)| Ability {
                name: ability_name.to_string(),
                ability_type: ability_type.to_string(),
                ..Ability::default()
            })
            .collect(),
        ..Monster::default()
    }
}

#[test]
fn fixture_library_is_sorted_and_attributed() {
    let report = ingest_dir(fixture_path("bestiary")).expect("fixture bestiary should ingest");
    let library = build_ability_library(&report.monsters);

    let names: Vec<_> = library.iter().map(|entry| entry.ability.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Bloodlust", "Cleaver", "Crafty", "Javelin", "Relentless", "Spear Charge"]
    );

    let cleaver = &library[1];
    assert_eq!(cleaver.source_monster, "Orc");
    assert_eq!(cleaver.source_role, "Horde Brute");
}

#[test]
fn shared_ability_is_attributed_to_first_monster() {
    let catalog = vec![
        monster("Goblin Warrior", "Minion Harrier", &[("Shiv", "Action")]),
        monster("Goblin Assassin", "Minion Ambusher", &[("Shiv", "Action")]),
        monster("Goblin Boss", "Leader", &[("Shiv", "Maneuver")]),
    ];
    let library = build_ability_library(&catalog);

    assert_eq!(library.len(), 2);
    assert_eq!(library[0].source_monster, "Goblin Warrior");
    assert_eq!(library[0].ability.ability_type, "Action");
    assert_eq!(library[1].source_monster, "Goblin Boss");
}

#[test]
fn search_is_case_insensitive_and_capped() {
    let catalog = vec![monster(
        "Orc",
        "Brute",
        &[
            ("Cleaver", "Signature Ability"),
            ("Cleave Again", "Action"),
            ("Shove", "Maneuver"),
        ],
    )];
    let library = build_ability_library(&catalog);

    let hits: Vec<_> = search_abilities(&library, "CLEAV", 20)
        .into_iter()
        .map(|entry| entry.ability.name.as_str())
        .collect();
    assert_eq!(hits, vec!["Cleave Again", "Cleaver"]);
    assert_eq!(search_abilities(&library, "maneuver", 20).len(), 1);
    assert_eq!(search_abilities(&library, "e", 2).len(), 2);
    assert!(search_abilities(&library, "", 20).is_empty());
}
