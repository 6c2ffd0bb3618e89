use std::path::PathBuf;

use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::bestiary::{
    build_ability_library, ingest_dir, level_options, load_catalog, role_options,
    search_abilities, write_catalog, Monster, MonsterFilter,
};
use crate::config::AppConfig;
use crate::encounter::{
    auto_calculate_stats, budget_range, parse_level, Difficulty, Encounter, PartyConfig,
};
use crate::generation::{normalize_generated, GeminiClient};
use crate::store::{
    apply_auto_stats, clone_monster, new_custom_monster, CustomMonster, CustomMonsterStore,
    JsonFileStore,
};
use crate::validate::{validate_catalog_file, ValidationReport, ValidationSeverity};

const USAGE: &str =
    "usage: steelforge <parse|validate|library|browse|encounter|stats|budget|custom|generate>";
const LIBRARY_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Parse,
    Validate,
    Library,
    Browse,
    Encounter,
    Stats,
    Budget,
    Custom,
    Generate,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("parse") => Some(Command::Parse),
        Some("validate") => Some(Command::Validate),
        Some("library") => Some(Command::Library),
        Some("browse") => Some(Command::Browse),
        Some("encounter") => Some(Command::Encounter),
        Some("stats") => Some(Command::Stats),
        Some("budget") => Some(Command::Budget),
        Some("custom") => Some(Command::Custom),
        Some("generate") => Some(Command::Generate),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    run_with_config(args, &AppConfig::from_env())
}

pub fn run_with_config(args: &[String], config: &AppConfig) -> i32 {
    match parse_command(args) {
        Some(Command::Parse) => handle_parse(args, config),
        Some(Command::Validate) => handle_validate(args, config),
        Some(Command::Library) => handle_library(args, config),
        Some(Command::Browse) => handle_browse(args, config),
        Some(Command::Encounter) => handle_encounter(args, config),
        Some(Command::Stats) => handle_stats(args),
        Some(Command::Budget) => handle_budget(args),
        Some(Command::Custom) => handle_custom(args, config),
        Some(Command::Generate) => handle_generate(args, config),
        None => {
            eprintln!("{USAGE}");
            2
        }
    }
}

fn handle_parse(args: &[String], config: &AppConfig) -> i32 {
    let source = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.bestiary_dir.clone());
    let output = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.catalog_path.clone());

    let report = match ingest_dir(&source) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };
    if let Err(err) = write_catalog(&output, &report.monsters) {
        eprintln!("error: {err}");
        return 1;
    }

    println!(
        "Found {} entries. Deduplicated to {} monsters.",
        report.entries_found,
        report.monsters.len()
    );
    println!("wrote {}", output.display());
    if report.files_failed > 0 {
        eprintln!("{} file(s) could not be read", report.files_failed);
    }
    0
}

fn handle_validate(args: &[String], config: &AppConfig) -> i32 {
    let path = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.catalog_path.clone());

    match validate_catalog_file(&path) {
        Ok(report) => {
            print_diagnostics(&report);
            let errors = report.count(ValidationSeverity::Error);
            if errors > 0 {
                eprintln!("validation failed: {errors} error(s)");
                1
            } else {
                println!(
                    "validation passed: {} ({} warning(s))",
                    path.display(),
                    report.count(ValidationSeverity::Warning)
                );
                0
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            1
        }
    }
}

fn handle_library(args: &[String], config: &AppConfig) -> i32 {
    let Some(catalog) = load_or_report(config) else {
        return 1;
    };
    let library = build_ability_library(&catalog);

    match args.get(2) {
        Some(query) => print_json(&search_abilities(&library, query, LIBRARY_SEARCH_LIMIT)),
        None => print_json(&library),
    }
}

fn handle_browse(args: &[String], config: &AppConfig) -> i32 {
    let mut filter = MonsterFilter::default();
    let mut rest = args.iter().skip(2);
    while let Some(flag) = rest.next() {
        let slot = match flag.as_str() {
            "--search" => &mut filter.search,
            "--role" => &mut filter.role,
            "--level" => &mut filter.level,
            _ => {
                eprintln!("usage: steelforge browse [--search S] [--role R] [--level L]");
                return 2;
            }
        };
        let Some(value) = rest.next() else {
            eprintln!("missing value for {flag}");
            return 2;
        };
        *slot = value.clone();
    }

    let Some(catalog) = load_or_report(config) else {
        return 1;
    };
    let monsters: Vec<_> = filter
        .apply(&catalog)
        .into_iter()
        .map(|monster| {
            json!({
                "name": monster.name,
                "type": monster.monster_type,
                "level": monster.level,
                "role": monster.role,
                "ev": monster.ev,
            })
        })
        .collect();

    print_json(&json!({
        "count": monsters.len(),
        "roles": role_options(&catalog),
        "levels": level_options(&catalog),
        "monsters": monsters,
    }))
}

fn party_from_args(args: &[String]) -> PartyConfig {
    let defaults = PartyConfig::default();
    PartyConfig {
        level: parse_u32_arg(args.get(2), "level", defaults.level),
        hero_count: parse_u32_arg(args.get(3), "heroes", defaults.hero_count),
        victories: parse_u32_arg(args.get(4), "victories", defaults.victories),
    }
}

fn handle_encounter(args: &[String], config: &AppConfig) -> i32 {
    let names = args.get(5..).unwrap_or_default();
    if names.is_empty() {
        eprintln!("usage: steelforge encounter <level> <heroes> <victories> <monster>...");
        return 2;
    }
    let party = party_from_args(args);

    let Some(catalog) = load_or_report(config) else {
        return 1;
    };
    let custom = match custom_store(config).list() {
        Ok(custom) => custom,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let mut encounter = Encounter::new();
    let mut unknown = Vec::new();
    for name in names {
        match find_monster(&catalog, &custom, name) {
            Some(monster) => {
                encounter.add(monster.clone());
            }
            None => unknown.push(name.as_str()),
        }
    }
    if !unknown.is_empty() {
        eprintln!("unknown monster(s): {}", unknown.join(", "));
        return 1;
    }

    let summary = encounter.summarize(&party);
    info!(
        "encounter of {} monster(s) is {}",
        encounter.len(),
        summary.difficulty
    );
    print_json(&json!({
        "party": party,
        "summary": summary,
        "monsters": encounter.entries(),
    }))
}

fn handle_stats(args: &[String]) -> i32 {
    let (Some(level), Some(_)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: steelforge stats <level> <role...>");
        return 2;
    };
    let role = args[3..].join(" ");
    print_json(&auto_calculate_stats(parse_level(level), &role))
}

fn handle_budget(args: &[String]) -> i32 {
    let party = party_from_args(args);
    let strength = party.strength();
    let tiers: Vec<_> = Difficulty::ALL
        .iter()
        .map(|tier| {
            let range = budget_range(*tier, strength, party.level);
            json!({ "difficulty": tier, "min": range.min, "max": range.max })
        })
        .collect();

    print_json(&json!({
        "party": party,
        "partyStrength": strength,
        "tiers": tiers,
    }))
}

fn handle_custom(args: &[String], config: &AppConfig) -> i32 {
    const CUSTOM_USAGE: &str =
        "usage: steelforge custom <list | new <name> <level> <role...> | delete <id> | clone <name>>";
    let mut store = custom_store(config);

    let result = match (args.get(2).map(String::as_str), args.get(3)) {
        (Some("list"), _) => store.list().map(|listed| print_json(&listed)),
        (Some("new"), Some(name)) => {
            let mut created = new_custom_monster(name.as_str());
            if let Some(level) = args.get(4) {
                created.monster.level = parse_level(level).to_string();
            }
            if args.len() > 5 {
                created.monster.role = args[5..].join(" ");
            }
            apply_auto_stats(&mut created.monster);
            save_and_print(&mut store, created)
        }
        (Some("delete"), Some(raw_id)) => {
            let Ok(id) = Uuid::parse_str(raw_id) else {
                eprintln!("invalid id '{raw_id}'");
                return 2;
            };
            store.delete(id).map(|remaining| {
                println!("{} custom monster(s) remain", remaining.len());
                0
            })
        }
        (Some("clone"), Some(name)) => {
            let catalog = load_catalog(&config.catalog_path).unwrap_or_default();
            let custom = match store.list() {
                Ok(custom) => custom,
                Err(err) => {
                    eprintln!("error: {err}");
                    return 1;
                }
            };
            let Some(source) = find_monster(&catalog, &custom, name) else {
                eprintln!("unknown monster '{name}'");
                return 1;
            };
            let copy = clone_monster(source);
            save_and_print(&mut store, copy)
        }
        _ => {
            eprintln!("{CUSTOM_USAGE}");
            return 2;
        }
    };

    result.unwrap_or_else(|err| {
        eprintln!("error: {err}");
        1
    })
}

fn handle_generate(args: &[String], config: &AppConfig) -> i32 {
    let prompt = args.get(2..).unwrap_or_default().join(" ");
    if prompt.trim().is_empty() {
        eprintln!("usage: steelforge generate <description...>");
        return 2;
    }

    let client = GeminiClient::with_base_url(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        &config.gemini_base_url,
    );
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return 1;
        }
    };

    let generated = match runtime
        .block_on(client.generate(&prompt))
        .and_then(normalize_generated)
    {
        Ok(generated) => generated,
        Err(err) => {
            error!("generation failed: {err}");
            eprintln!("error: {err}");
            return 1;
        }
    };

    let (monster, report) = generated;
    print_diagnostics(&report);
    if report.has_errors() {
        eprintln!("generated monster rejected");
        return 1;
    }

    let mut store = custom_store(config);
    save_and_print(&mut store, CustomMonster::new(monster)).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        1
    })
}

fn custom_store(config: &AppConfig) -> CustomMonsterStore<JsonFileStore> {
    CustomMonsterStore::new(JsonFileStore::new(&config.store_path))
}

fn save_and_print(
    store: &mut CustomMonsterStore<JsonFileStore>,
    monster: CustomMonster,
) -> Result<i32, crate::store::StoreError> {
    let id = monster.id;
    let saved = store.save(monster)?;
    let code = saved
        .iter()
        .find(|entry| entry.id == id)
        .map_or(1, |entry| print_json(entry));
    Ok(code)
}

/// Catalog entries win over custom monsters with the same name.
fn find_monster<'a>(
    catalog: &'a [Monster],
    custom: &'a [CustomMonster],
    name: &str,
) -> Option<&'a Monster> {
    catalog
        .iter()
        .find(|monster| monster.name == name)
        .or_else(|| {
            custom
                .iter()
                .map(|entry| &entry.monster)
                .find(|monster| monster.name == name)
        })
}

fn load_or_report(config: &AppConfig) -> Option<Vec<Monster>> {
    match load_catalog(&config.catalog_path) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}

fn print_diagnostics(report: &ValidationReport) {
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> i32 {
    match serde_json::to_string_pretty(value) {
        Ok(payload) => {
            println!("{payload}");
            0
        }
        Err(err) => {
            eprintln!("failed to serialize output: {err}");
            1
        }
    }
}

fn parse_u32_arg(raw: Option<&String>, name: &str, default: u32) -> u32 {
    raw.and_then(|value| value.parse::<u32>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn commands_are_recognized() {
        assert_eq!(parse_command(&args(&["steelforge", "parse"])), Some(Command::Parse));
        assert_eq!(parse_command(&args(&["steelforge", "budget"])), Some(Command::Budget));
        assert_eq!(parse_command(&args(&["steelforge", "serve"])), None);
        assert_eq!(parse_command(&args(&["steelforge"])), None);
    }

    #[test]
    fn party_args_fall_back_to_defaults() {
        let party = party_from_args(&args(&["steelforge", "budget", "3", "x"]));
        assert_eq!(
            party,
            PartyConfig {
                level: 3,
                hero_count: 4,
                victories: 0
            }
        );
    }

    #[test]
    fn catalog_monsters_shadow_custom_ones() {
        let catalog = vec![Monster {
            name: "Orc".to_string(),
            ev: 3,
            ..Monster::default()
        }];
        let mut custom = new_custom_monster("Orc");
        custom.monster.ev = 99;
        let customs = vec![custom, new_custom_monster("Blob")];

        assert_eq!(find_monster(&catalog, &customs, "Orc").map(|m| m.ev), Some(3));
        assert!(find_monster(&catalog, &customs, "Blob").is_some());
        assert!(find_monster(&catalog, &customs, "Nobody").is_none());
    }

    #[test]
    fn unknown_command_is_usage_error() {
        let code = run_with_config(&args(&["steelforge", "fly"]), &AppConfig::default());
        assert_eq!(code, 2);
    }
}
