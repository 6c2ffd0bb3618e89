//! Bestiary directory ingestion: format probe, recursive walk, and name dedup.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::bestiary::catalog::CatalogError;
use crate::bestiary::legacy::parse_legacy_document;
use crate::bestiary::model::{Monster, SourceFormat};
use crate::bestiary::statblock::parse_statblock_document;

pub const DEFAULT_BESTIARY_DIR: &str = "Bestiary/Monsters";
/// Sentinel that marks a document as structured-block format.
pub const STATBLOCK_FENCE: &str = "~~~ds-statblock";
const SOURCE_EXTENSION: &str = "md";
const SKIP_PREFIX: char = '_';

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("Invalid digit regex"));

/// Encounter value from free text: the first run of digits, or 0 when there is none.
/// Runs too long for a `u32` saturate.
///
/// ```
/// # use steelforge::bestiary::normalize_ev;
/// assert_eq!(normalize_ev("Lvl 3 (12 EV)"), 3);
/// assert_eq!(normalize_ev("EV 12 for four minions"), 12);
/// assert_eq!(normalize_ev("-"), 0);
/// assert_eq!(normalize_ev("EV 99999999999"), u32::MAX);
/// ```
pub fn normalize_ev(text: &str) -> u32 {
    DIGITS
        .find(text)
        .map(|digits| {
            digits.as_str().bytes().fold(0u32, |ev, digit| {
                ev.saturating_mul(10).saturating_add(u32::from(digit - b'0'))
            })
        })
        .unwrap_or(0)
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestReport {
    /// Deduplicated catalog, in first-seen order.
    pub monsters: Vec<Monster>,
    /// Records parsed before dedup.
    pub entries_found: usize,
    pub files_parsed: usize,
    pub files_failed: usize,
}

/// Parse one document, choosing the format by probing for the statblock fence.
pub fn parse_document(content: &str, source_file: &str) -> Vec<Monster> {
    if content.contains(STATBLOCK_FENCE) {
        parse_statblock_document(content, source_file)
    } else {
        parse_legacy_document(content, source_file)
    }
}

/// `path` relative to `root` with `/` separators, as recorded in `sourceFile`.
fn relative_source(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|part| part.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read and parse one bestiary file. `root` is used only to compute `sourceFile`.
pub fn parse_monster_file(path: &Path, root: &Path) -> Result<Vec<Monster>, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_document(&content, &relative_source(path, root)))
}

fn is_source_document(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .map_or(false, |extension| extension == SOURCE_EXTENSION);
    let skipped = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or(true, |name| name.starts_with(SKIP_PREFIX));
    has_extension && !skipped
}

/// Keep one record per name. A YAML record replaces an earlier non-YAML one;
/// otherwise the first record wins. Output keeps first-seen order.
pub fn dedupe_monsters(monsters: Vec<Monster>) -> Vec<Monster> {
    let mut unique: IndexMap<String, Monster> = IndexMap::new();

    for monster in monsters {
        match unique.entry(monster.name.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(monster);
            }
            Entry::Occupied(mut slot) => {
                let replaces = monster.format == Some(SourceFormat::Yaml)
                    && slot.get().format != Some(SourceFormat::Yaml);
                if replaces {
                    debug!("'{}' from {:?} replaces markdown record", monster.name, monster.source_file);
                    slot.insert(monster);
                }
            }
        }
    }

    unique.into_values().collect()
}

/// Walk `dir` recursively (sorted by file name, so runs are reproducible), parse every
/// `.md` document not prefixed with `_`, and deduplicate the result.
///
/// A file that cannot be read is logged and counted in [IngestReport::files_failed];
/// it never aborts the walk.
pub fn ingest_dir(dir: impl AsRef<Path>) -> Result<IngestReport, CatalogError> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(CatalogError::MissingSource(dir.to_path_buf()));
    }

    let mut report = IngestReport::default();
    let mut parsed = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable bestiary entry: {err}");
                report.files_failed += 1;
                continue;
            }
        };
        let path: PathBuf = entry.into_path();
        if !path.is_file() || !is_source_document(&path) {
            continue;
        }

        match parse_monster_file(&path, dir) {
            Ok(monsters) => {
                debug!("{}: {} monster(s)", path.display(), monsters.len());
                report.files_parsed += 1;
                parsed.extend(monsters);
            }
            Err(err) => {
                warn!("{err}");
                report.files_failed += 1;
            }
        }
    }

    report.entries_found = parsed.len();
    report.monsters = dedupe_monsters(parsed);
    info!(
        "found {} entries in {} file(s); deduplicated to {} monsters",
        report.entries_found,
        report.files_parsed,
        report.monsters.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(name: &str, format: SourceFormat, source: &str) -> Monster {
        Monster {
            name: name.to_string(),
            source_file: Some(source.to_string()),
            format: Some(format),
            ..Monster::default()
        }
    }

    #[test]
    fn normalize_ev_takes_first_digit_run() {
        assert_eq!(normalize_ev("Lvl 3 (12 EV)"), 3);
        assert_eq!(normalize_ev("**EV 24**"), 24);
        assert_eq!(normalize_ev(""), 0);
        assert_eq!(normalize_ev("no value"), 0);
    }

    #[test]
    fn normalize_ev_saturates_oversized_values() {
        assert_eq!(normalize_ev("EV 99999999999"), u32::MAX);
        assert_eq!(normalize_ev("EV 4294967295"), u32::MAX);
        assert_eq!(normalize_ev("EV 0004294967294"), u32::MAX - 1);
    }

    #[test]
    fn fenced_documents_route_to_statblock_parser() {
        let doc = "# Orc\n~~~ds-statblock\nname: Orc\n~~~\n###### Not parsed\n";
        let monsters = parse_document(doc, "orc.md");
        assert_eq!(monsters.len(), 1);
        assert_eq!(monsters[0].format, Some(SourceFormat::Yaml));
    }

    #[test]
    fn yaml_replaces_markdown_in_place() {
        let out = dedupe_monsters(vec![
            monster("Orc", SourceFormat::Markdown, "a.md"),
            monster("Goblin", SourceFormat::Markdown, "b.md"),
            monster("Orc", SourceFormat::Yaml, "c.md"),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "Orc");
        assert_eq!(out[0].source_file.as_deref(), Some("c.md"));
        assert_eq!(out[1].name, "Goblin");
    }

    #[test]
    fn markdown_never_replaces_yaml() {
        let out = dedupe_monsters(vec![
            monster("Orc", SourceFormat::Yaml, "a.md"),
            monster("Orc", SourceFormat::Markdown, "b.md"),
            monster("Orc", SourceFormat::Yaml, "c.md"),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].source_file.as_deref(), Some("a.md"));
    }

    #[test]
    fn underscore_documents_are_skipped() {
        assert!(is_source_document(Path::new("Goblins/Goblin.md")));
        assert!(!is_source_document(Path::new("Goblins/_template.md")));
        assert!(!is_source_document(Path::new("Goblins/Goblin.txt")));
    }

    #[test]
    fn source_paths_use_forward_slashes() {
        let root = Path::new("bestiary");
        let path = root.join("Orcs").join("Orc.md");
        assert_eq!(relative_source(&path, root), "Orcs/Orc.md");
    }
}
