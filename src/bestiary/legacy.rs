//! Legacy statblock format: `######` headed sections with pipe tables for the
//! header/stat lines and blockquote callouts for abilities.
//!
//! ```text
//! ###### Goblin Warrior
//! |  Goblin, Humanoid |       -       | Level 1 | Minion Harrier | EV 3 for four minions |
//! |:-----------------:|:-------------:|:-------:|:--------------:|:---------------------:|
//! | **1S**<br/> Size  | **6**<br/> Speed | **4**<br/> Stamina | **0**<br/> Stability | **1**<br/> Free Strike |
//! ...
//! > 🗡 **Spear Charge (Signature Ability)**
//! > | **Charge, Melee, Strike, Weapon** | **Main action** |
//! > |-----------------------------------|----------------:|
//! > | **📏 Melee 1**                      | **🎯 One creature per minion** |
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::bestiary::ingest::normalize_ev;
use crate::bestiary::model::{Ability, Monster, MonsterStats, SourceFormat};

const SECTION_MARKER: &str = "###### ";
const MIN_TABLE_ROWS: usize = 4;
const DISTANCE_GLYPH: &str = "📏";
const TARGET_GLYPH: &str = "🎯";
const DISTANCE_TOKENS: &[&str] = &["Melee", "Ranged", "Burst"];

/// Blockquote line opening a new ability: optional category glyph, then
/// `**Name (Type)**` with the type suffix optional. Bold runs ending in `:`
/// (`**Effect:**`, `**Power Roll + 2:**`) are inline labels, see [is_inline_label].
static ABILITY_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^>\s*(🗡️?|🏹|⚔️?|👤|🔳|❇️?|🌀|❗️?|☠️?|⭐️?)?\s*\*\*([^(]+?)\s*(?:\(([^)]+)\))?\*\*",
    )
    .expect("Invalid ability header regex")
});

/// Line-by-line ability extraction state for one legacy section.
///
/// Feed every line of the section in order, then call [AbilityScanner::finish].
/// Header lines flush the open ability; nested table rows fill keywords,
/// distance, and target; remaining callout text accumulates into the description.
#[derive(Debug, Default)]
pub struct AbilityScanner {
    current: Option<Ability>,
    in_table: bool,
    abilities: Vec<Ability>,
}

impl AbilityScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ability currently being accumulated, if a header has been seen.
    pub fn current(&self) -> Option<&Ability> {
        self.current.as_ref()
    }

    /// True while the previous callout line was a nested table row.
    pub fn in_table(&self) -> bool {
        self.in_table
    }

    pub fn feed(&mut self, line: &str) {
        let line = line.trim_end();

        let header = ABILITY_HEADER
            .captures(line)
            .filter(|caps| !is_inline_label(&caps[2]));
        if let Some(caps) = header {
            self.flush();
            self.current = Some(Ability {
                icon: caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default(),
                name: caps[2].trim().to_string(),
                ability_type: caps
                    .get(3)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default(),
                ..Ability::default()
            });
            self.in_table = false;
            return;
        }

        let Some(ability) = self.current.as_mut() else {
            return;
        };
        let Some(content) = line.trim().strip_prefix('>') else {
            return;
        };
        let content = content.trim();

        if content.starts_with('|') {
            self.in_table = true;
            if content.contains("---") {
                return;
            }
            apply_table_row(ability, &split_cells(content));
        } else if self.in_table {
            // The first callout line after a nested table closes the table group.
            self.in_table = false;
        } else if !content.is_empty() {
            if !ability.description.is_empty() {
                ability.description.push('\n');
            }
            ability.description.push_str(content);
        }
    }

    pub fn finish(mut self) -> Vec<Ability> {
        self.flush();
        self.abilities
    }

    fn flush(&mut self) {
        if let Some(ability) = self.current.take() {
            self.abilities.push(ability);
        }
    }
}

fn apply_table_row(ability: &mut Ability, cells: &[&str]) {
    let Some(first) = cells.first() else {
        return;
    };

    if is_distance_cell(first) {
        ability.distance = first.replace(DISTANCE_GLYPH, "").trim().to_string();
        if let Some(second) = cells.get(1) {
            ability.target = second.replace(TARGET_GLYPH, "").trim().to_string();
        }
    } else if ability.keywords.is_empty() {
        ability.keywords = first
            .split(',')
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_string)
            .collect();
    }
}

fn is_inline_label(bold_text: &str) -> bool {
    bold_text.trim_end().ends_with(':')
}

fn is_distance_cell(cell: &str) -> bool {
    cell.contains(DISTANCE_GLYPH) || DISTANCE_TOKENS.iter().any(|token| cell.contains(token))
}

/// Split a pipe table row into trimmed, non-empty cells.
fn split_cells(row: &str) -> Vec<&str> {
    row.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Stat cells look like `**6**<br/> Speed`: keep the value only.
fn clean_stat_cell(cell: Option<&str>) -> String {
    let Some(cell) = cell else {
        return String::new();
    };
    let value = cell.split("<br").next().unwrap_or_default();
    value.replace("**", "").trim().to_string()
}

fn split_sections(content: &str) -> Vec<Vec<&str>> {
    let mut sections = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in content.lines() {
        if let Some(rest) = line.strip_prefix(SECTION_MARKER) {
            if let Some(section) = current.take() {
                sections.push(section);
            }
            current = Some(vec![rest]);
        } else if let Some(section) = current.as_mut() {
            section.push(line);
        }
    }
    if let Some(section) = current {
        sections.push(section);
    }

    sections
}

fn parse_section(lines: &[&str], source_file: &str) -> Option<Monster> {
    let name = lines.first()?.trim().to_string();

    let table_rows: Vec<&str> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| line.starts_with('|'))
        .collect();
    if table_rows.len() < MIN_TABLE_ROWS {
        warn!(
            "skipping section '{name}' in {source_file}: {} table rows, need {MIN_TABLE_ROWS}",
            table_rows.len()
        );
        return None;
    }

    let header = split_cells(table_rows[0]);
    let cell = |index: usize| header.get(index).copied().unwrap_or_default();
    let stat_row = split_cells(table_rows[2]);

    let mut scanner = AbilityScanner::new();
    for line in lines {
        scanner.feed(line);
    }

    Some(Monster {
        name,
        monster_type: cell(0).to_string(),
        level: cell(2).replacen("Level ", "", 1),
        role: cell(3).to_string(),
        ev: normalize_ev(cell(4)),
        stats: MonsterStats {
            size: clean_stat_cell(stat_row.first().copied()),
            speed: clean_stat_cell(stat_row.get(1).copied()),
            stamina: clean_stat_cell(stat_row.get(2).copied()),
            stability: clean_stat_cell(stat_row.get(3).copied()),
            free_strike: clean_stat_cell(stat_row.get(4).copied()),
        },
        abilities: scanner.finish(),
        source_file: Some(source_file.to_string()),
        format: Some(SourceFormat::Markdown),
    })
}

/// Parse every `######` section of a legacy document. Incomplete sections are skipped.
pub fn parse_legacy_document(content: &str, source_file: &str) -> Vec<Monster> {
    split_sections(content)
        .iter()
        .filter_map(|section| parse_section(section, source_file))
        .collect()
}
