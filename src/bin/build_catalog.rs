//! Build step: parse the bestiary into the catalog JSON.
//! Run: cargo run --bin build_catalog [bestiary_dir] [output]

use std::path::PathBuf;

use steelforge::bestiary::{ingest_dir, write_catalog, DEFAULT_BESTIARY_DIR, DEFAULT_CATALOG_PATH};

/// Resolve path relative to repo root (CARGO_MANIFEST_DIR when run via cargo).
fn repo_path(suffix: &str) -> PathBuf {
    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join(suffix);
    }
    PathBuf::from(suffix)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    steelforge::config::init_tracing();

    let mut args = std::env::args().skip(1);
    let source = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_path(DEFAULT_BESTIARY_DIR));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| repo_path(DEFAULT_CATALOG_PATH));

    println!("Parsing monsters from {}", source.display());
    let report = ingest_dir(&source)?;
    println!(
        "Found {} entries. Deduplicated to {} monsters.",
        report.entries_found,
        report.monsters.len()
    );

    write_catalog(&output, &report.monsters)?;
    println!("Saved to {}", output.display());
    Ok(())
}
