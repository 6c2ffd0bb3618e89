//! Validate the catalog JSON: duplicate or empty names, malformed abilities.
//! Run: cargo run --bin validate_catalog [catalog]

use std::path::PathBuf;

use steelforge::bestiary::DEFAULT_CATALOG_PATH;
use steelforge::validate::{validate_catalog_file, ValidationSeverity};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    steelforge::config::init_tracing();

    let path = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join(DEFAULT_CATALOG_PATH)
    });

    if !path.exists() {
        eprintln!("Catalog not found: {}", path.display());
        eprintln!("Build it first: cargo run --bin build_catalog");
        std::process::exit(1);
    }

    let report = validate_catalog_file(&path)?;
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }

    println!(
        "Validated {}: {} error(s), {} warning(s), {} note(s)",
        path.display(),
        report.count(ValidationSeverity::Error),
        report.count(ValidationSeverity::Warning),
        report.count(ValidationSeverity::Info)
    );
    if report.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}
