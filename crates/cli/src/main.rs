//! `stashlens`: print an inventory report for a container snapshot.
//!
//! ```text
//! stashlens <catalog.json> <snapshot.json> [<next-snapshot.json>]
//! ```
//!
//! Thresholds come from `STASHLENS_*` environment variables. Set
//! `STASHLENS_CATEGORY_TABLE` to a JSON file to replace the built-in
//! category table.

mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use stashlens_inventory::{
    CategoryTable, Classifier, ContainerMonitor, EngineConfig, InventoryEngine, Snapshot,
    StaticCatalog, classifier::standard_rules,
};

const CATEGORY_TABLE_ENV: &str = "STASHLENS_CATEGORY_TABLE";

#[derive(Debug, Parser)]
#[command(
    name = "stashlens",
    about = "Inventory report for a container snapshot",
    after_help = "Thresholds come from STASHLENS_* environment variables."
)]
struct Args {
    /// Item catalog (JSON array of `{ "id", "name", "price" }`).
    catalog: PathBuf,
    /// Snapshot observed when the container is opened.
    snapshot: PathBuf,
    /// Optional follow-up snapshot, fed as a change while open.
    next: Option<PathBuf>,
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    serde_json::from_str(&read(path)?).with_context(|| format!("parsing {}", path.display()))
}

fn load_classifier() -> anyhow::Result<Classifier> {
    let Ok(path) = std::env::var(CATEGORY_TABLE_ENV) else {
        return Ok(Classifier::standard());
    };
    let table = CategoryTable::from_json(&read(Path::new(&path))?)?;
    tracing::info!(path = %path, categories = table.len(), "loaded category table");
    Ok(Classifier::new(table, standard_rules())?)
}

fn main() -> anyhow::Result<()> {
    stashlens_observability::init();

    let args = Args::parse();
    let config = EngineConfig::from_env().context("loading configuration")?;
    let catalog = StaticCatalog::from_json(&read(&args.catalog)?)
        .with_context(|| format!("parsing {}", args.catalog.display()))?;
    tracing::info!(items = catalog.len(), "catalog loaded");

    let engine = InventoryEngine::with_classifier(catalog, load_classifier()?);
    let mut monitor = ContainerMonitor::new(engine, config)?;

    let mut source = Some(load_snapshot(&args.snapshot)?);
    let mut notices = monitor.container_opened(&source)?;

    if let Some(next) = &args.next {
        source = Some(load_snapshot(next)?);
        notices.extend(monitor.container_changed(&source)?);
    }

    let lines = report::render(&monitor, &source, &notices)?;
    for line in lines {
        println!("{line}");
    }

    monitor.container_closed();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_positional_paths() {
        let args = Args::try_parse_from(["stashlens", "catalog.json", "bank.json"]).unwrap();
        assert_eq!(args.catalog, PathBuf::from("catalog.json"));
        assert_eq!(args.snapshot, PathBuf::from("bank.json"));
        assert_eq!(args.next, None);

        let args =
            Args::try_parse_from(["stashlens", "catalog.json", "bank.json", "later.json"]).unwrap();
        assert_eq!(args.next, Some(PathBuf::from("later.json")));
    }

    #[test]
    fn rejects_missing_and_extra_arguments() {
        assert!(Args::try_parse_from(["stashlens", "catalog.json"]).is_err());
        assert!(Args::try_parse_from(["stashlens", "a.json", "b.json", "c.json", "d.json"]).is_err());
    }
}
