//! Text report for the terminal.

use stashlens_core::DomainResult;
use stashlens_inventory::{CatalogLookup, ContainerMonitor, Notice, SnapshotSource};

/// How many valuable items to list before summarising the rest.
pub const VALUABLE_ITEMS_SHOWN: usize = 5;

pub fn render<C, S>(
    monitor: &ContainerMonitor<C>,
    source: &S,
    notices: &[Notice],
) -> DomainResult<Vec<String>>
where
    C: CatalogLookup,
    S: SnapshotSource + ?Sized,
{
    let engine = monitor.engine();
    let config = monitor.config();
    let mut lines = Vec::new();

    lines.push(format!(
        "=== Stats === | Value: {} gp | Total: {} items | Unique: {} items | Space: {} used",
        engine.formatted_value(),
        engine.total_items(),
        engine.unique_items(),
        monitor.utilization()?,
    ));

    let breakdown = monitor.category_breakdown(source);
    if !breakdown.is_empty() {
        lines.push("=== Category Values ===".to_string());
        for (category, value) in breakdown {
            lines.push(format!("{category}: {} gp", engine.format_value(value)));
        }
    }

    let valuable = monitor.valuable_items(source)?;
    let threshold = engine.format_value(config.valuable_threshold);
    if valuable.is_empty() {
        lines.push(format!("No items found above {threshold} gp threshold."));
    } else {
        lines.push(format!("=== Valuable Items (>= {threshold} gp) ==="));
        for &(id, value) in valuable.top(VALUABLE_ITEMS_SHOWN) {
            lines.push(format!(
                "{}: {} gp",
                engine.catalog().name_of(id),
                engine.format_value(value)
            ));
        }
        if valuable.len() > VALUABLE_ITEMS_SHOWN {
            lines.push(format!(
                "... and {} more valuable items",
                valuable.len() - VALUABLE_ITEMS_SHOWN
            ));
        }
    }

    lines.extend(notices.iter().map(|n| n.message(engine.grouping())));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stashlens_inventory::{EngineConfig, InventoryEngine, Snapshot, StaticCatalog};

    fn catalog() -> StaticCatalog {
        (1..=7u32).fold(StaticCatalog::new(), |c, i| {
            c.with_item(i, format!("Treasure {i}"), i64::from(i) * 100_000)
        })
    }

    #[test]
    fn truncates_valuable_items_after_five() {
        let mut monitor =
            ContainerMonitor::new(InventoryEngine::new(catalog()), EngineConfig::default()).unwrap();
        let source = Some(Snapshot::from_pairs((1..=7).map(|id| (id, 1))));
        let notices = monitor.container_opened(&source).unwrap();

        let lines = render(&monitor, &source, &notices).unwrap();

        assert_eq!(
            lines[0],
            "=== Stats === | Value: 2,800,000 gp | Total: 7 items | Unique: 7 items | Space: 0.9% used"
        );
        assert!(lines.contains(&"Miscellaneous: 2,800,000 gp".to_string()));
        assert!(lines.contains(&"Treasure 7: 700,000 gp".to_string()));
        assert!(!lines.contains(&"Treasure 2: 200,000 gp".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("... and 2 more valuable items"));
    }

    #[test]
    fn reports_when_nothing_is_valuable() {
        let mut monitor =
            ContainerMonitor::new(InventoryEngine::new(StaticCatalog::new()), EngineConfig::default())
                .unwrap();
        let source: Option<Snapshot> = None;
        monitor.container_opened(&source).unwrap();

        let lines = render(&monitor, &source, &[]).unwrap();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "No items found above 100,000 gp threshold.");
    }
}
