//! Observation-window bookkeeping on top of the engine.
//!
//! A host opens the container, feeds changes while it is open and closes it.
//! The monitor turns each recompute into the notices the host should show,
//! raising the capacity warning at most once per opening.

use core::fmt;

use serde::Serialize;

use stashlens_core::DomainResult;

use crate::catalog::{CatalogLookup, SnapshotSource};
use crate::config::EngineConfig;
use crate::detection::{Utilization, ValueChange};
use crate::engine::{InventoryEngine, ValuableItems};
use crate::format::Grouping;
use crate::summary::Summary;

/// Something the host should surface to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    ValueChanged { change: ValueChange },
    CapacityWarning { utilization: Utilization },
}

impl Notice {
    /// Player-facing text with amounts grouped per `grouping`.
    pub fn message(&self, grouping: Grouping) -> String {
        match self {
            Notice::ValueChanged { change } => format!(
                "Bank value {} by {} gp!",
                change.direction,
                grouping.format(change.magnitude)
            ),
            Notice::CapacityWarning { utilization } => {
                format!("Warning: Bank is {utilization} full! Consider organizing items.")
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message(Grouping::default()))
    }
}

/// Engine plus the open/closed state of the observed container.
#[derive(Debug)]
pub struct ContainerMonitor<C> {
    engine: InventoryEngine<C>,
    config: EngineConfig,
    open: bool,
}

impl<C> ContainerMonitor<C>
where
    C: CatalogLookup,
{
    /// Fails if `config` is out of range.
    pub fn new(engine: InventoryEngine<C>, config: EngineConfig) -> DomainResult<Self> {
        config.validate()?;
        Ok(Self {
            engine,
            config,
            open: false,
        })
    }

    pub fn engine(&self) -> &InventoryEngine<C> {
        &self.engine
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// New observation window: clear the warning flag, then recompute.
    pub fn container_opened<S>(&mut self, source: &S) -> DomainResult<Vec<Notice>>
    where
        S: SnapshotSource + ?Sized,
    {
        self.open = true;
        self.engine.reset_warning_flag();
        self.refresh(source)
    }

    /// Recompute while open; changes seen while closed are ignored.
    pub fn container_changed<S>(&mut self, source: &S) -> DomainResult<Vec<Notice>>
    where
        S: SnapshotSource + ?Sized,
    {
        if !self.open {
            return Ok(Vec::new());
        }
        self.refresh(source)
    }

    pub fn container_closed(&mut self) {
        self.open = false;
    }

    fn refresh<S>(&mut self, source: &S) -> DomainResult<Vec<Notice>>
    where
        S: SnapshotSource + ?Sized,
    {
        self.engine.refresh(source);
        let mut notices = Vec::new();

        if self.config.show_value_changes {
            if let Some(change) = self
                .engine
                .detect_value_change(self.config.value_change_threshold)?
            {
                notices.push(Notice::ValueChanged { change });
            }
        }

        if self.config.notify_capacity
            && !self.engine.warning_issued()
            && self
                .engine
                .detect_capacity_warning(self.config.capacity, self.config.capacity_warning_percent)?
        {
            let utilization = self.engine.space_utilization(self.config.capacity)?;
            self.engine.mark_warning_issued();
            notices.push(Notice::CapacityWarning { utilization });
        }

        for notice in &notices {
            tracing::info!(%notice, "inventory notice");
        }
        Ok(notices)
    }

    pub fn summary(&self) -> Summary {
        self.engine.summary()
    }

    pub fn utilization(&self) -> DomainResult<Utilization> {
        self.engine.space_utilization(self.config.capacity)
    }

    /// Valuable items in the container right now, per the configured threshold.
    pub fn valuable_items<S>(&self, source: &S) -> DomainResult<ValuableItems>
    where
        S: SnapshotSource + ?Sized,
    {
        match source.current_snapshot() {
            Some(snapshot) => self
                .engine
                .find_valuable(&snapshot, self.config.valuable_threshold),
            None => Ok(ValuableItems::default()),
        }
    }

    /// Non-zero category totals in table order (Miscellaneous last).
    pub fn category_breakdown<S>(&self, source: &S) -> Vec<(String, i64)>
    where
        S: SnapshotSource + ?Sized,
    {
        let Some(snapshot) = source.current_snapshot() else {
            return Vec::new();
        };
        self.engine
            .category_breakdown(&snapshot)
            .into_iter()
            .filter(|(_, value)| *value > 0)
            .collect()
    }
}
