//! Change and capacity signals computed from engine state.

use core::fmt;

use serde::Serialize;

use stashlens_core::{DomainError, DomainResult};

/// Which way the total value moved between two recomputes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increased,
    Decreased,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Increased => f.write_str("increased"),
            Direction::Decreased => f.write_str("decreased"),
        }
    }
}

/// A significant change in total value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct ValueChange {
    pub direction: Direction,
    pub magnitude: i64,
}

impl ValueChange {
    /// `None` when the absolute difference is below `threshold`.
    pub(crate) fn between(previous: i64, current: i64, threshold: i64) -> Option<Self> {
        let magnitude = current.abs_diff(previous);
        if magnitude < threshold.unsigned_abs() {
            return None;
        }
        let direction = if current > previous {
            Direction::Increased
        } else {
            Direction::Decreased
        };
        Some(Self {
            direction,
            magnitude: i64::try_from(magnitude).unwrap_or(i64::MAX),
        })
    }
}

pub(crate) fn ensure_positive_threshold(name: &str, value: i64) -> DomainResult<()> {
    if value <= 0 {
        return Err(DomainError::invalid_parameter(format!(
            "{name} must be positive (got {value})"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative_threshold(name: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::invalid_parameter(format!(
            "{name} cannot be negative (got {value})"
        )));
    }
    Ok(())
}

/// Share of container slots occupied by distinct items.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct Utilization {
    used: i64,
    capacity: i64,
}

impl Utilization {
    /// Fails for a non-positive capacity.
    pub fn new(used: i64, capacity: i64) -> DomainResult<Self> {
        if capacity <= 0 {
            return Err(DomainError::invalid_parameter(format!(
                "capacity must be positive (got {capacity})"
            )));
        }
        if used < 0 {
            return Err(DomainError::invalid_parameter(format!(
                "used slots cannot be negative (got {used})"
            )));
        }
        Ok(Self { used, capacity })
    }

    pub fn used(&self) -> i64 {
        self.used
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Percentage for display; threshold checks use [`Utilization::reaches`].
    pub fn percent(&self) -> f64 {
        self.used as f64 / self.capacity as f64 * 100.0
    }

    /// Exact `used / capacity * 100 >= percent`, without float rounding.
    pub fn reaches(&self, percent: u8) -> bool {
        i128::from(self.used) * 100 >= i128::from(percent) * i128::from(self.capacity)
    }

    /// Tenths of a percent, rounded half up (`750/816` is `919`).
    pub fn per_mille(&self) -> i64 {
        let scaled = i128::from(self.used) * 1000;
        let capacity = i128::from(self.capacity);
        i64::try_from((scaled * 2 + capacity) / (capacity * 2)).unwrap_or(i64::MAX)
    }
}

pub(crate) fn ensure_percent(percent: u8) -> DomainResult<()> {
    if percent == 0 || percent > 100 {
        return Err(DomainError::invalid_parameter(format!(
            "threshold percent must be within 1..=100 (got {percent})"
        )));
    }
    Ok(())
}

impl fmt::Display for Utilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tenths = self.per_mille();
        write!(f, "{}.{}%", tenths / 10, tenths % 10)
    }
}
