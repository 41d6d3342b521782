//! Tracing and logging setup shared by the host binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::{LogFormat, init, init_with};
