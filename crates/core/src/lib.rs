//! Domain foundation for stashlens: errors and identifiers.
//!
//! This crate contains **pure domain** primitives (no host or IO concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::ItemId;
