//! Shared reporting types for the ultimatum network simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! The engine produces these values and external collaborators (plotters,
//! printers, file writers) consume them.

pub mod history;
pub mod snapshot;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export history types
pub use history::{History, HistorySample};

// Re-export snapshot types
pub use snapshot::{generate_snapshot_id, AgentSnapshot, KindLabel, PopulationSnapshot};
