//! Output Generation
//!
//! End-of-run statistics and the JSON files written by the runner.

pub mod stats;
pub mod writer;

pub use stats::*;
pub use writer::*;
