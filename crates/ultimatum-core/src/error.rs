//! Simulation errors.

use thiserror::Error;

/// Errors raised while setting up or driving a simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Kind name outside {empathetic, pragmatic, independent}
    #[error("invalid kind '{0}': use empathetic, pragmatic or independent (or A, B, C)")]
    InvalidKind(String),
    /// Parameter combination the driver cannot run with
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Network provider parameters out of range
    #[error("invalid network: {0}")]
    InvalidNetwork(String),
    /// Population does not cover exactly the network's node set
    #[error("population has {actual} agents but the network has {expected} nodes")]
    PopulationMismatch { expected: usize, actual: usize },
}

pub type SimResult<T> = Result<T, SimError>;
