//! Ultimatum Game strategy evolution on a fixed social network.
//!
//! Public API for the simulation engine: agents and their kinds, the
//! population arena, the network seam, the round and evolution engines, and
//! the generation driver. Configuration and file output live alongside for
//! the command-line runner.

use rand::rngs::SmallRng;
use rand::SeedableRng;

pub mod agent;
pub mod config;
pub mod driver;
pub mod error;
pub mod evolution;
pub mod network;
pub mod output;
pub mod population;
pub mod round;

pub use agent::{Agent, AgentId, Kind};
pub use config::{Config, ConfigError};
pub use driver::{run, GenerationReport, Simulation, SimulationParams};
pub use error::{SimError, SimResult};
pub use evolution::{evolve, imitation_probability, EvolutionOutcome, EvolutionParams};
pub use network::{Graph, Network};
pub use population::{KindMix, Population};
pub use round::{run_round, RoundOutcome};

pub use ultimatum_events::{History, HistorySample, PopulationSnapshot};

/// Seeded random number generator used for every stochastic step
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
