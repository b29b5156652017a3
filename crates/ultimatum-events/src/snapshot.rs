//! Snapshot Types
//!
//! Serialization structs for per-agent population snapshots.
//!
//! A snapshot captures every agent's strategy at a chosen generation, used for
//! histograms, scatter plots and debugging outside the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// Serialized name of an agent's behavioral kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindLabel {
    Empathetic,
    Pragmatic,
    Independent,
}

impl fmt::Display for KindLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KindLabel::Empathetic => "empathetic",
            KindLabel::Pragmatic => "pragmatic",
            KindLabel::Independent => "independent",
        };
        f.write_str(name)
    }
}

/// One agent's state at the snapshot generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: usize,
    pub kind: KindLabel,
    pub offer: f64,
    pub threshold: f64,
    #[serde(default)]
    pub payoff: f64,
    #[serde(default)]
    pub degree: usize,
}

/// Complete population snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub snapshot_id: String,
    pub generation: u64,
    pub triggered_by: String,
    pub agents: Vec<AgentSnapshot>,
}

impl PopulationSnapshot {
    /// Creates an empty snapshot.
    pub fn new(
        snapshot_id: impl Into<String>,
        generation: u64,
        triggered_by: impl Into<String>,
    ) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            generation,
            triggered_by: triggered_by.into(),
            agents: Vec::new(),
        }
    }

    /// Finds an agent by ID.
    pub fn find_agent(&self, agent_id: usize) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Returns agents of the given kind.
    pub fn agents_of_kind(&self, kind: KindLabel) -> Vec<&AgentSnapshot> {
        self.agents.iter().filter(|a| a.kind == kind).collect()
    }

    /// Arithmetic mean of all offers, 0.0 for an empty snapshot.
    pub fn mean_offer(&self) -> f64 {
        mean(self.agents.iter().map(|a| a.offer), self.agents.len())
    }

    /// Arithmetic mean of all thresholds, 0.0 for an empty snapshot.
    pub fn mean_threshold(&self) -> f64 {
        mean(self.agents.iter().map(|a| a.threshold), self.agents.len())
    }

    /// Offers in agent order, ready for plotting.
    pub fn offers(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.offer).collect()
    }

    /// Thresholds in agent order, ready for plotting.
    pub fn thresholds(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.threshold).collect()
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}
