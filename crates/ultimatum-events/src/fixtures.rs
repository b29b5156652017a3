//! Sample data fixtures for testing.
//!
//! This module provides ready-made reporting data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // ultimatum-events = { path = "../ultimatum-events", features = ["test-fixtures"] }
//!
//! use ultimatum_events::fixtures;
//!
//! let history = fixtures::sample_history();
//! let snapshot = fixtures::sample_snapshot();
//! ```

use crate::{AgentSnapshot, History, HistorySample, KindLabel, PopulationSnapshot};

/// Returns a short history sampled every 10 generations.
///
/// Offers drift down from 0.5 while thresholds drift down faster, the shape
/// long runs usually show.
pub fn sample_history() -> History {
    let mut history = History::new();
    history.push(HistorySample::new(0, 0.50, 0.50));
    history.push(HistorySample::new(10, 0.48, 0.44));
    history.push(HistorySample::new(20, 0.45, 0.39));
    history.push(HistorySample::new(30, 0.43, 0.35));
    history
}

/// Returns a six-agent snapshot, two agents of each kind.
///
/// Every agent respects its kind's coupling between offer and threshold.
pub fn sample_snapshot() -> PopulationSnapshot {
    let mut snapshot = PopulationSnapshot::new("snap_000001", 30, "fixture");
    let agents = [
        (0, KindLabel::Empathetic, 0.4, 0.4, 2),
        (1, KindLabel::Empathetic, 0.6, 0.6, 3),
        (2, KindLabel::Pragmatic, 0.3, 0.7, 1),
        (3, KindLabel::Pragmatic, 0.5, 0.5, 2),
        (4, KindLabel::Independent, 0.2, 0.1, 4),
        (5, KindLabel::Independent, 0.9, 0.3, 2),
    ];
    for (agent_id, kind, offer, threshold, degree) in agents {
        snapshot.agents.push(AgentSnapshot {
            agent_id,
            kind,
            offer,
            threshold,
            payoff: 0.0,
            degree,
        });
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_history_is_ordered() {
        let history = sample_history();
        let generations: Vec<u64> = history.iter().map(|s| s.generation).collect();
        let mut sorted = generations.clone();
        sorted.sort_unstable();
        assert_eq!(generations, sorted);
    }

    #[test]
    fn test_sample_snapshot_respects_kinds() {
        let snapshot = sample_snapshot();
        assert_eq!(snapshot.agents.len(), 6);

        for agent in &snapshot.agents {
            match agent.kind {
                KindLabel::Empathetic => assert_eq!(agent.offer, agent.threshold),
                KindLabel::Pragmatic => {
                    assert!((agent.offer - (1.0 - agent.threshold)).abs() < 1e-12)
                }
                KindLabel::Independent => {}
            }
        }
    }
}
