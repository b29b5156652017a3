//! Evolution Engine
//!
//! Pairwise-comparison imitation with inheritance noise. Every node compares
//! itself with one random neighbor using the payoffs of the round that just
//! finished; winners' strategies are staged and only applied once all nodes
//! have been compared, so no node sees another node's update within a step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::AgentId;
use crate::network::Network;
use crate::population::Population;

/// Mutation settings for the update step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionParams {
    /// Chance an imitator perturbs the copied strategy
    pub mutation_rate: f64,
    /// Standard deviation of the Gaussian perturbation
    pub mutation_stddev: f64,
    /// When false, imitators copy verbatim and never mutate
    pub mutate_imitators: bool,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            mutation_rate: 0.1,
            mutation_stddev: 0.05,
            mutate_imitators: true,
        }
    }
}

impl EvolutionParams {
    /// Imitation without any mutation.
    pub fn without_mutation() -> Self {
        Self {
            mutation_rate: 0.0,
            mutation_stddev: 0.0,
            mutate_imitators: false,
        }
    }
}

/// Counts for one evolution step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EvolutionOutcome {
    pub imitations: usize,
    pub mutations: usize,
}

/// Probability that a node with payoff `pi` and degree `ki` copies a
/// neighbor with payoff `pj` and degree `kj`.
///
/// `(pj - pi) / (2 * max(ki, kj))` when the neighbor did strictly better,
/// otherwise 0. Clamped to [0, 1].
pub fn imitation_probability(pi: f64, pj: f64, ki: usize, kj: usize) -> f64 {
    if pj <= pi {
        return 0.0;
    }
    let scale = 2.0 * ki.max(kj) as f64;
    if scale == 0.0 {
        return 0.0;
    }
    ((pj - pi) / scale).clamp(0.0, 1.0)
}

struct StagedUpdate {
    agent: AgentId,
    offer: f64,
    threshold: f64,
}

/// Runs one strategy-update step over every node.
///
/// Isolated nodes are skipped. Only agents that imitated are offered a
/// mutation, and only when `params.mutate_imitators` is set.
pub fn evolve<N, R>(
    network: &N,
    population: &mut Population,
    params: &EvolutionParams,
    rng: &mut R,
) -> EvolutionOutcome
where
    N: Network + ?Sized,
    R: Rng + ?Sized,
{
    let mut staged: Vec<StagedUpdate> = Vec::new();

    for i in network.node_ids() {
        let neighbors = network.neighbors(i);
        if neighbors.is_empty() {
            continue;
        }
        let j = neighbors[rng.gen_range(0..neighbors.len())];

        let (Some(me), Some(other)) = (population.get(i), population.get(j)) else {
            continue;
        };
        let prob = imitation_probability(
            me.payoff(),
            other.payoff(),
            network.degree(i),
            network.degree(j),
        );
        if prob == 0.0 {
            continue;
        }
        if rng.gen::<f64>() < prob {
            let (offer, threshold) = other.strategy();
            staged.push(StagedUpdate {
                agent: i,
                offer,
                threshold,
            });
        }
    }

    let mut outcome = EvolutionOutcome::default();
    for update in staged {
        let Some(agent) = population.get_mut(update.agent) else {
            continue;
        };
        agent.set_strategy(update.offer, update.threshold);
        outcome.imitations += 1;
        if params.mutate_imitators
            && agent.mutate(params.mutation_rate, params.mutation_stddev, rng)
        {
            outcome.mutations += 1;
        }
    }

    outcome
}
