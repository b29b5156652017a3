//! Round Engine
//!
//! One round of Ultimatum Games over every directed neighbor pair.

use serde::Serialize;

use crate::network::Network;
use crate::population::Population;

/// Trial counts for one round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    /// Directed proposer/responder trials played
    pub offers: usize,
    /// Trials where the offer met the responder's threshold
    pub accepted: usize,
}

impl RoundOutcome {
    pub fn acceptance_rate(&self) -> f64 {
        if self.offers == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.offers as f64
    }
}

/// Resets all payoffs, then lets every agent propose to each neighbor.
///
/// Each undirected edge {i, j} is played twice, i proposing to j and j
/// proposing to i, with independent outcomes. An accepted offer `p` pays the
/// proposer `1 - p` and the responder `p`; a rejection pays nothing.
/// Deterministic for fixed strategies.
pub fn run_round<N: Network + ?Sized>(network: &N, population: &mut Population) -> RoundOutcome {
    population.reset_payoffs();

    let mut outcome = RoundOutcome::default();
    let agents = population.agents_mut();

    for proposer in network.node_ids() {
        let Some(offer) = agents.get(proposer.0).map(|a| a.offer()) else {
            continue;
        };
        for &responder in network.neighbors(proposer) {
            let Some(threshold) = agents.get(responder.0).map(|a| a.threshold()) else {
                continue;
            };
            outcome.offers += 1;
            if offer >= threshold {
                outcome.accepted += 1;
                agents[proposer.0].credit(1.0 - offer);
                agents[responder.0].credit(offer);
            }
        }
    }

    tracing::trace!(
        offers = outcome.offers,
        accepted = outcome.accepted,
        "round complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, AgentId, Kind};
    use crate::network::Graph;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pair(a: (Kind, f64, f64), b: (Kind, f64, f64)) -> (Graph, Population) {
        let graph = Graph::from_edges(2, [(0, 1)]).unwrap();
        let population = Population::from_agents(vec![
            Agent::with_strategy(AgentId(0), a.0, a.1, a.2),
            Agent::with_strategy(AgentId(1), b.0, b.1, b.2),
        ])
        .unwrap();
        (graph, population)
    }

    fn payoff(population: &Population, id: usize) -> f64 {
        population.get(AgentId(id)).unwrap().payoff()
    }

    #[test]
    fn test_fair_split_pays_both_directions() {
        let (graph, mut population) = pair(
            (Kind::Empathetic, 0.5, 0.5),
            (Kind::Pragmatic, 0.5, 0.5),
        );

        let outcome = run_round(&graph, &mut population);

        assert_eq!(outcome, RoundOutcome { offers: 2, accepted: 2 });
        assert_eq!(payoff(&population, 0), 1.0);
        assert_eq!(payoff(&population, 1), 1.0);
    }

    #[test]
    fn test_asymmetric_strategies_pay_both_directions() {
        // 0 -> 1: 0.9 >= 0.9, proposer 0 keeps 0.1, responder 1 gets 0.9.
        // 1 -> 0: 0.1 >= 0.1, proposer 1 keeps 0.9, responder 0 gets 0.1.
        let (graph, mut population) = pair(
            (Kind::Independent, 0.9, 0.1),
            (Kind::Independent, 0.1, 0.9),
        );

        let outcome = run_round(&graph, &mut population);

        assert_eq!(outcome.accepted, 2);
        assert!((payoff(&population, 0) - 0.2).abs() < 1e-12);
        assert!((payoff(&population, 1) - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_directions_are_independent() {
        // 0 offers 0.6 to a responder wanting 0.5 (accepted);
        // 1 offers 0.2 to a responder wanting 0.7 (rejected).
        let (graph, mut population) = pair(
            (Kind::Independent, 0.6, 0.7),
            (Kind::Independent, 0.2, 0.5),
        );

        let outcome = run_round(&graph, &mut population);

        assert_eq!(outcome.accepted, 1);
        assert!((payoff(&population, 0) - 0.4).abs() < 1e-12);
        assert!((payoff(&population, 1) - 0.6).abs() < 1e-12);
        assert_eq!(outcome.acceptance_rate(), 0.5);
    }

    #[test]
    fn test_rejection_pays_nothing() {
        let (graph, mut population) = pair(
            (Kind::Independent, 0.1, 0.9),
            (Kind::Independent, 0.1, 0.9),
        );

        let outcome = run_round(&graph, &mut population);

        assert_eq!(outcome.accepted, 0);
        assert_eq!(payoff(&population, 0), 0.0);
        assert_eq!(payoff(&population, 1), 0.0);
    }

    #[test]
    fn test_round_resets_previous_payoffs() {
        let (graph, mut population) = pair(
            (Kind::Empathetic, 0.5, 0.5),
            (Kind::Empathetic, 0.5, 0.5),
        );

        run_round(&graph, &mut population);
        run_round(&graph, &mut population);

        assert_eq!(payoff(&population, 0), 1.0);
    }

    #[test]
    fn test_isolated_node_earns_nothing() {
        let graph = Graph::from_edges(3, [(0, 1)]).unwrap();
        let mut population = Population::from_agents(vec![
            Agent::with_strategy(AgentId(0), Kind::Independent, 0.5, 0.0),
            Agent::with_strategy(AgentId(1), Kind::Independent, 0.5, 0.0),
            Agent::with_strategy(AgentId(2), Kind::Independent, 1.0, 0.0),
        ])
        .unwrap();

        run_round(&graph, &mut population);

        assert_eq!(payoff(&population, 2), 0.0);
    }

    #[test]
    fn test_round_is_deterministic() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let graph = Graph::barabasi_albert(60, 3, &mut rng).unwrap();
        let mut population =
            Population::initialize(&graph, crate::population::KindMix::Mixed, &mut rng);

        run_round(&graph, &mut population);
        let first: Vec<f64> = population.iter().map(Agent::payoff).collect();
        run_round(&graph, &mut population);
        let second: Vec<f64> = population.iter().map(Agent::payoff).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_payoff_bounded_by_twice_degree() {
        let mut rng = SmallRng::seed_from_u64(5);
        let graph = Graph::barabasi_albert(80, 2, &mut rng).unwrap();
        let mut population =
            Population::initialize(&graph, crate::population::KindMix::Mixed, &mut rng);

        let outcome = run_round(&graph, &mut population);

        assert_eq!(outcome.offers, 2 * graph.edge_count());
        for agent in population.iter() {
            let degree = graph.degree(agent.id()) as f64;
            assert!(agent.payoff() >= 0.0);
            assert!(agent.payoff() <= 2.0 * degree + 1e-9);
        }
    }
}
