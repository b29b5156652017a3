//! Determinism verification tests
//!
//! Tests to ensure the simulation produces identical results given the same seed.

use ultimatum_core::{
    seeded_rng, EvolutionParams, Graph, History, KindMix, Population, Simulation, SimulationParams,
};

fn full_run(seed: u64, generations: u64) -> (Graph, Population, History) {
    let mut rng = seeded_rng(seed);
    let graph = Graph::barabasi_albert(60, 3, &mut rng).unwrap();
    let population = Population::initialize(&graph, KindMix::Mixed, &mut rng);
    let params = SimulationParams {
        generations,
        evolve_every: 1,
        sample_every: 5,
        evolution: EvolutionParams::default(),
    };

    let mut simulation = Simulation::new(graph, population, params).unwrap();
    simulation.run(&mut rng);
    simulation.into_parts()
}

/// Same seed, same network
#[test]
fn test_network_determinism() {
    let graph1 = Graph::barabasi_albert(200, 4, &mut seeded_rng(42)).unwrap();
    let graph2 = Graph::barabasi_albert(200, 4, &mut seeded_rng(42)).unwrap();

    assert_eq!(graph1, graph2, "Networks should be identical with same seed");
}

/// Same seed, same initial strategies
#[test]
fn test_population_initialization_determinism() {
    let graph = Graph::barabasi_albert(50, 2, &mut seeded_rng(1)).unwrap();

    let population1 = Population::initialize(&graph, KindMix::Mixed, &mut seeded_rng(7));
    let population2 = Population::initialize(&graph, KindMix::Mixed, &mut seeded_rng(7));

    assert_eq!(population1, population2);
}

/// Same seed, identical history and final population
#[test]
fn test_full_run_determinism() {
    let (graph1, population1, history1) = full_run(12345, 200);
    let (graph2, population2, history2) = full_run(12345, 200);

    assert_eq!(graph1, graph2);
    assert_eq!(history1, history2, "History should be identical with same seed");
    assert_eq!(population1, population2, "Final population should be identical with same seed");
}

/// Different seeds diverge
#[test]
fn test_different_seeds_diverge() {
    let (_, population1, history1) = full_run(42, 100);
    let (_, population2, history2) = full_run(43, 100);

    assert_ne!(population1, population2);
    assert_ne!(history1, history2);
}

/// Stepping one generation at a time matches a single run call
#[test]
fn test_stepwise_run_matches_full_run() {
    let (_, expected_population, expected_history) = full_run(99, 60);

    let mut rng = seeded_rng(99);
    let graph = Graph::barabasi_albert(60, 3, &mut rng).unwrap();
    let population = Population::initialize(&graph, KindMix::Mixed, &mut rng);
    let params = SimulationParams {
        generations: 60,
        evolve_every: 1,
        sample_every: 5,
        evolution: EvolutionParams::default(),
    };
    let mut simulation = Simulation::new(&graph, population, params).unwrap();
    while !simulation.is_finished() {
        simulation.step(&mut rng);
    }

    assert_eq!(simulation.population(), &expected_population);
    assert_eq!(simulation.history(), &expected_history);
}
