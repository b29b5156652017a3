//! Simulation Driver
//!
//! Runs generations: a round every generation, an evolution step on the
//! configured cadence (never on generation 0), and a history sample on the
//! sampling cadence. State is consistent at every generation boundary, so a
//! run can be stopped between calls to [`Simulation::step`].

use rand::Rng;
use serde::{Deserialize, Serialize};

use ultimatum_events::{History, HistorySample};

use crate::error::{SimError, SimResult};
use crate::evolution::{evolve, EvolutionOutcome, EvolutionParams};
use crate::network::Network;
use crate::population::Population;
use crate::round::{run_round, RoundOutcome};

/// Cadences and update settings for a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub generations: u64,
    /// Evolve on generations where `generation % evolve_every == 0`
    pub evolve_every: u64,
    /// Sample on generations where `generation % sample_every == 0`
    pub sample_every: u64,
    pub evolution: EvolutionParams,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            generations: 5000,
            evolve_every: 1,
            sample_every: 10,
            evolution: EvolutionParams::default(),
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> SimResult<()> {
        if self.evolve_every == 0 {
            return Err(SimError::InvalidConfig("evolve_every must be at least 1".into()));
        }
        if self.sample_every == 0 {
            return Err(SimError::InvalidConfig("sample_every must be at least 1".into()));
        }
        let evolution = &self.evolution;
        if !(0.0..=1.0).contains(&evolution.mutation_rate) {
            return Err(SimError::InvalidConfig(format!(
                "mutation_rate {} outside [0, 1]",
                evolution.mutation_rate
            )));
        }
        if !(evolution.mutation_stddev >= 0.0 && evolution.mutation_stddev.is_finite()) {
            return Err(SimError::InvalidConfig(format!(
                "mutation_stddev {} must be finite and non-negative",
                evolution.mutation_stddev
            )));
        }
        Ok(())
    }

    pub fn evolves_at(&self, generation: u64) -> bool {
        generation > 0 && generation % self.evolve_every == 0
    }

    pub fn samples_at(&self, generation: u64) -> bool {
        generation % self.sample_every == 0
    }
}

/// What happened during one generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationReport {
    pub generation: u64,
    pub round: RoundOutcome,
    /// `None` on generations that did not evolve
    pub evolution: Option<EvolutionOutcome>,
    /// `Some` when this generation was sampled into the history
    pub sample: Option<HistorySample>,
}

/// A run in progress: network, population, history and generation counter
#[derive(Debug, Clone)]
pub struct Simulation<N> {
    network: N,
    population: Population,
    params: SimulationParams,
    history: History,
    generation: u64,
}

impl<N: Network> Simulation<N> {
    /// Checks parameters and that the population covers the network.
    pub fn new(network: N, population: Population, params: SimulationParams) -> SimResult<Self> {
        params.validate()?;
        population.check_covers(&network)?;
        Ok(Self {
            network,
            population,
            params,
            history: History::new(),
            generation: 0,
        })
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Index of the next generation to run
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Index of the last generation run, `None` before the first step
    pub fn last_generation(&self) -> Option<u64> {
        self.generation.checked_sub(1)
    }

    pub fn is_finished(&self) -> bool {
        self.generation >= self.params.generations
    }

    /// Runs a single generation.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GenerationReport {
        let generation = self.generation;
        let round = run_round(&self.network, &mut self.population);

        let evolution = if self.params.evolves_at(generation) {
            let outcome = evolve(
                &self.network,
                &mut self.population,
                &self.params.evolution,
                rng,
            );
            tracing::debug!(
                generation,
                imitations = outcome.imitations,
                mutations = outcome.mutations,
                "evolution step"
            );
            Some(outcome)
        } else {
            None
        };

        let sample = if self.params.samples_at(generation) {
            let sample = HistorySample::new(
                generation,
                self.population.mean_offer(),
                self.population.mean_threshold(),
            );
            self.history.push(sample);
            Some(sample)
        } else {
            None
        };

        self.generation += 1;
        GenerationReport {
            generation,
            round,
            evolution,
            sample,
        }
    }

    /// Runs all remaining generations.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.run_with(rng, |_, _| {});
    }

    /// Runs all remaining generations, handing each report and the current
    /// population to `observer`.
    pub fn run_with<R, F>(&mut self, rng: &mut R, mut observer: F)
    where
        R: Rng + ?Sized,
        F: FnMut(&GenerationReport, &Population),
    {
        while !self.is_finished() {
            let report = self.step(rng);
            observer(&report, &self.population);
        }
    }

    /// Consumes the run, returning the final population and history.
    pub fn into_parts(self) -> (N, Population, History) {
        (self.network, self.population, self.history)
    }
}

/// Runs `generations` generations and returns the final population and the
/// sampled history.
pub fn run<N, R>(
    generations: u64,
    network: &N,
    population: Population,
    evolve_every: u64,
    sample_every: u64,
    evolution: EvolutionParams,
    rng: &mut R,
) -> SimResult<(Population, History)>
where
    N: Network + ?Sized,
    R: Rng + ?Sized,
{
    let params = SimulationParams {
        generations,
        evolve_every,
        sample_every,
        evolution,
    };
    let mut simulation = Simulation::new(network, population, params)?;
    simulation.run(rng);
    let (_, population, history) = simulation.into_parts();
    Ok((population, history))
}
