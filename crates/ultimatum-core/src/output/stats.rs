//! Run Statistics
//!
//! Summary of a finished run: kind counts, final strategy means and strategy
//! distributions, plus totals accumulated from each generation report.

use serde::{Deserialize, Serialize};

use crate::driver::GenerationReport;
use crate::population::{KindCounts, Population};

/// One bin of a histogram over [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Counts `values` into `bins` equal-width bins spanning [0, 1].
///
/// Bins are half-open except the last, which also holds 1.0. Values outside
/// the range are counted in the nearest end bin.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }

    let width = 1.0 / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for &value in values {
        let index = (value.clamp(0.0, 1.0) * bins as f64) as usize;
        result[index.min(bins - 1)].count += 1;
    }
    result
}

/// Final statistics written to `stats.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub generations: u64,
    pub population: usize,
    pub edges: usize,
    pub kind_counts: KindCounts,
    pub final_mean_offer: f64,
    pub final_mean_threshold: f64,
    pub offer_histogram: Vec<HistogramBin>,
    pub threshold_histogram: Vec<HistogramBin>,
    pub total_imitations: usize,
    pub total_mutations: usize,
}

/// Accumulates totals from generation reports during a run
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    generations: u64,
    evolution_steps: u64,
    imitations: usize,
    mutations: usize,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &GenerationReport) {
        self.generations += 1;
        if let Some(evolution) = report.evolution {
            self.evolution_steps += 1;
            self.imitations += evolution.imitations;
            self.mutations += evolution.mutations;
        }
    }

    pub fn generations(&self) -> u64 {
        self.generations
    }

    pub fn evolution_steps(&self) -> u64 {
        self.evolution_steps
    }

    pub fn imitations(&self) -> usize {
        self.imitations
    }

    pub fn mutations(&self) -> usize {
        self.mutations
    }

    /// Builds the summary for the final population.
    pub fn finish(&self, population: &Population, edges: usize, bins: usize) -> SimulationStats {
        let offers: Vec<f64> = population.iter().map(|a| a.offer()).collect();
        let thresholds: Vec<f64> = population.iter().map(|a| a.threshold()).collect();

        SimulationStats {
            generations: self.generations,
            population: population.len(),
            edges,
            kind_counts: population.kind_counts(),
            final_mean_offer: population.mean_offer(),
            final_mean_threshold: population.mean_threshold(),
            offer_histogram: histogram(&offers, bins),
            threshold_histogram: histogram(&thresholds, bins),
            total_imitations: self.imitations,
            total_mutations: self.mutations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Agent, AgentId, Kind};
    use crate::evolution::EvolutionOutcome;
    use crate::round::RoundOutcome;

    fn report(generation: u64, evolution: Option<EvolutionOutcome>) -> GenerationReport {
        GenerationReport {
            generation,
            round: RoundOutcome::default(),
            evolution,
            sample: None,
        }
    }

    #[test]
    fn test_histogram_counts_every_value_once() {
        let values = [0.0, 0.05, 0.25, 0.5, 0.5, 0.99, 1.0];
        let bins = histogram(&values, 4);

        assert_eq!(bins.len(), 4);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 2, 2]);
        assert_eq!(counts.iter().sum::<usize>(), values.len());
    }

    #[test]
    fn test_histogram_bounds() {
        let bins = histogram(&[], 5);
        assert_eq!(bins[0].lower, 0.0);
        assert!((bins[4].upper - 1.0).abs() < 1e-12);
        assert!(bins.iter().all(|b| b.count == 0));
        assert!(histogram(&[0.3], 0).is_empty());
    }

    #[test]
    fn test_histogram_clamps_out_of_range() {
        let bins = histogram(&[-0.5, 1.5], 2);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[1].count, 1);
    }

    #[test]
    fn test_collector_totals() {
        let mut collector = StatsCollector::new();
        collector.record(&report(0, None));
        collector.record(&report(
            1,
            Some(EvolutionOutcome {
                imitations: 3,
                mutations: 1,
            }),
        ));
        collector.record(&report(
            2,
            Some(EvolutionOutcome {
                imitations: 2,
                mutations: 2,
            }),
        ));

        assert_eq!(collector.generations(), 3);
        assert_eq!(collector.evolution_steps(), 2);
        assert_eq!(collector.imitations(), 5);
        assert_eq!(collector.mutations(), 3);
    }

    #[test]
    fn test_finish_summarizes_population() {
        let population = Population::from_agents(vec![
            Agent::with_strategy(AgentId(0), Kind::Empathetic, 0.4, 0.4),
            Agent::with_strategy(AgentId(1), Kind::Pragmatic, 0.7, 0.3),
            Agent::with_strategy(AgentId(2), Kind::Independent, 0.1, 0.8),
        ])
        .unwrap();

        let stats = StatsCollector::new().finish(&population, 2, 10);

        assert_eq!(stats.population, 3);
        assert_eq!(stats.edges, 2);
        assert_eq!(stats.kind_counts.total(), 3);
        assert!((stats.final_mean_offer - 0.4).abs() < 1e-12);
        assert!((stats.final_mean_threshold - 0.5).abs() < 1e-12);
        assert_eq!(stats.offer_histogram.len(), 10);
        assert_eq!(
            stats.threshold_histogram.iter().map(|b| b.count).sum::<usize>(),
            3
        );
    }
}
