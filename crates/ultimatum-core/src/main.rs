//! Ultimatum Network Simulation
//!
//! Run with: cargo run -p ultimatum-core --bin ultimatum_sim
//!
//! Examples:
//!   cargo run -p ultimatum-core --bin ultimatum_sim -- --generations 2000 --kind-mix pragmatic
//!   RUST_LOG=ultimatum_core=debug cargo run -p ultimatum-core --bin ultimatum_sim -- --config ultimatum.toml

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ultimatum_core::config::{Config, DEFAULT_CONFIG_PATH};
use ultimatum_core::output::{OutputWriter, StatsCollector};
use ultimatum_core::{seeded_rng, Graph, KindMix, Population, PopulationSnapshot, Simulation};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "ultimatum_sim")]
#[command(about = "Ultimatum Game strategy evolution on a scale-free network")]
struct Args {
    /// Configuration file (defaults apply when missing)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of generations to simulate
    #[arg(long)]
    generations: Option<u64>,

    /// Number of agents
    #[arg(long)]
    population: Option<usize>,

    /// Edges each new node attaches with when growing the network
    #[arg(long)]
    attachment: Option<usize>,

    /// Evolve every N generations
    #[arg(long)]
    evolve_every: Option<u64>,

    /// Record population means every N generations
    #[arg(long)]
    sample_every: Option<u64>,

    /// Chance an imitator mutates the copied strategy
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Standard deviation of the mutation noise
    #[arg(long)]
    mutation_stddev: Option<f64>,

    /// Initial kinds: mixed, empathetic, pragmatic or independent
    #[arg(long)]
    kind_mix: Option<KindMix>,

    /// Directory for history, snapshots and stats
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip writing output files
    #[arg(long)]
    no_output: bool,
}

impl Args {
    /// Applies command line overrides on top of the file configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = seed;
        }
        if let Some(generations) = self.generations {
            config.simulation.generations = generations;
        }
        if let Some(size) = self.population {
            config.population.size = size;
        }
        if let Some(attachment) = self.attachment {
            config.network.attachment = attachment;
        }
        if let Some(evolve_every) = self.evolve_every {
            config.simulation.evolve_every = evolve_every;
        }
        if let Some(sample_every) = self.sample_every {
            config.simulation.sample_every = sample_every;
        }
        if let Some(rate) = self.mutation_rate {
            config.evolution.mutation_rate = rate;
        }
        if let Some(stddev) = self.mutation_stddev {
            config.evolution.mutation_stddev = stddev;
        }
        if let Some(kind_mix) = self.kind_mix {
            config.population.kind_mix = kind_mix;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ultimatum_core=info,ultimatum_sim=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = if args.config.exists() {
        Config::load(&args.config)?
    } else {
        Config::load_or_default(&args.config)
    };
    args.apply(&mut config);
    config.validate()?;

    tracing::info!(
        seed = config.simulation.seed,
        generations = config.simulation.generations,
        population = config.population.size,
        attachment = config.network.attachment,
        kind_mix = %config.population.kind_mix,
        "starting ultimatum simulation"
    );

    let mut rng = seeded_rng(config.simulation.seed);

    let graph = Graph::barabasi_albert(config.population.size, config.network.attachment, &mut rng)?;
    tracing::info!(
        nodes = config.population.size,
        edges = graph.edge_count(),
        mean_degree = graph.mean_degree(),
        max_degree = graph.max_degree(),
        "network built"
    );

    let population = Population::initialize(&graph, config.population.kind_mix, &mut rng);
    let counts = population.kind_counts();
    tracing::info!(
        empathetic = counts.empathetic,
        pragmatic = counts.pragmatic,
        independent = counts.independent,
        mean_offer = population.mean_offer(),
        mean_threshold = population.mean_threshold(),
        "population initialized"
    );

    let mut snapshot_seq = 1u64;
    let mut snapshots: Vec<PopulationSnapshot> =
        vec![population.snapshot(&graph, snapshot_seq, 0, "simulation_start")];

    let mut simulation = Simulation::new(&graph, population, config.simulation_params())?;
    let mut collector = StatsCollector::new();
    let log_every = config.output.log_every;
    let snapshot_every = config.output.snapshot_every;

    simulation.run_with(&mut rng, |report, population| {
        collector.record(report);
        let generation = report.generation;

        if log_every > 0 && generation > 0 && generation % log_every == 0 {
            tracing::info!(
                generation,
                mean_offer = population.mean_offer(),
                mean_threshold = population.mean_threshold(),
                acceptance_rate = report.round.acceptance_rate(),
                imitations = collector.imitations(),
                "progress"
            );
        }

        if snapshot_every > 0 && generation > 0 && generation % snapshot_every == 0 {
            snapshot_seq += 1;
            snapshots.push(population.snapshot(&graph, snapshot_seq, generation, "periodic"));
        }
    });

    let last_generation = simulation.last_generation().unwrap_or(0);
    let (_, population, history) = simulation.into_parts();
    snapshot_seq += 1;
    snapshots.push(population.snapshot(&graph, snapshot_seq, last_generation, "simulation_end"));

    let stats = collector.finish(&population, graph.edge_count(), config.output.histogram_bins);
    tracing::info!(
        generations = stats.generations,
        final_mean_offer = stats.final_mean_offer,
        final_mean_threshold = stats.final_mean_threshold,
        imitations = stats.total_imitations,
        mutations = stats.total_mutations,
        "simulation complete"
    );

    if args.no_output {
        return Ok(());
    }

    let writer = OutputWriter::new(&config.output.directory)?;
    writer.write_history(&history)?;
    for snapshot in &snapshots {
        writer.write_snapshot(snapshot)?;
    }
    writer.write_stats(&stats)?;
    tracing::info!(
        directory = %writer.output_dir().display(),
        samples = history.len(),
        snapshots = snapshots.len(),
        "output written"
    );

    Ok(())
}
