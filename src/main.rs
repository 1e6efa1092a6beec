// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use the_lattice::bundle::read_document;
use the_lattice::config::consts::DEFAULT_ITERATIONS;
use the_lattice::config::{load_and_validate_config, RuntimeBuilder};
use the_lattice::engine::Network;
use the_lattice::registry::RegionRegistry;

#[derive(Parser)]
#[command(name = "lattice")]
#[command(about = "Phase-scheduled dataflow network runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a network from a YAML/TOML config and run it.
    Run {
        config: PathBuf,

        /// Iterations to run; overrides the config's `iterations`.
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Save the network to this bundle directory after running.
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Print the topology stored in a bundle directory.
    Inspect {
        bundle: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// List the registered region types.
    Types,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let registry = Arc::new(RegionRegistry::with_builtins());

    match cli.cmd {
        Commands::Run {
            config,
            iterations,
            save,
        } => run(&config, iterations, save.as_deref(), registry),
        Commands::Inspect { bundle, json } => inspect(&bundle, json),
        Commands::Types => {
            for name in registry.type_names() {
                let spec = registry.spec(&name)?;
                println!("{:<16} {}", name, spec.description());
            }
            Ok(())
        }
    }
}

fn run(
    config_file: &Path,
    iterations: Option<usize>,
    save: Option<&Path>,
    registry: Arc<RegionRegistry>,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let config = load_and_validate_config(config_file).map_err(|e| anyhow!("{e}"))?;
    let iterations = iterations
        .or(config.iterations)
        .unwrap_or(DEFAULT_ITERATIONS);

    let mut network = RuntimeBuilder::from_config(&config, registry)
        .with_context(|| format!("building network from {}", config_file.display()))?;

    println!("📋 Configuration: {}", config_file.display());
    println!("🔢 Regions: {}  Phases: {}", network.regions().count(), network.phase_count());
    println!("🔗 Zero-copy: {}", network.zero_copy());

    let execution_start = Instant::now();
    network.run(iterations)?;
    let execution_time = execution_start.elapsed();

    println!("\n📊 Execution Results:");
    println!("⏱️  Execution Time: {:?}", execution_time);
    println!("🔁 Iterations: {} (now at {})", iterations, network.iteration());
    print_outputs(&network);

    if let Some(bundle) = save {
        network.save(bundle)?;
        println!("\n💾 Saved bundle to {}", bundle.display());
    }

    println!("\n⏱️  Total Time (including config load): {:?}", start_time.elapsed());
    Ok(())
}

fn print_outputs(network: &Network) {
    for region in network.regions() {
        println!("  {} ({})", region.name(), region.region_type());
        for output in region.outputs() {
            println!("     ▸ {} = {}", output.name(), output.buffer().snapshot());
        }
    }
}

fn inspect(bundle: &Path, json: bool) -> anyhow::Result<()> {
    let document = read_document(bundle)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    println!("📦 Bundle: {} (iteration {})", bundle.display(), document.iteration);
    println!("\n🧱 Regions:");
    for region in &document.regions {
        println!(
            "  {} {} ({}) phases {:?}",
            region.label, region.name, region.region_type, region.phases
        );
    }
    println!("\n🔗 Links:");
    for link in &document.links {
        println!(
            "  {}.{} → {}.{} delay {} ({} buffered)",
            link.src_region,
            link.src_output,
            link.dest_region,
            link.dest_input,
            link.propagation_delay,
            link.propagation_delay_buffer.len()
        );
    }
    Ok(())
}
