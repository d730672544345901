use clap::Parser;
use ranksweep::sweep::run_sweep;
use ranksweep::Config;
use std::path::PathBuf;
use std::time::Instant;
use anyhow::Result;

#[derive(Parser, Debug)]
#[command(name = "ranksweep")]
#[command(about = "Run a parameter sweep against an external ranking evaluator")]
struct Args {
    /// Sweep configuration file (default: RANKSWEEP_CONFIG, then ./ranksweep.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    log::info!("Starting ranksweep");

    // Load configuration
    let config = match args.config {
        Some(ref path) => Config::load_path(path)?,
        None => Config::load()?,
    };
    log::info!("Configuration loaded successfully");
    log::info!("Base params: {}", config.param_file().display());
    log::info!("Output table: {}", config.output_file().display());
    log::info!(
        "Sweeping {} weight(s) x {} rank source(s), {} metric(s), {} query column(s)",
        config.sweep.weights.len(),
        config.sweep.rank_sources.len(),
        config.metrics.interest_set.len(),
        config.metrics.query_set.len()
    );

    let start = Instant::now();
    let rows = run_sweep(&config)?;
    let elapsed = start.elapsed();

    log::info!("=== Sweep Complete ===");
    log::info!("Rows written: {}", rows);
    log::info!("Time: {:?}", elapsed);

    Ok(())
}
