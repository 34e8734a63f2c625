// --- File: main.rs ---
use anyhow::{Context, Result};
use arenasim::constants::{DEFAULT_EXPORT_DIR, DEFAULT_PROGRESS_INTERVAL};
use arenasim::{ProgressLog, Simulation, SimulationConfig, StopSignal, TimeSeries};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Multi-species arena simulation producing population time series")]
struct Args {
    /// YAML scenario; the built-in four-species food web is used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the scenario seed
    #[arg(short, long)]
    seed: Option<u64>,
    /// Stop after this many ticks instead of waiting for Enter
    #[arg(short = 'n', long)]
    max_ticks: Option<u64>,
    /// Directory receiving population.csv and infected.csv
    #[arg(short, long, default_value = DEFAULT_EXPORT_DIR)]
    out: PathBuf,
    #[arg(long, default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    progress_every: u64,
}

// Pressing Enter stops the run. A closed stdin leaves the run to the tick limit.
fn watch_stdin(stop: StopSignal) {
    std::thread::spawn(move || {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => {}
            Ok(_) => {
                log::info!("stop requested");
                stop.trigger();
            }
        }
    });
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => SimulationConfig::new(),
    };
    if args.seed.is_some() {
        config.arena.seed = args.seed;
    }

    let mut simulation = Simulation::new(&config).context("invalid scenario")?;
    log::info!(
        "running {} species in a {:.1}x{:.1} arena, dt = {}, seed = {}",
        simulation.catalog().len(),
        2.0 * simulation.arena().half_width,
        2.0 * simulation.arena().half_width,
        simulation.arena().dt,
        simulation.seed()
    );

    let stop = StopSignal::new();
    if args.max_ticks.is_none() {
        log::info!("press Enter to stop the simulation");
    }
    watch_stdin(stop.clone());

    let names: Vec<String> = simulation.catalog().names().map(str::to_owned).collect();
    let mut series = TimeSeries::new(names.iter().cloned());
    let mut progress = ProgressLog::new(names, args.progress_every);
    arenasim::run(
        &mut simulation,
        &stop,
        args.max_ticks,
        &mut [&mut series, &mut progress],
    );

    log::info!("{}", progress.summary(&simulation.snapshot()));
    series
        .export_csv(&args.out)
        .with_context(|| format!("exporting time series to {}", args.out.display()))?;
    Ok(())
}
// --- End of File: main.rs ---
