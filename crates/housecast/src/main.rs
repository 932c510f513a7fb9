use std::path::PathBuf;

use clap::Parser;
use housecast::util::io::atomic_write;
use housecast::{ConfigOverrides, Scenario, SimulationReport, format_summary, init_logging};

#[derive(Parser, Debug)]
#[command(name = "housecast")]
#[command(about = "Monte Carlo projection of a housing price portfolio")]
struct Args {
    /// Scenario file (YAML)
    scenario: PathBuf,

    /// Number of simulation runs
    #[arg(short = 'n', long)]
    simulations: Option<usize>,

    /// Number of monthly periods to project
    #[arg(short, long, conflicts_with = "years")]
    periods: Option<usize>,

    /// Years to project (12 periods per year)
    #[arg(short, long)]
    years: Option<usize>,

    /// Master seed for reproducible results
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write a JSON report to this path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to the data directory (default: ~/.housecast/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".housecast")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let scenario = Scenario::load(&args.scenario)?;
    let overrides = ConfigOverrides {
        simulations: args.simulations,
        periods: args.periods,
        years: args.years,
        seed: args.seed,
    };
    let config = overrides.apply(scenario.simulation);

    tracing::info!(
        scenario = %args.scenario.display(),
        assets = scenario.assets.len(),
        simulations = config.num_simulations,
        periods = config.num_periods,
        "running projection"
    );

    let mut simulator = scenario.simulator(config)?;
    let report = SimulationReport::from_simulator(&mut simulator);

    println!("Final cumulative return over {} periods", config.num_periods);
    print!("{}", format_summary(&report.summary));
    println!("seed  {}", report.seed);

    if let Some(path) = &args.output {
        atomic_write(path, &report.to_json()?)?;
        tracing::info!(path = %path.display(), "report written");
    }

    tracing::info!("housecast finished");
    Ok(())
}
