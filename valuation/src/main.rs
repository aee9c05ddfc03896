use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use valuation::{report, PriceHistory, Result, ScenarioConfig};

/// Price calls and puts over a stock's price history
#[derive(Parser)]
#[command(name = "valuation")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Price history CSV (Date, High, Low, Close)
    #[arg(long)]
    history: PathBuf,

    /// Scenario configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => ScenarioConfig::from_path(path)?,
        None => ScenarioConfig::default(),
    };
    let history = PriceHistory::from_csv_path(&cli.history)?;
    let valuation = valuation::run(&history, &config)?;

    match &cli.output {
        Some(path) => {
            report::write_csv(&valuation, File::create(path)?)?;
            info!(path = %path.display(), "report written");
        }
        None => report::write_csv(&valuation, io::stdout().lock())?,
    }
    Ok(())
}
