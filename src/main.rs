use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use career_predictor::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("career_predictor={}", cli.log_level.to_lowercase())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("career-predictor v{} starting", env!("CARGO_PKG_VERSION"));
    run(cli)
}
