use anyhow::Result;
use gitcal::cli::Cli;
use gitcal::telemetry::init_tracing;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { Level::DEBUG } else { Level::WARN });
    cli.execute()
}
