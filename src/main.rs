use clap::Parser;
use pathplanner::{init_logging, run, Cli, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;
    tracing::debug!("pathplanner {} (built {})", VERSION, BUILD_DATE);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &mut out)
}
