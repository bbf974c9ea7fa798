use clap::Parser;
use partmatch::cli::{init_logging, run, Cli};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    info!("Starting partmatch v{}", env!("CARGO_PKG_VERSION"));

    let output = run(&cli)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
