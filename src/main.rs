mod cli;
mod config;
mod errors;
mod output;
mod vault;

use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    let code = cli::dispatch(cli)?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
