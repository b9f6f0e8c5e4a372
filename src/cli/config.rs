use crate::config::ResolvedConfig;
use crate::errors::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show resolved configuration with provenance
    Show,
}

pub fn run(args: &ConfigArgs, config: &ResolvedConfig) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let mut stdout = std::io::stdout();
            crate::config::show::render_show(&mut stdout, config)?;
        }
    }
    Ok(())
}
