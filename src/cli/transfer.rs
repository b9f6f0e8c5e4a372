use crate::cli::{validate, Outcome};
use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::vault::VaultEngine;
use clap::Args;

#[derive(Debug, Args)]
pub struct UpliftArgs {
    /// Remote name (defaults to the configured remote, "origin")
    pub remote: Option<String>,

    /// Branch name (defaults to the configured branch, "master")
    pub branch: Option<String>,
}

#[derive(Debug, Args)]
pub struct UnearthArgs {
    /// Remote name (defaults to the configured remote, "origin")
    pub remote: Option<String>,
}

pub fn uplift<E: VaultEngine + ?Sized>(
    engine: &mut E,
    args: &UpliftArgs,
    config: &ResolvedConfig,
) -> Result<Outcome> {
    let remote = validate::remote_name(args.remote.as_deref().unwrap_or(&config.remote))?;
    let branch = validate::stratum_name(args.branch.as_deref().unwrap_or(&config.branch))?;
    engine.push(remote, branch)?;
    Ok(Outcome::Uplifted)
}

pub fn unearth<E: VaultEngine + ?Sized>(
    engine: &mut E,
    args: &UnearthArgs,
    config: &ResolvedConfig,
) -> Result<Outcome> {
    let remote = validate::remote_name(args.remote.as_deref().unwrap_or(&config.remote))?;
    engine.fetch(remote)?;
    Ok(Outcome::Unearthed)
}
