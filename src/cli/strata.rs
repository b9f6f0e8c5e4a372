use crate::cli::{validate, Outcome};
use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::vault::VaultEngine;
use clap::Args;

#[derive(Debug, Args)]
pub struct StratumArgs {
    /// Stratum name
    pub name: String,
}

pub fn shift<E: VaultEngine + ?Sized>(engine: &mut E, args: &StratumArgs) -> Result<Outcome> {
    let name = validate::stratum_name(&args.name)?;
    engine.create_and_switch(name)?;
    Ok(Outcome::StratumCreated(name.to_string()))
}

pub fn shift_to<E: VaultEngine + ?Sized>(engine: &mut E, args: &StratumArgs) -> Result<Outcome> {
    let name = validate::stratum_name(&args.name)?;
    engine.switch(name)?;
    Ok(Outcome::Shifted(name.to_string()))
}

pub fn map<E: VaultEngine + ?Sized>(engine: &mut E) -> Result<Outcome> {
    Ok(Outcome::Mapped(engine.strata()?))
}

pub fn erode<E: VaultEngine + ?Sized>(engine: &mut E, args: &StratumArgs) -> Result<Outcome> {
    let name = validate::stratum_name(&args.name)?;
    engine.delete_branch(name)?;
    Ok(Outcome::Eroded(name.to_string()))
}

/// Delete the stratum on the configured default remote.
pub fn erode_remote<E: VaultEngine + ?Sized>(
    engine: &mut E,
    args: &StratumArgs,
    config: &ResolvedConfig,
) -> Result<Outcome> {
    let name = validate::stratum_name(&args.name)?;
    engine.delete_remote_branch(&config.remote, name)?;
    Ok(Outcome::RemoteEroded(name.to_string()))
}
