use crate::cli::{validate, Outcome};
use crate::errors::Result;
use crate::vault::VaultEngine;
use clap::Args;

#[derive(Debug, Args)]
pub struct ConnectArgs {
    /// Remote name
    pub name: String,

    /// Remote vault URL
    pub url: String,
}

pub fn create<E: VaultEngine + ?Sized>(engine: &mut E) -> Result<Outcome> {
    engine.init()?;
    Ok(Outcome::VaultCreated)
}

pub fn connect<E: VaultEngine + ?Sized>(engine: &mut E, args: &ConnectArgs) -> Result<Outcome> {
    let name = validate::remote_name(&args.name)?;
    let url = validate::non_empty("remote vault URL", &args.url)?;
    engine.add_remote(name, url)?;
    Ok(Outcome::Connected(name.to_string()))
}
