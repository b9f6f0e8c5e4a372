use crate::cli::Outcome;
use crate::errors::Result;
use crate::vault::VaultEngine;

pub fn run<E: VaultEngine + ?Sized>(engine: &mut E) -> Result<Outcome> {
    engine.stash()?;
    Ok(Outcome::Preserved)
}
