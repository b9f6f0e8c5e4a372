use crate::cli::{validate, Outcome};
use crate::errors::Result;
use crate::vault::VaultEngine;
use clap::Args;

#[derive(Debug, Args)]
pub struct FossilizeArgs {
    /// Fossilization message
    pub message: String,
}

/// Stage everything and commit, unless the working tree is already clean.
pub fn run<E: VaultEngine + ?Sized>(engine: &mut E, args: &FossilizeArgs) -> Result<Outcome> {
    let message = validate::non_empty("fossilization message", &args.message)?;

    let status = engine.status()?;
    if status.is_clean() {
        return Ok(Outcome::NothingToFossilize);
    }

    engine.stage_all()?;
    let summary = engine.commit(message)?;
    Ok(Outcome::Fossilized(summary))
}
