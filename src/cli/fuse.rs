use crate::cli::{validate, Outcome};
use crate::errors::Result;
use crate::vault::{FuseOptions, VaultEngine};
use clap::Args;

#[derive(Debug, Args)]
pub struct FuseArgs {
    /// Stratum to fuse into the current one
    pub branch: String,

    /// Allow fusing strata that share no history
    #[arg(long)]
    pub allow_unrelated_histories: bool,
}

impl FuseArgs {
    fn to_options(&self) -> FuseOptions {
        FuseOptions {
            allow_unrelated_histories: self.allow_unrelated_histories,
        }
    }
}

pub fn run<E: VaultEngine + ?Sized>(engine: &mut E, args: &FuseArgs) -> Result<Outcome> {
    let branch = validate::non_empty("stratum to fuse", &args.branch)?;
    let commits = engine.merge(branch, args.to_options())?;
    Ok(Outcome::Fused {
        branch: branch.to_string(),
        commits,
    })
}
