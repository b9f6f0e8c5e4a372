pub mod config;
pub mod excavate;
pub mod fossilize;
pub mod fuse;
pub mod preserve;
pub mod strata;
pub mod transfer;
pub mod validate;
pub mod vault;

use crate::config::resolve::{resolve_config, CliOverrides};
use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::output::text::{write_failure, write_outcome};
use crate::output::Theme;
use crate::vault::{CommitSummary, GitVault, MergeCommit, StrataMap, VaultEngine, VaultStatus};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "strata",
    version,
    about = "Codestrata CLI for managing StrataVaults"
)]
pub struct Cli {
    /// Path of the vault to work in
    #[arg(short = 'C', long = "vault", global = true, default_value = ".")]
    pub vault: PathBuf,

    /// Use ASCII markers instead of emoji
    #[arg(long, global = true)]
    pub plain: bool,

    /// Suppress transfer progress
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Exit 0 even when the command fails
    #[arg(long, global = true)]
    pub lenient_exit: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Vault(VaultCommand),
    /// Inspect resolved configuration
    Config(config::ConfigArgs),
}

/// The closed set of commands that each map onto one vault operation.
#[derive(Debug, Subcommand)]
pub enum VaultCommand {
    /// Initialize a new StrataVault (git init)
    CreateVault,
    /// Preserve code changes (git commit)
    Fossilize(fossilize::FossilizeArgs),
    /// Create new code layer (git checkout -b)
    StratumShift(strata::StratumArgs),
    /// Check vault status (git status)
    Excavate,
    /// Push changes to remote (git push)
    Uplift(transfer::UpliftArgs),
    /// Connect to remote vault (git remote add)
    ConnectVault(vault::ConnectArgs),
    /// Fetch changes from remote (git fetch)
    Unearth(transfer::UnearthArgs),
    /// Switch to different code layer (git checkout)
    ShiftTo(strata::StratumArgs),
    /// List all code layers (git branch --list)
    MapStrata,
    /// Merge a code layer into the current one (git merge --no-ff)
    FuseStrata(fuse::FuseArgs),
    /// Set working changes aside (git stash)
    Preserve,
    /// Delete a code layer (git branch -d)
    ErodeStrata(strata::StratumArgs),
    /// Delete a code layer on the remote (git push --delete)
    ErodeRemoteStrata(strata::StratumArgs),
}

impl VaultCommand {
    /// Noun used in the failure line: "<action> failed: ...".
    pub fn action(&self) -> &'static str {
        match self {
            VaultCommand::CreateVault => "Vault creation",
            VaultCommand::Fossilize(_) => "Fossilization",
            VaultCommand::StratumShift(_) => "Stratum shift",
            VaultCommand::Excavate => "Excavation",
            VaultCommand::Uplift(_) => "Uplift",
            VaultCommand::ConnectVault(_) => "Connection",
            VaultCommand::Unearth(_) => "Unearthing",
            VaultCommand::ShiftTo(_) => "Shift",
            VaultCommand::MapStrata => "Mapping",
            VaultCommand::FuseStrata(_) => "Fusion",
            VaultCommand::Preserve => "Preservation",
            VaultCommand::ErodeStrata(_) => "Erosion",
            VaultCommand::ErodeRemoteStrata(_) => "Remote erosion",
        }
    }
}

/// What a successful command produced, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    VaultCreated,
    NothingToFossilize,
    Fossilized(CommitSummary),
    StratumCreated(String),
    Excavated(VaultStatus),
    Uplifted,
    Connected(String),
    Unearthed,
    Shifted(String),
    Mapped(StrataMap),
    Fused {
        branch: String,
        commits: Vec<MergeCommit>,
    },
    Preserved,
    Eroded(String),
    RemoteEroded(String),
}

/// Dispatch to the appropriate command handler and return the exit status.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let overrides = CliOverrides {
        plain: cli.plain,
        quiet: cli.quiet,
        lenient_exit: cli.lenient_exit,
    };
    let vault = resolve_vault_dir(&cli.vault);
    let config = resolve_config(&vault, &overrides)?;

    match cli.command {
        Commands::Config(args) => {
            config::run(&args, &config)?;
            Ok(0)
        }
        Commands::Vault(command) => {
            let mut engine = GitVault::new(vault, config.quiet);
            run(
                &mut engine,
                &command,
                &config,
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )
        }
    }
}

/// Absolute form of the vault path, so config lookup can walk up past `.`.
/// A path that does not exist yet (create-vault) is used as given.
fn resolve_vault_dir(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Execute one command, render its outcome or failure, and pick the exit status.
pub fn run<E, O, W>(
    engine: &mut E,
    command: &VaultCommand,
    config: &ResolvedConfig,
    out: &mut O,
    err: &mut W,
) -> Result<i32>
where
    E: VaultEngine + ?Sized,
    O: Write,
    W: Write,
{
    let theme = Theme::from_plain(config.plain);
    match execute(engine, command, config) {
        Ok(outcome) => {
            write_outcome(out, theme, &outcome)?;
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(action = command.action(), error = ?e, "command failed");
            write_failure(err, theme, command.action(), &e)?;
            Ok(config.failure_exit_code(e.exit_code()))
        }
    }
}

/// Map a command onto its vault operation.
pub fn execute<E: VaultEngine + ?Sized>(
    engine: &mut E,
    command: &VaultCommand,
    config: &ResolvedConfig,
) -> Result<Outcome> {
    match command {
        VaultCommand::CreateVault => vault::create(engine),
        VaultCommand::Fossilize(args) => fossilize::run(engine, args),
        VaultCommand::StratumShift(args) => strata::shift(engine, args),
        VaultCommand::Excavate => excavate::run(engine),
        VaultCommand::Uplift(args) => transfer::uplift(engine, args, config),
        VaultCommand::ConnectVault(args) => vault::connect(engine, args),
        VaultCommand::Unearth(args) => transfer::unearth(engine, args, config),
        VaultCommand::ShiftTo(args) => strata::shift_to(engine, args),
        VaultCommand::MapStrata => strata::map(engine),
        VaultCommand::FuseStrata(args) => fuse::run(engine, args),
        VaultCommand::Preserve => preserve::run(engine),
        VaultCommand::ErodeStrata(args) => strata::erode(engine, args),
        VaultCommand::ErodeRemoteStrata(args) => strata::erode_remote(engine, args, config),
    }
}
