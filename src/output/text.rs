use crate::cli::Outcome;
use crate::output::{Icon, Theme};
use std::fmt::Display;
use std::io::Write;

/// Write the confirmation for a successful command.
pub fn write_outcome<W: Write>(
    writer: &mut W,
    theme: Theme,
    outcome: &Outcome,
) -> std::io::Result<()> {
    let p = |icon| theme.prefix(icon);

    match outcome {
        Outcome::VaultCreated => {
            writeln!(writer, "{}New StrataVault created successfully", p(Icon::Vault))?;
        }
        Outcome::NothingToFossilize => {
            writeln!(writer, "{}No changes to fossilize", p(Icon::Info))?;
        }
        Outcome::Fossilized(summary) => {
            writeln!(writer, "{}Fossilized changes: {summary}", p(Icon::Fossil))?;
        }
        Outcome::StratumCreated(name) => {
            writeln!(writer, "{}Created new stratum: {name}", p(Icon::Sprout))?;
        }
        Outcome::Excavated(status) => {
            writeln!(writer)?;
            writeln!(writer, "{}Current excavation status:", p(Icon::Excavation))?;
            let sections = [
                ("Modified artifacts:", Icon::Modified, &status.modified),
                ("Untracked artifacts:", Icon::Untracked, &status.untracked),
                ("Staged artifacts:", Icon::Staged, &status.staged),
            ];
            for (title, icon, paths) in sections {
                write_section(writer, theme, title, icon, paths)?;
            }
        }
        Outcome::Uplifted => {
            writeln!(writer, "{}Uplifted changes to remote vault", p(Icon::Uplift))?;
        }
        Outcome::Connected(name) => {
            writeln!(writer, "{}Connected to remote vault: {name}", p(Icon::Link))?;
        }
        Outcome::Unearthed => {
            writeln!(writer, "{}Unearthed changes from remote vault", p(Icon::Unearth))?;
        }
        Outcome::Shifted(name) => {
            writeln!(writer, "{}Shifted to stratum: {name}", p(Icon::Shift))?;
        }
        Outcome::Mapped(map) => {
            writeln!(writer, "{}Available strata:", p(Icon::Map))?;
            for name in &map.all {
                let icon = if map.current.as_deref() == Some(name.as_str()) {
                    Icon::CurrentStratum
                } else {
                    Icon::Stratum
                };
                writeln!(writer, "  {}{name}", p(icon))?;
            }
        }
        Outcome::Fused { branch, commits } => {
            if commits.is_empty() {
                writeln!(writer, "{}Stratum {branch} is already fused", p(Icon::Info))?;
            } else {
                writeln!(writer, "{}Fused stratum {branch}:", p(Icon::Fuse))?;
                for commit in commits {
                    writeln!(
                        writer,
                        "  {}{} {}",
                        p(Icon::MergeCommit),
                        commit.id,
                        commit.summary
                    )?;
                }
            }
        }
        Outcome::Preserved => {
            writeln!(writer, "{}Preserved working changes", p(Icon::Preserve))?;
        }
        Outcome::Eroded(name) => {
            writeln!(writer, "{}Eroded stratum: {name}", p(Icon::Erode))?;
        }
        Outcome::RemoteEroded(name) => {
            writeln!(writer, "{}Eroded remote stratum: {name}", p(Icon::RemoteErode))?;
        }
    }

    Ok(())
}

fn write_section<W: Write>(
    writer: &mut W,
    theme: Theme,
    title: &str,
    icon: Icon,
    paths: &[String],
) -> std::io::Result<()> {
    if paths.is_empty() {
        return Ok(());
    }
    writeln!(writer)?;
    writeln!(writer, "{title}")?;
    for path in paths {
        writeln!(writer, "  {}{path}", theme.prefix(icon))?;
    }
    Ok(())
}

/// Write the one-line report for a failed command.
pub fn write_failure<W: Write>(
    writer: &mut W,
    theme: Theme,
    action: &str,
    error: &dyn Display,
) -> std::io::Result<()> {
    writeln!(writer, "{}{action} failed: {error}", theme.prefix(Icon::Failure))
}
