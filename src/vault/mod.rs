//! The version-control capability every command delegates to.
//!
//! `VaultEngine` is the seam between the command dispatcher and the engine
//! that actually owns the repository. `GitVault` implements it on libgit2;
//! tests substitute a recording engine.

pub mod auth;
pub mod git;
#[cfg(test)]
pub mod mock;

use crate::errors::Result;
use std::fmt;

pub use git::GitVault;

/// Working-tree status partitioned the way `excavate` reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultStatus {
    /// Tracked paths whose working-tree content differs from the index.
    pub modified: Vec<String>,
    /// Paths neither tracked nor ignored.
    pub untracked: Vec<String>,
    /// Paths whose index entry differs from HEAD.
    pub staged: Vec<String>,
}

impl VaultStatus {
    pub fn is_clean(&self) -> bool {
        self.modified.is_empty() && self.untracked.is_empty() && self.staged.is_empty()
    }
}

/// Result of a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub branch: String,
    pub id: String,
    pub message: String,
    pub changes: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subject = self.message.lines().next().unwrap_or_default();
        write!(
            f,
            "[{} {}] {} ({} {} changed, {} {}(+), {} {}(-))",
            self.branch,
            self.id,
            subject,
            self.changes,
            plural(self.changes, "file", "files"),
            self.insertions,
            plural(self.insertions, "insertion", "insertions"),
            self.deletions,
            plural(self.deletions, "deletion", "deletions"),
        )
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Local branches plus the one HEAD points at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StrataMap {
    pub all: Vec<String>,
    pub current: Option<String>,
}

/// A commit produced by fusing a stratum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeCommit {
    pub id: String,
    pub summary: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuseOptions {
    pub allow_unrelated_histories: bool,
}

/// The external version-control capability.
pub trait VaultEngine {
    fn init(&mut self) -> Result<()>;
    fn status(&mut self) -> Result<VaultStatus>;
    fn stage_all(&mut self) -> Result<()>;
    fn commit(&mut self, message: &str) -> Result<CommitSummary>;
    fn create_and_switch(&mut self, name: &str) -> Result<()>;
    fn switch(&mut self, name: &str) -> Result<()>;
    fn strata(&mut self) -> Result<StrataMap>;
    fn merge(&mut self, branch: &str, options: FuseOptions) -> Result<Vec<MergeCommit>>;
    fn stash(&mut self) -> Result<()>;
    fn delete_branch(&mut self, name: &str) -> Result<()>;
    fn delete_remote_branch(&mut self, remote: &str, name: &str) -> Result<()>;
    fn add_remote(&mut self, name: &str, url: &str) -> Result<()>;
    fn push(&mut self, remote: &str, branch: &str) -> Result<()>;
    fn fetch(&mut self, remote: &str) -> Result<()>;
}
