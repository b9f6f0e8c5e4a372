//! Recording engine for dispatcher tests.
//!
//! `RecordingEngine` implements `VaultEngine`, records every call it
//! receives, and answers with canned results. Setting `fail_with` makes
//! every call fail with that engine message.

use crate::errors::{Result, StrataError};
use crate::vault::{CommitSummary, FuseOptions, MergeCommit, StrataMap, VaultEngine, VaultStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    Status,
    StageAll,
    Commit(String),
    CreateAndSwitch(String),
    Switch(String),
    Strata,
    Merge(String, FuseOptions),
    Stash,
    DeleteBranch(String),
    DeleteRemoteBranch(String, String),
    AddRemote(String, String),
    Push(String, String),
    Fetch(String),
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub calls: Vec<Call>,
    pub status: VaultStatus,
    pub strata: StrataMap,
    pub merge_commits: Vec<MergeCommit>,
    pub fail_with: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: VaultStatus) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    fn record(&mut self, call: Call) -> Result<()> {
        self.calls.push(call);
        match &self.fail_with {
            Some(message) => Err(StrataError::Git(git2::Error::from_str(message))),
            None => Ok(()),
        }
    }
}

impl VaultEngine for RecordingEngine {
    fn init(&mut self) -> Result<()> {
        self.record(Call::Init)
    }

    fn status(&mut self) -> Result<VaultStatus> {
        self.record(Call::Status)?;
        Ok(self.status.clone())
    }

    fn stage_all(&mut self) -> Result<()> {
        self.record(Call::StageAll)
    }

    fn commit(&mut self, message: &str) -> Result<CommitSummary> {
        self.record(Call::Commit(message.to_string()))?;
        let changes = self.status.modified.len()
            + self.status.untracked.len()
            + self.status.staged.len();
        Ok(CommitSummary {
            branch: "master".to_string(),
            id: "abc1234".to_string(),
            message: message.to_string(),
            changes,
            insertions: changes,
            deletions: 0,
        })
    }

    fn create_and_switch(&mut self, name: &str) -> Result<()> {
        self.record(Call::CreateAndSwitch(name.to_string()))
    }

    fn switch(&mut self, name: &str) -> Result<()> {
        self.record(Call::Switch(name.to_string()))
    }

    fn strata(&mut self) -> Result<StrataMap> {
        self.record(Call::Strata)?;
        Ok(self.strata.clone())
    }

    fn merge(&mut self, branch: &str, options: FuseOptions) -> Result<Vec<MergeCommit>> {
        self.record(Call::Merge(branch.to_string(), options))?;
        Ok(self.merge_commits.clone())
    }

    fn stash(&mut self) -> Result<()> {
        self.record(Call::Stash)
    }

    fn delete_branch(&mut self, name: &str) -> Result<()> {
        self.record(Call::DeleteBranch(name.to_string()))
    }

    fn delete_remote_branch(&mut self, remote: &str, name: &str) -> Result<()> {
        self.record(Call::DeleteRemoteBranch(remote.to_string(), name.to_string()))
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        self.record(Call::AddRemote(name.to_string(), url.to_string()))
    }

    fn push(&mut self, remote: &str, branch: &str) -> Result<()> {
        self.record(Call::Push(remote.to_string(), branch.to_string()))
    }

    fn fetch(&mut self, remote: &str) -> Result<()> {
        self.record(Call::Fetch(remote.to_string()))
    }
}
