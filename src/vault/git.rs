use crate::errors::{Result, StrataError};
use crate::vault::auth::{progress_bar, remote_callbacks, PushRejections};
use crate::vault::{CommitSummary, FuseOptions, MergeCommit, StrataMap, VaultEngine, VaultStatus};
use git2::build::CheckoutBuilder;
use git2::{
    Branch, BranchType, Commit, ErrorCode, FetchOptions, IndexAddOption, Oid, PushOptions,
    Repository, Status, StatusOptions,
};
use std::path::PathBuf;

const STAGED: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

const MODIFIED: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// A StrataVault backed by libgit2.
#[derive(Debug, Clone)]
pub struct GitVault {
    workdir: PathBuf,
    quiet: bool,
}

impl GitVault {
    pub fn new(workdir: impl Into<PathBuf>, quiet: bool) -> Self {
        Self {
            workdir: workdir.into(),
            quiet,
        }
    }

    /// Open the vault at the working directory (or walk up to find one).
    fn open(&self) -> Result<Repository> {
        Repository::discover(&self.workdir).map_err(|e| match e.code() {
            ErrorCode::NotFound => StrataError::Refused(format!(
                "no StrataVault found at {} (run create-vault first)",
                self.workdir.display()
            )),
            _ => StrataError::Git(e),
        })
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let repo = self.open()?;
        let mut remote = repo.find_remote(remote_name)?;
        let config = repo.config()?;
        let progress = progress_bar(self.quiet, &format!("Uplifting to {remote_name}"));
        let rejections = PushRejections::default();

        let result = {
            let mut opts = PushOptions::new();
            opts.remote_callbacks(remote_callbacks(
                &config,
                progress.as_ref(),
                Some(&rejections),
            ));
            remote.push(&[refspec], Some(&mut opts))
        };
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        result?;

        match rejections.into_message() {
            Some(message) => Err(StrataError::Refused(message)),
            None => Ok(()),
        }
    }
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

fn entry_path(entry: &git2::StatusEntry<'_>) -> String {
    String::from_utf8_lossy(entry.path_bytes()).into_owned()
}

fn short_id(repo: &Repository, oid: Oid) -> Result<String> {
    let buf = repo.find_object(oid, None)?.short_id()?;
    Ok(buf.as_str().unwrap_or_default().to_string())
}

/// Commit HEAD points at, or `None` on an unborn branch.
fn head_commit(repo: &Repository) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if is_unborn(&e) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Short name of the branch HEAD points at, even when it has no commits yet.
fn current_branch(repo: &Repository) -> Result<Option<String>> {
    match repo.head() {
        Ok(head) if head.is_branch() => Ok(head.shorthand().map(str::to_string)),
        Ok(_) => Ok(None),
        Err(e) if is_unborn(&e) => {
            let head = repo.find_reference("HEAD")?;
            Ok(head
                .symbolic_target()
                .and_then(|t| t.strip_prefix("refs/heads/"))
                .map(str::to_string))
        }
        Err(e) => Err(e.into()),
    }
}

fn local_branch<'r>(repo: &'r Repository, name: &str) -> Result<Branch<'r>> {
    repo.find_branch(name, BranchType::Local)
        .map_err(|e| match e.code() {
            ErrorCode::NotFound => StrataError::Refused(format!("stratum '{name}' not found")),
            _ => StrataError::Git(e),
        })
}

/// Create a local branch tracking the single remote branch named `name`.
fn track_remote_branch<'r>(repo: &'r Repository, name: &str) -> Result<Branch<'r>> {
    let mut candidates = Vec::new();
    for item in repo.branches(Some(BranchType::Remote))? {
        let (branch, _) = item?;
        let matches = branch
            .name()?
            .and_then(|full| full.split_once('/'))
            .is_some_and(|(_, short)| short == name);
        if matches {
            candidates.push(branch);
        }
    }

    let remote_branch = match candidates.len() {
        0 => return Err(StrataError::Refused(format!("stratum '{name}' not found"))),
        1 => candidates.remove(0),
        n => {
            return Err(StrataError::Refused(format!(
                "'{name}' matches strata on {n} remotes"
            )))
        }
    };

    let upstream = remote_branch.name()?.unwrap_or_default().to_string();
    let commit = remote_branch.get().peel_to_commit()?;
    let mut local = repo.branch(name, &commit, false)?;
    local.set_upstream(Some(&upstream))?;
    tracing::debug!(name, %upstream, "tracking remote stratum");
    Ok(local)
}

/// A local branch by name, else any revision git can parse.
fn resolve_commit<'r>(repo: &'r Repository, spec: &str) -> Result<Commit<'r>> {
    if let Ok(branch) = repo.find_branch(spec, BranchType::Local) {
        return Ok(branch.get().peel_to_commit()?);
    }
    let object = repo.revparse_single(spec).map_err(|e| match e.code() {
        ErrorCode::NotFound => StrataError::Refused(format!("stratum '{spec}' not found")),
        _ => StrataError::Git(e),
    })?;
    Ok(object.peel_to_commit()?)
}

impl VaultEngine for GitVault {
    fn init(&mut self) -> Result<()> {
        tracing::debug!(path = %self.workdir.display(), "init");
        Repository::init(&self.workdir)?;
        Ok(())
    }

    fn status(&mut self) -> Result<VaultStatus> {
        let repo = self.open()?;
        if repo.is_bare() {
            return Err(StrataError::Refused(
                "a bare StrataVault has no working tree".into(),
            ));
        }

        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let mut status = VaultStatus::default();
        for entry in repo.statuses(Some(&mut opts))?.iter() {
            let flags = entry.status();
            if flags.intersects(MODIFIED) {
                status.modified.push(entry_path(&entry));
            }
            if flags.contains(Status::WT_NEW) {
                status.untracked.push(entry_path(&entry));
            }
            if flags.intersects(STAGED) {
                status.staged.push(entry_path(&entry));
            }
        }
        tracing::debug!(
            modified = status.modified.len(),
            untracked = status.untracked.len(),
            staged = status.staged.len(),
            "status"
        );
        Ok(status)
    }

    fn stage_all(&mut self) -> Result<()> {
        let repo = self.open()?;
        let mut index = repo.index()?;
        index.add_all(["*"].iter(), IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;
        Ok(())
    }

    fn commit(&mut self, message: &str) -> Result<CommitSummary> {
        let repo = self.open()?;
        let signature = repo.signature()?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let parent = head_commit(&repo)?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;

        let parent_tree = parent.as_ref().map(|c| c.tree()).transpose()?;
        let stats = repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), None)?
            .stats()?;
        let branch = current_branch(&repo)?.unwrap_or_else(|| "detached HEAD".to_string());
        tracing::debug!(%oid, %branch, "commit");

        Ok(CommitSummary {
            branch,
            id: short_id(&repo, oid)?,
            message: message.to_string(),
            changes: stats.files_changed(),
            insertions: stats.insertions(),
            deletions: stats.deletions(),
        })
    }

    fn create_and_switch(&mut self, name: &str) -> Result<()> {
        let repo = self.open()?;
        if repo.find_branch(name, BranchType::Local).is_ok() {
            return Err(StrataError::Refused(format!(
                "a stratum named '{name}' already exists"
            )));
        }

        let refname = format!("refs/heads/{name}");
        if let Some(commit) = head_commit(&repo)? {
            repo.branch(name, &commit, false)?;
        }
        repo.set_head(&refname)?;
        tracing::debug!(name, "created stratum");
        Ok(())
    }

    fn switch(&mut self, name: &str) -> Result<()> {
        let repo = self.open()?;
        let branch = match repo.find_branch(name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => track_remote_branch(&repo, name)?,
            Err(e) => return Err(e.into()),
        };

        let refname = branch
            .get()
            .name()
            .map(str::to_string)
            .ok_or_else(|| StrataError::Refused(format!("stratum '{name}' is not valid UTF-8")))?;
        let commit = branch.get().peel_to_commit()?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
        repo.set_head(&refname)?;
        tracing::debug!(name, "switched stratum");
        Ok(())
    }

    fn strata(&mut self) -> Result<StrataMap> {
        let repo = self.open()?;
        let mut all = Vec::new();
        for item in repo.branches(Some(BranchType::Local))? {
            let (branch, _) = item?;
            if let Some(name) = branch.name()? {
                all.push(name.to_string());
            }
        }
        all.sort();

        let current = match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().map(str::to_string),
            Ok(_) => None,
            Err(e) if is_unborn(&e) => None,
            Err(e) => return Err(e.into()),
        };
        Ok(StrataMap { all, current })
    }

    fn merge(&mut self, branch: &str, options: FuseOptions) -> Result<Vec<MergeCommit>> {
        let repo = self.open()?;
        let ours = head_commit(&repo)?.ok_or_else(|| {
            StrataError::Refused("the current stratum has no fossils to fuse into".into())
        })?;
        let theirs = resolve_commit(&repo, branch)?;
        tracing::debug!(branch, ?options, "merge");

        if ours.id() == theirs.id() || repo.graph_descendant_of(ours.id(), theirs.id())? {
            return Ok(Vec::new());
        }

        match repo.merge_base(ours.id(), theirs.id()) {
            Ok(_) => {}
            Err(e) if e.code() == ErrorCode::NotFound => {
                if !options.allow_unrelated_histories {
                    return Err(StrataError::Refused(
                        "refusing to merge unrelated histories".into(),
                    ));
                }
            }
            Err(e) => return Err(e.into()),
        }

        let mut index = repo.merge_commits(&ours, &theirs, None)?;
        if index.has_conflicts() {
            let mut paths = Vec::new();
            for conflict in index.conflicts()? {
                let conflict = conflict?;
                if let Some(entry) = conflict.our.or(conflict.their).or(conflict.ancestor) {
                    paths.push(String::from_utf8_lossy(&entry.path).into_owned());
                }
            }
            return Err(StrataError::Refused(format!(
                "merge conflicts in: {}",
                paths.join(", ")
            )));
        }

        let tree = repo.find_tree(index.write_tree_to(&repo)?)?;
        let signature = repo.signature()?;
        let message = format!("Merge branch '{branch}'");

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        repo.checkout_tree(tree.as_object(), Some(&mut checkout))?;

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &message,
            &tree,
            &[&ours, &theirs],
        )?;

        Ok(vec![MergeCommit {
            id: short_id(&repo, oid)?,
            summary: message,
        }])
    }

    fn stash(&mut self) -> Result<()> {
        let mut repo = self.open()?;
        let signature = repo.signature()?;
        let branch = current_branch(&repo)?.unwrap_or_else(|| "(no branch)".to_string());
        let message = format!("WIP on {branch}");

        match repo.stash_save(&signature, &message, None) {
            Ok(oid) => {
                tracing::debug!(%oid, "stashed");
                Ok(())
            }
            Err(e) if e.code() == ErrorCode::NotFound => {
                Err(StrataError::Refused("no local changes to save".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn delete_branch(&mut self, name: &str) -> Result<()> {
        let repo = self.open()?;
        let mut branch = local_branch(&repo, name)?;
        if branch.is_head() {
            return Err(StrataError::Refused(format!(
                "cannot erode the current stratum '{name}'"
            )));
        }

        let tip = branch.get().peel_to_commit()?.id();
        let merged = match head_commit(&repo)? {
            Some(head) => head.id() == tip || repo.graph_descendant_of(head.id(), tip)?,
            None => false,
        };
        if !merged {
            return Err(StrataError::Refused(format!(
                "stratum '{name}' is not fully fused into the current stratum"
            )));
        }

        branch.delete()?;
        tracing::debug!(name, "deleted stratum");
        Ok(())
    }

    fn delete_remote_branch(&mut self, remote: &str, name: &str) -> Result<()> {
        tracing::debug!(remote, name, "delete remote stratum");
        self.push_refspec(remote, &format!(":refs/heads/{name}"))
    }

    fn add_remote(&mut self, name: &str, url: &str) -> Result<()> {
        let repo = self.open()?;
        repo.remote(name, url)?;
        tracing::debug!(name, url, "added remote");
        Ok(())
    }

    fn push(&mut self, remote: &str, branch: &str) -> Result<()> {
        {
            let repo = self.open()?;
            if repo.find_branch(branch, BranchType::Local).is_err() {
                return Err(StrataError::Refused(format!(
                    "src refspec {branch} does not match any stratum"
                )));
            }
        }
        tracing::debug!(remote, branch, "push");
        self.push_refspec(remote, &format!("refs/heads/{branch}:refs/heads/{branch}"))
    }

    fn fetch(&mut self, remote_name: &str) -> Result<()> {
        let repo = self.open()?;
        let mut remote = repo.find_remote(remote_name)?;
        let config = repo.config()?;
        let progress = progress_bar(self.quiet, &format!("Unearthing from {remote_name}"));
        tracing::debug!(remote = remote_name, "fetch");

        let result = {
            let mut opts = FetchOptions::new();
            opts.remote_callbacks(remote_callbacks(&config, progress.as_ref(), None));
            remote.fetch(&[] as &[&str], Some(&mut opts), None)
        };
        if let Some(pb) = progress {
            pb.finish_and_clear();
        }
        Ok(result?)
    }
}
