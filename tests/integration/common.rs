use assert_cmd::Command;
use git2::Repository;
use std::path::Path;
use tempfile::TempDir;

const STRATA_ENV: [&str; 5] = [
    "STRATA_REMOTE",
    "STRATA_BRANCH",
    "STRATA_PLAIN",
    "STRATA_QUIET",
    "STRATA_LENIENT_EXIT",
];

/// A vault directory plus an isolated home so no user config leaks in.
pub struct Sandbox {
    pub home: TempDir,
    pub vault: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
            vault: tempfile::tempdir().unwrap(),
        }
    }

    /// A sandbox whose vault has been created and given a committer identity.
    pub fn with_vault() -> Self {
        let sandbox = Self::new();
        sandbox.strata().arg("create-vault").assert().success();
        let repo = sandbox.repo();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Strata Tester").unwrap();
        config.set_str("user.email", "tester@strata.invalid").unwrap();
        sandbox
    }

    pub fn path(&self) -> &Path {
        self.vault.path()
    }

    pub fn strata(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").unwrap();
        cmd.current_dir(self.vault.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"))
            .env_remove("RUST_LOG")
            .arg("--quiet");
        for name in STRATA_ENV {
            cmd.env_remove(name);
        }
        cmd
    }

    pub fn write(&self, path: &str, content: &str) {
        let full = self.vault.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn fossilize(&self, message: &str) {
        self.strata().args(["fossilize", message]).assert().success();
    }

    pub fn repo(&self) -> Repository {
        Repository::open(self.vault.path()).unwrap()
    }
}
