pub mod provenance;
pub mod resolve;
pub mod schema;
pub mod show;

use provenance::ProvenanceMap;
use std::path::PathBuf;

pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_BRANCH: &str = "master";

/// Fully resolved configuration with every layer applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    // Remote targets
    pub remote: String,
    pub branch: String,

    // Output
    pub plain: bool,
    pub quiet: bool,

    // Exit policy
    pub lenient_exit: bool,

    // Provenance
    pub provenance: ProvenanceMap,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            plain: false,
            quiet: false,
            lenient_exit: false,
            provenance: ProvenanceMap::new(),
            loaded_files: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Exit status for a failed command under the configured policy.
    pub fn failure_exit_code(&self, code: i32) -> i32 {
        if self.lenient_exit {
            0
        } else {
            code
        }
    }
}
