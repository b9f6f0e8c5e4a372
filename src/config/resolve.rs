use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::ResolvedConfig;
use crate::errors::{Result, StrataError};
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_FILE: &str = ".strata.toml";

const SETTING_KEYS: [&str; 5] = [
    "defaults.remote",
    "defaults.branch",
    "output.plain",
    "output.quiet",
    "behavior.lenient_exit",
];

/// CLI overrides extracted from global flags.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub plain: bool,
    pub quiet: bool,
    pub lenient_exit: bool,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/strata/config.toml)
/// 3. Vault config (nearest .strata.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_with(working_dir, cli, find_user_config(), |name| {
        std::env::var(name).ok()
    })
}

/// Layering with the user config path and environment injected.
pub fn resolve_with<F>(
    working_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<PathBuf>,
    env: F,
) -> Result<ResolvedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ResolvedConfig::default();
    let mut prov = ProvenanceMap::new();
    let mut loaded_files = Vec::new();

    for key in SETTING_KEYS {
        prov.set(key, Source::Default);
    }

    if let Some(path) = user_config.filter(|p| p.exists()) {
        let file = load_file(&path, "user")?;
        apply_file_config(&mut config, &file, Source::UserConfig(path.clone()), &mut prov);
        loaded_files.push(path);
    }

    if let Some(path) = find_project_config(working_dir) {
        let file = load_file(&path, "vault")?;
        apply_file_config(
            &mut config,
            &file,
            Source::ProjectConfig(path.clone()),
            &mut prov,
        );
        loaded_files.push(path);
    }

    apply_env_vars(&mut config, &mut prov, env);
    apply_cli_overrides(&mut config, cli, &mut prov);

    config.provenance = prov;
    config.loaded_files = loaded_files;
    Ok(config)
}

fn load_file(path: &Path, kind: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        StrataError::Config(format!("Could not read {kind} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content)
        .map_err(|e| StrataError::Config(format!("Invalid {kind} config {}: {e}", path.display())))
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("strata").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn apply_file_config(
    config: &mut ResolvedConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) {
    if let Some(ref remote) = file.defaults.remote {
        config.remote = remote.clone();
        prov.set("defaults.remote", source.clone());
    }
    if let Some(ref branch) = file.defaults.branch {
        config.branch = branch.clone();
        prov.set("defaults.branch", source.clone());
    }
    if let Some(plain) = file.output.plain {
        config.plain = plain;
        prov.set("output.plain", source.clone());
    }
    if let Some(quiet) = file.output.quiet {
        config.quiet = quiet;
        prov.set("output.quiet", source.clone());
    }
    if let Some(lenient_exit) = file.behavior.lenient_exit {
        config.lenient_exit = lenient_exit;
        prov.set("behavior.lenient_exit", source);
    }
}

fn apply_env_vars<F>(config: &mut ResolvedConfig, prov: &mut ProvenanceMap, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = env("STRATA_REMOTE").filter(|v| !v.is_empty()) {
        config.remote = val;
        prov.set("defaults.remote", Source::EnvVar("STRATA_REMOTE".into()));
    }
    if let Some(val) = env("STRATA_BRANCH").filter(|v| !v.is_empty()) {
        config.branch = val;
        prov.set("defaults.branch", Source::EnvVar("STRATA_BRANCH".into()));
    }
    if let Some(flag) = env_flag(&env, "STRATA_PLAIN") {
        config.plain = flag;
        prov.set("output.plain", Source::EnvVar("STRATA_PLAIN".into()));
    }
    if let Some(flag) = env_flag(&env, "STRATA_QUIET") {
        config.quiet = flag;
        prov.set("output.quiet", Source::EnvVar("STRATA_QUIET".into()));
    }
    if let Some(flag) = env_flag(&env, "STRATA_LENIENT_EXIT") {
        config.lenient_exit = flag;
        prov.set(
            "behavior.lenient_exit",
            Source::EnvVar("STRATA_LENIENT_EXIT".into()),
        );
    }
}

fn env_flag<F>(env: &F, name: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let val = env(name)?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            tracing::warn!("Ignoring {name}={other}: expected a boolean");
            None
        }
    }
}

fn apply_cli_overrides(config: &mut ResolvedConfig, cli: &CliOverrides, prov: &mut ProvenanceMap) {
    if cli.plain {
        config.plain = true;
        prov.set("output.plain", Source::CliFlag("--plain".into()));
    }
    if cli.quiet {
        config.quiet = true;
        prov.set("output.quiet", Source::CliFlag("--quiet".into()));
    }
    if cli.lenient_exit {
        config.lenient_exit = true;
        prov.set(
            "behavior.lenient_exit",
            Source::CliFlag("--lenient-exit".into()),
        );
    }
}
