use crate::common::Sandbox;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    let sandbox = Sandbox::new();
    sandbox
        .strata()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("defaults.remote: origin <- default"))
        .stdout(predicate::str::contains("defaults.branch: master <- default"))
        .stdout(predicate::str::contains("output.quiet: true <- CLI flag (--quiet)"));
}

#[test]
fn vault_config_applies_plain_output() {
    let sandbox = Sandbox::new();
    sandbox.write(".strata.toml", "[output]\nplain = true\n");

    sandbox
        .strata()
        .arg("create-vault")
        .assert()
        .success()
        .stdout("ok: New StrataVault created successfully\n");

    sandbox
        .strata()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output.plain: true <- vault config ("));
}

#[test]
fn user_config_sets_default_remote() {
    let sandbox = Sandbox::new();
    let user_dir = sandbox.home.path().join(".config").join("strata");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("config.toml"), "[defaults]\nremote = \"backup\"\n").unwrap();

    sandbox
        .strata()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults.remote: backup <- user config ("));
}

#[test]
fn environment_overrides_vault_config() {
    let sandbox = Sandbox::new();
    sandbox.write(".strata.toml", "[defaults]\nbranch = \"main\"\n");

    sandbox
        .strata()
        .env("STRATA_BRANCH", "trunk")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.branch: trunk <- env var (STRATA_BRANCH)",
        ));
}

#[test]
fn broken_config_file_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write(".strata.toml", "[output\nplain = true\n");

    sandbox
        .strata()
        .arg("excavate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid vault config"));
}

#[test]
fn vault_config_found_from_subdirectory() {
    let sandbox = Sandbox::with_vault();
    sandbox.write(".strata.toml", "[output]\nplain = true\n");
    sandbox.write("src/deep/file.txt", "nested\n");
    let nested = sandbox.path().join("src").join("deep");

    sandbox
        .strata()
        .current_dir(&nested)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".strata.toml"))
        .stdout(predicate::str::contains("output.plain: true <- vault config ("));

    sandbox
        .strata()
        .current_dir(&nested)
        .arg("map-strata")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Available strata:\n"));
}
