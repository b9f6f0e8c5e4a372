use crate::common::Sandbox;
use predicates::prelude::*;

#[test]
fn failure_outside_vault_exits_one() {
    let sandbox = Sandbox::new();
    sandbox
        .strata()
        .arg("excavate")
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with(
            "❌ Excavation failed: no StrataVault found",
        ));
}

#[test]
fn lenient_exit_flag_keeps_zero_status() {
    let sandbox = Sandbox::new();
    sandbox
        .strata()
        .args(["--lenient-exit", "map-strata"])
        .assert()
        .code(0)
        .stderr(predicate::str::starts_with("❌ Mapping failed: "));
}

#[test]
fn lenient_exit_from_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .strata()
        .env("STRATA_LENIENT_EXIT", "1")
        .arg("excavate")
        .assert()
        .code(0);
}

#[test]
fn invalid_stratum_name_exits_two() {
    let sandbox = Sandbox::with_vault();
    sandbox
        .strata()
        .args(["stratum-shift", "bad..name"])
        .assert()
        .code(2)
        .stderr("❌ Stratum shift failed: 'bad..name' is not a valid stratum name\n");
}

#[test]
fn missing_required_argument_is_a_usage_error() {
    let sandbox = Sandbox::new();
    sandbox
        .strata()
        .arg("fossilize")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<MESSAGE>"));
}
