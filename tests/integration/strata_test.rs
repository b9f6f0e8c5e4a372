use crate::common::Sandbox;
use predicates::prelude::*;

/// Vault with one commit on the default stratum.
fn seeded() -> Sandbox {
    let sandbox = Sandbox::with_vault();
    sandbox.write("a.txt", "base\n");
    sandbox.fossilize("base");
    sandbox
}

fn trunk(sandbox: &Sandbox) -> String {
    sandbox.repo().head().unwrap().shorthand().unwrap().to_string()
}

#[test]
fn stratum_shift_then_map_marks_new_stratum() {
    let sandbox = seeded();
    let trunk = trunk(&sandbox);

    sandbox
        .strata()
        .args(["stratum-shift", "feature"])
        .assert()
        .code(0)
        .stdout("🌿 Created new stratum: feature\n");

    let output = sandbox.strata().arg("map-strata").output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("🗺️  Available strata:\n"));
    assert!(stdout.contains("  ✨ feature\n"));
    assert!(stdout.contains(&format!("  📍 {trunk}\n")));
    assert_eq!(stdout.matches('✨').count(), 1);
}

#[test]
fn shift_to_existing_stratum() {
    let sandbox = seeded();
    let trunk = trunk(&sandbox);
    sandbox.strata().args(["stratum-shift", "feature"]).assert().success();

    sandbox
        .strata()
        .args(["shift-to", &trunk])
        .assert()
        .code(0)
        .stdout(format!("🔄 Shifted to stratum: {trunk}\n"));
    assert_eq!(sandbox.repo().head().unwrap().shorthand(), Some(trunk.as_str()));
}

#[test]
fn shift_to_missing_stratum_fails() {
    let sandbox = seeded();
    sandbox
        .strata()
        .args(["shift-to", "nowhere"])
        .assert()
        .code(1)
        .stderr("❌ Shift failed: stratum 'nowhere' not found\n");
}

#[test]
fn fuse_strata_creates_merge_commit() {
    let sandbox = seeded();
    let trunk = trunk(&sandbox);
    sandbox.strata().args(["stratum-shift", "feature"]).assert().success();
    sandbox.write("feature.txt", "feature\n");
    sandbox.fossilize("feature work");
    sandbox.strata().args(["shift-to", &trunk]).assert().success();

    sandbox
        .strata()
        .args(["fuse-strata", "feature"])
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("🔥 Fused stratum feature:\n  🪢 "))
        .stdout(predicate::str::ends_with(" Merge branch 'feature'\n"));

    let repo = sandbox.repo();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.parent_count(), 2);
    assert!(sandbox.path().join("feature.txt").exists());

    sandbox
        .strata()
        .args(["fuse-strata", "feature"])
        .assert()
        .code(0)
        .stdout("ℹ️  Stratum feature is already fused\n");
}

#[test]
fn fuse_unrelated_strata_requires_flag() {
    let sandbox = seeded();
    {
        let repo = sandbox.repo();
        let signature = repo.signature().unwrap();
        let blob = repo.blob(b"elsewhere\n").unwrap();
        let mut builder = repo.treebuilder(None).unwrap();
        builder.insert("other.txt", blob, 0o100644).unwrap();
        let tree = repo.find_tree(builder.write().unwrap()).unwrap();
        repo.commit(
            Some("refs/heads/orphan"),
            &signature,
            &signature,
            "orphan root",
            &tree,
            &[],
        )
        .unwrap();
    }

    sandbox
        .strata()
        .args(["fuse-strata", "orphan"])
        .assert()
        .code(1)
        .stderr("❌ Fusion failed: refusing to merge unrelated histories\n");

    sandbox
        .strata()
        .args(["fuse-strata", "orphan", "--allow-unrelated-histories"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Merge branch 'orphan'"));
    assert!(sandbox.path().join("other.txt").exists());
}

#[test]
fn erode_strata_deletes_merged_stratum() {
    let sandbox = seeded();
    let trunk = trunk(&sandbox);
    sandbox.strata().args(["stratum-shift", "spent"]).assert().success();
    sandbox.strata().args(["shift-to", &trunk]).assert().success();

    sandbox
        .strata()
        .args(["erode-strata", "spent"])
        .assert()
        .code(0)
        .stdout("🪨 Eroded stratum: spent\n");
    assert!(sandbox
        .repo()
        .find_branch("spent", git2::BranchType::Local)
        .is_err());

    sandbox
        .strata()
        .args(["erode-strata", &trunk])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot erode the current stratum"));
}
