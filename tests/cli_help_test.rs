//! CLI integration tests

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn promptops(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("promptops").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.env_remove("PROMPTOPS_LOG");
    cmd
}

#[test]
fn test_root_help() {
    Command::cargo_bin("promptops")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("import"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("compile"));
}

#[test]
fn test_import_help_lists_plans() {
    Command::cargo_bin("promptops")
        .unwrap()
        .args(["import", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--plan"))
        .stdout(predicate::str::contains("--diff"));
}

#[test]
fn test_init_then_list() {
    let dir = TempDir::new().unwrap();
    promptops(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(dir.path().join("nexus/appData.json").exists());

    promptops(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"framework\""))
        .stdout(predicate::str::contains("\"default\": true"));

    promptops(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));
}

#[test]
fn test_list_without_init_fails() {
    let dir = TempDir::new().unwrap();
    promptops(&dir)
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[STO001]"));
}

#[test]
fn test_import_rejects_non_zip() {
    let dir = TempDir::new().unwrap();
    promptops(&dir).arg("init").assert().success();

    let file = dir.path().join("not-a-zip.zip");
    std::fs::write(&file, "plain text").unwrap();

    promptops(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[IMP001]"));
}

#[test]
fn test_export_then_import_round_trip() {
    let dir = TempDir::new().unwrap();
    promptops(&dir).arg("init").assert().success();

    let archive = dir.path().join("out.zip");
    promptops(&dir)
        .arg("export")
        .arg("-o")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported full archive"));
    assert!(archive.exists());

    promptops(&dir)
        .arg("import")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("imported"));
}

#[test]
fn test_export_unknown_prompt_fails() {
    let dir = TempDir::new().unwrap();
    promptops(&dir).arg("init").assert().success();

    promptops(&dir)
        .args(["export", "--prompt", "missing-id", "-o"])
        .arg(dir.path().join("x.zip"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[INT001]"));
}

#[test]
fn test_validate_front_matter_document() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("prompt.md");
    std::fs::write(
        &file,
        "---\nid: 11111111-1111-1111-8111-111111111111\n---\nHello {{name}}",
    )
    .unwrap();

    promptops(&dir)
        .args(["validate", "--kind", "prompt"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\nversion: 2\n"))
        .stdout(predicate::str::contains("Hello {{name}}"));
}

#[test]
fn test_validate_rejects_bad_document() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("fw.yaml");
    std::fs::write(&file, "id: nope\nname: x\n").unwrap();

    promptops(&dir)
        .args(["validate", "--kind", "framework"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[SCH001]"));
}

#[test]
fn test_compile_unknown_prompt_fails() {
    let dir = TempDir::new().unwrap();
    promptops(&dir).arg("init").assert().success();

    promptops(&dir)
        .args(["compile", "missing", "--var", "a=b"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[INT001]"));
}

#[test]
fn test_save_compile_remove_prompt() {
    let dir = TempDir::new().unwrap();
    promptops(&dir).arg("init").assert().success();

    let id = "33333333-3333-4333-8333-333333333333";
    let file = dir.path().join("greeting.md");
    std::fs::write(&file, format!("---\nid: {}\n---\nHello {{{{name}}}}", id)).unwrap();

    promptops(&dir)
        .args(["save", "--kind", "prompt"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Added prompt"));

    promptops(&dir)
        .args(["save", "--kind", "prompt"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated prompt"));

    promptops(&dir)
        .args(["compile", id, "--var", "name=Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello Ada"));

    promptops(&dir)
        .args(["remove", id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed prompt"));

    promptops(&dir)
        .args(["remove", id])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[INT001]"));
}
