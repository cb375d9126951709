use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("autoentry.toml"),
        r#"
[pages]
root = "src/pages"
module_prefix = "./pages"

[entries]
baseline = ["core"]

[entries.manual]
main = ["core"]
"#,
    )
    .unwrap();
    touch(dir.path(), "src/pages/users/index.js");
    touch(dir.path(), "src/pages/users/show/index.js");
    dir
}

fn autoentry() -> Command {
    Command::cargo_bin("autoentry").unwrap()
}

#[test]
fn build_prints_entry_map() {
    let dir = project();

    autoentry()
        .arg("--config")
        .arg(dir.path().join("autoentry.toml"))
        .args(["build", "--compact"])
        .assert()
        .success()
        .stdout(concat!(
            r#"{"main":["core"],"#,
            r#""users":["core","./pages/users/index.js"],"#,
            r#""users.show":["core","./pages/users/index.js","./pages/users/show/index.js"]}"#,
            "\n"
        ));
}

#[test]
fn build_writes_output_file() {
    let dir = project();
    let out = dir.path().join("public/entries.json");

    autoentry()
        .arg("--config")
        .arg(dir.path().join("autoentry.toml"))
        .arg("build")
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json["users.show"][2], "./pages/users/show/index.js");
}

#[test]
fn malformed_page_fails_build() {
    let dir = project();
    touch(dir.path(), "src/pages/v1.2/index.js");

    autoentry()
        .arg("--config")
        .arg(dir.path().join("autoentry.toml"))
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed page path"));
}

#[test]
fn check_lists_chains() {
    let dir = project();

    autoentry()
        .arg("--config")
        .arg(dir.path().join("autoentry.toml"))
        .args(["check", "--tree"])
        .assert()
        .success()
        .stderr(predicate::str::contains("users.show"))
        .stderr(predicate::str::contains("Entry map is valid"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();

    autoentry()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("autoentry.toml").exists());

    autoentry()
        .arg("init")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
