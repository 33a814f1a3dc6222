use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn seeded_home() -> TempDir {
    let dir = tempdir().unwrap();
    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 sample projects"));
    dir
}

#[test]
fn test_list_without_store_is_empty() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found."));
}

#[test]
fn test_list_hides_hidden_projects() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1  Project Alpha"))
        .stdout(predicate::str::contains("Project Gamma"))
        .stdout(predicate::str::contains("Project Delta").not());
}

#[test]
fn test_list_all_marks_hidden_projects() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4  Project Delta  (hidden)"));
}

#[test]
fn test_list_preserves_file_order() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(
        data.join("projects.json"),
        r#"[{"id":"b","name":"Second"},{"id":"a","name":"First"}]"#,
    )
    .unwrap();

    let output = cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "list"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "b  Second\na  First\n");
}

#[test]
fn test_show_prints_json() {
    let dir = seeded_home();

    let output = cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "show", "3"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let project: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(project["name"], "Project Gamma");
    assert_eq!(project["techStack"], "D3.js, Svelte, Python, Flask");
}

#[test]
fn test_show_unknown_id_fails() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_data_dir_from_config() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("elsewhere");
    fs::write(
        dir.path().join("config.toml"),
        format!("data_dir = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "init"])
        .assert()
        .success();

    assert!(data.join("projects.json").exists());
}

fn stored_projects(dir: &TempDir) -> Vec<serde_json::Value> {
    let raw = fs::read_to_string(dir.path().join("data").join("projects.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_add_appends_project() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args([
            "projects",
            "add",
            "Project Omega",
            "--tech-stack",
            "Rust, Ratatui",
            "--live-url",
            "https://omega.example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added project "))
        .stdout(predicate::str::contains(": Project Omega"));

    let projects = stored_projects(&dir);
    assert_eq!(projects.len(), 5);
    let added = &projects[4];
    assert_eq!(added["name"], "Project Omega");
    assert_eq!(added["techStack"], "Rust, Ratatui");
    assert!(added["id"].as_str().unwrap().parse::<i64>().is_ok());
}

#[test]
fn test_add_rejects_invalid_url() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "add", "Broken", "--repo-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("repoUrl must be a valid URL"));

    assert_eq!(stored_projects(&dir).len(), 4);
}

#[test]
fn test_edit_updates_fields() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args([
            "projects",
            "edit",
            "4",
            "--name",
            "Project Delta 2",
            "--hidden",
            "false",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated project 4: Project Delta 2"));

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4  Project Delta 2"));
}

#[test]
fn test_edit_requires_a_field() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "edit", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_edit_unknown_project_fails() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "edit", "99", "--name", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project not found: 99"));
}

#[test]
fn test_remove_requires_confirmation() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "remove", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Refusing to delete project \"Project Beta\" without --yes",
        ));
    assert_eq!(stored_projects(&dir).len(), 4);

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .args(["projects", "remove", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project 2: Project Beta"));

    let ids: Vec<_> = stored_projects(&dir)
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["1", "3", "4"]);
}

#[test]
fn test_mutations_are_logged_to_stderr() {
    let dir = seeded_home();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .env_remove("FOLIO_LOG")
        .args(["projects", "edit", "1", "--tech-stack", "Rust"])
        .assert()
        .success()
        .stderr(predicate::str::contains("project updated"));
}
