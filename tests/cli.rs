use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quickdev(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quickdev").unwrap();
    cmd.env("QUICKDEV_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = quickdev(home)
        .args(args)
        .args(["--output", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    quickdev(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("timer"))
        .stdout(predicate::str::contains("summary"));
}

#[test]
fn test_project_add_and_list() {
    let home = TempDir::new().unwrap();
    quickdev(&home)
        .args(["project", "add", "Dashboard", "--color", "#10b981"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project: Dashboard"));

    let listed = json(&home, &["project", "list"]);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["items"][0]["name"], "Dashboard");
    assert_eq!(listed["items"][0]["color"], "#10b981");
    assert_eq!(listed["items"][0]["total_seconds"], 0);
}

#[test]
fn test_project_add_rejects_bad_color() {
    let home = TempDir::new().unwrap();
    quickdev(&home)
        .args(["project", "add", "Dashboard", "--color", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn test_task_add_and_list() {
    let home = TempDir::new().unwrap();
    json(&home, &["project", "add", "Dashboard"]);

    let task = json(
        &home,
        &["task", "add", "Auth flow", "-p", "dashboard", "--priority", "high"],
    );
    assert_eq!(task["title"], "Auth flow");
    assert_eq!(task["status"], "not_started");
    assert_eq!(task["position"], 0);

    let listed = json(&home, &["task", "list", "-p", "Dashboard"]);
    assert_eq!(listed["list"], "Dashboard");
    assert_eq!(listed["count"], 1);
}

#[test]
fn test_task_for_missing_project_fails() {
    let home = TempDir::new().unwrap();
    quickdev(&home)
        .args(["task", "add", "Orphan", "-p", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_completed_tasks_hidden_by_default() {
    let home = TempDir::new().unwrap();
    json(&home, &["project", "add", "Dashboard"]);
    let task = json(&home, &["task", "add", "Ship it", "-p", "Dashboard"]);
    let id = task["id"].as_str().unwrap();

    json(&home, &["task", "status", id, "done"]);

    assert_eq!(json(&home, &["task", "list"])["count"], 0);
    assert_eq!(json(&home, &["task", "list", "--all"])["count"], 1);
}

#[test]
fn test_project_and_task_edit() {
    let home = TempDir::new().unwrap();
    json(&home, &["project", "add", "Dashboard"]);
    let task = json(&home, &["task", "add", "Auth", "-p", "Dashboard"]);
    let id = task["id"].as_str().unwrap();

    let edited = json(
        &home,
        &["project", "edit", "Dashboard", "--name", "Admin", "--inactive"],
    );
    assert_eq!(edited["name"], "Admin");
    assert_eq!(edited["is_active"], false);

    let edited = json(&home, &["task", "edit", id, "--title", "Login", "--priority", "high"]);
    assert_eq!(edited["title"], "Login");
    assert_eq!(edited["priority"], "high");

    json(&home, &["task", "status", id, "done"]);
    let shown = json(&home, &["project", "show", "Admin"]);
    assert_eq!(shown["progress"]["completion_percent"], 100);

    let summary = json(&home, &["summary"]);
    assert_eq!(summary["project_count"], 1);
    assert_eq!(summary["active_projects"], 0);
    assert_eq!(summary["tasks"]["completed"], 1);

    quickdev(&home)
        .args(["project", "edit", "Admin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to change"));
}

#[test]
fn test_log_add_feeds_list_and_summary() {
    let home = TempDir::new().unwrap();
    json(&home, &["project", "add", "Dashboard"]);

    let log = json(&home, &["log", "add", "-p", "Dashboard", "-d", "25m", "-n", "auth"]);
    assert_eq!(log["duration_seconds"], 1500);

    let listed = json(&home, &["log", "list"]);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["total_seconds"], 1500);

    let summary = json(&home, &["summary"]);
    assert_eq!(summary["total_seconds"], 1500);
    assert_eq!(summary["log_count"], 1);
    assert_eq!(summary["by_project"][0]["name"], "Dashboard");
    assert_eq!(summary["by_project"][0]["seconds"], 1500);

    let projects = json(&home, &["project", "list"]);
    assert_eq!(projects["items"][0]["total_seconds"], 1500);
}

#[test]
fn test_log_add_rejects_bad_duration() {
    let home = TempDir::new().unwrap();
    json(&home, &["project", "add", "Dashboard"]);

    quickdev(&home)
        .args(["log", "add", "-p", "Dashboard", "-d", "later"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_chart_periods() {
    let home = TempDir::new().unwrap();

    let week = json(&home, &["chart"]);
    assert_eq!(week["period"], "week");
    assert_eq!(week["buckets"].as_array().unwrap().len(), 7);

    let year = json(&home, &["chart", "--period", "year"]);
    assert_eq!(year["buckets"].as_array().unwrap().len(), 12);

    quickdev(&home)
        .args(["chart", "--period", "decade"])
        .assert()
        .failure();
}

#[test]
fn test_config_init_and_path() {
    let home = TempDir::new().unwrap();

    quickdev(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    quickdev(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.yaml").exists());

    quickdev(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    quickdev(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro_minutes: 25"));
}

#[test]
fn test_config_default_output_is_used() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "general:\n  default_output: json\n",
    )
    .unwrap();

    quickdev(&home)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_seconds\": 0"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    quickdev(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quickdev"));

    quickdev(&home)
        .args(["completions", "zsh", "--install"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quickdev completions zsh"));
}
