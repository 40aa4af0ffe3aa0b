use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn db_path(&self) -> PathBuf {
        self.dir.path().join("perf.db")
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_perftrack"));
        command
            .arg("--db")
            .arg(self.db_path())
            .arg("--config")
            .arg(self.config_path())
            .arg("--log-dir")
            .arg(self.dir.path().join("logs"));
        command.args(args);
        match command.output() {
            Ok(output) => output,
            Err(err) => panic!("failed to run perftrack {args:?}: {err}"),
        }
    }

    fn config_path(&self) -> PathBuf {
        let path = self.dir.path().join("perftrack.toml");
        if !path.exists() {
            std::fs::write(&path, "log_level = \"info\"\n").unwrap();
        }
        path
    }

    fn ok(&self, args: &[&str]) -> Value {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "perftrack {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_json(&output.stdout)
    }

    fn fail(&self, args: &[&str]) -> Value {
        let output = self.run(args);
        assert!(!output.status.success(), "perftrack {args:?} should fail");
        parse_json(&output.stderr)
    }

    fn add(&self, name: &str, date: &str, metric: &str, score: &str, period: &str) -> i64 {
        let value = self.ok(&[
            "add", "--name", name, "--date", date, "--metric", metric, "--score", score,
            "--period", period,
        ]);
        value["id"].as_i64().unwrap()
    }
}

fn parse_json(bytes: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(value) => value,
        Err(err) => panic!(
            "output is not JSON: {err}\n{}",
            String::from_utf8_lossy(bytes)
        ),
    }
}

fn ids(value: &Value) -> Vec<i64> {
    value["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|record| record["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn init_creates_database() {
    let ws = Workspace::new();
    let value = ws.ok(&["init"]);
    assert_eq!(value["ok"], true);
    assert!(Path::new(&ws.db_path()).exists());
}

#[test]
fn add_list_update_delete_round() {
    let ws = Workspace::new();
    let alice = ws.add("Alice", "2024-02-01", "Sales", "70", "Daily");
    let bob = ws.add("Bob", "2024-02-01", "Sales", "-5", "weekly");

    let listed = ws.ok(&["list"]);
    assert_eq!(ids(&listed), vec![alice, bob]);
    assert_eq!(listed["records"][1]["score"], -5);
    assert_eq!(listed["records"][1]["period"], "Weekly");

    let alice_text = alice.to_string();
    ws.ok(&[
        "update", "--id", &alice_text, "--name", "Alice", "--date", "2024-02-02", "--metric",
        "Attendance", "--score", "99", "--period", "Monthly",
    ]);
    let listed = ws.ok(&["list", "--name", "Alice"]);
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["records"][0]["metric"], "Attendance");
    assert_eq!(listed["records"][0]["date"], "2024-02-02");

    ws.ok(&["delete", "--id", &alice_text]);
    assert_eq!(ids(&ws.ok(&["list"])), vec![bob]);

    let missing = ws.fail(&["delete", "--id", &alice_text]);
    assert_eq!(missing["kind"], "not_found");
}

#[test]
fn malformed_input_is_reported_and_not_stored() {
    let ws = Workspace::new();
    let err = ws.fail(&[
        "add", "--name", "Alice", "--date", "2024-13-01", "--metric", "Sales", "--score", "1",
        "--period", "Daily",
    ]);
    assert_eq!(err["kind"], "invalid_input");
    assert_eq!(ws.ok(&["list"])["count"], 0);
}

#[test]
fn search_without_matches_is_no_data() {
    let ws = Workspace::new();
    ws.add("Alice", "2024-02-01", "Sales", "70", "Daily");

    let err = ws.fail(&["search", "--name", "Carol"]);
    assert_eq!(err["kind"], "no_data");

    let hits = ws.ok(&["search", "--name", "Alice", "--period", "daily"]);
    assert_eq!(hits["count"], 1);
}

#[test]
fn chart_prints_one_series_per_metric() {
    let ws = Workspace::new();
    ws.add("Alice", "2024-02-03", "Sales", "30", "Daily");
    ws.add("Alice", "2024-02-01", "Sales", "10", "Daily");
    ws.add("Alice", "2024-02-02", "Attendance", "90", "Daily");

    let value = ws.ok(&["chart", "--name", "Alice", "--period", "daily", "--style", "bar"]);
    let series = value["chart"]["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["metric"], "Sales");
    assert_eq!(series[0]["points"][0]["date"], "2024-02-01");
    assert_eq!(value["chart"]["style"], "bar");

    let err = ws.fail(&["chart", "--name", "Alice", "--period", "monthly"]);
    assert_eq!(err["kind"], "no_data");
}

#[test]
fn export_writes_rows_and_rejects_empty_store() {
    let ws = Workspace::new();
    let target = ws.dir.path().join("records");
    let target_text = target.to_str().unwrap();

    let err = ws.fail(&["export", "--format", "csv", "--output", target_text]);
    assert_eq!(err["kind"], "no_data");
    assert!(!target.with_extension("csv").exists());

    ws.add("Alice", "2024-02-01", "Sales", "70", "Daily");
    ws.add("Bob", "2024-02-01", "Sales", "60", "Daily");
    let value = ws.ok(&["export", "--format", "csv", "--output", target_text]);
    assert_eq!(value["rows"], 2);

    let text = std::fs::read_to_string(target.with_extension("csv")).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("id,name,date,metric,score,period"));
}

#[test]
fn list_name_filter_trims_like_search() {
    let ws = Workspace::new();
    ws.add("Alice", "2024-02-01", "Sales", "70", "Daily");
    ws.add("Bob", "2024-02-01", "Sales", "60", "Daily");

    let listed = ws.ok(&["list", "--name", "  Alice "]);
    assert_eq!(listed["count"], 1);
    let searched = ws.ok(&["search", "--name", "  Alice "]);
    assert_eq!(listed["records"], searched["records"]);
}

#[test]
fn export_accepts_excel_alias() {
    let ws = Workspace::new();
    ws.add("Alice", "2024-02-01", "Sales", "70", "Daily");
    let target = ws.dir.path().join("sheet");

    let value = ws.ok(&["export", "--format", "excel", "--output", target.to_str().unwrap()]);
    assert_eq!(value["format"], "xlsx");
    assert!(target.with_extension("xlsx").exists());
}
