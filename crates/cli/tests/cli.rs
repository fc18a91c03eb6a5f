use assert_cmd::Command;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const CATALOG: &str = r#"{
  "Germany": {
    "lewis": { "linear_active": 0.9, "multi_active": 0.1, "reactive": 0.2 },
    "hall": { "context": 0.1, "time": 0.2, "space": 0.8 }
  },
  "Brazil": {
    "lewis": { "linear_active": 0.2, "multi_active": 0.9, "reactive": 0.3 },
    "hall": { "context": 0.8, "time": 0.9, "space": 0.2 }
  },
  "Japan": {
    "lewis": { "linear_active": 0.3, "multi_active": 0.1, "reactive": 0.9 },
    "hall": { "context": 0.9, "time": 0.3, "space": 0.6 }
  },
  "Finland": {
    "lewis": { "linear_active": 0.7, "multi_active": 0.1, "reactive": 0.8 }
  }
}"#;

const ROSTER: &str = r#"[
  { "id": "anna", "country": "Germany" },
  { "id": "bruno", "country": "Brazil" },
  { "id": "chie", "country": "Japan" },
  { "id": "dieter", "country": "Germany" },
  { "id": "elisa", "country": "Brazil" },
  { "id": "fumi", "country": "Japan" }
]"#;

fn workspace(roster: &str) -> TempDir {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("catalog.json"), CATALOG).unwrap();
    fs::write(temp.path().join("roster.json"), roster).unwrap();
    temp
}

#[allow(deprecated)]
fn run_cli(workdir: &Path, args: &[&str]) -> (bool, Value) {
    let output = Command::cargo_bin("culture-groups")
        .expect("binary")
        .current_dir(workdir)
        .args(args)
        .args(["--roster", "roster.json", "--catalog", "catalog.json", "--json"])
        .output()
        .expect("command run");

    let body: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    (output.status.success(), body)
}

fn groups(body: &Value) -> Vec<Vec<String>> {
    serde_json::from_value(body["data"]["groups"].clone()).unwrap()
}

#[test]
fn cli_seeded_partition_is_reproducible() {
    let temp = workspace(ROSTER);
    let args = [
        "partition",
        "--framework",
        "lewis",
        "--size",
        "3",
        "--seed",
        "workshop-42",
    ];

    let (ok, first) = run_cli(temp.path(), &args);
    assert!(ok, "partition failed: {first}");
    assert_eq!(first["status"], "ok");
    assert_eq!(first["data"]["outcome"]["path"], "genetic");

    let first_groups = groups(&first);
    assert_eq!(first_groups.len(), 2);
    assert!(first_groups.iter().all(|g| g.len() == 3));

    let (_, second) = run_cli(temp.path(), &args);
    assert_eq!(groups(&second), first_groups);
}

#[test]
fn cli_partition_without_seed_reports_greedy() {
    let temp = workspace(ROSTER);
    let (ok, body) = run_cli(
        temp.path(),
        &["partition", "--framework", "hall", "--size", "flexible"],
    );
    // Finland has no Hall data but nobody in the roster is from Finland
    assert!(ok, "partition failed: {body}");
    assert_eq!(body["data"]["outcome"]["path"], "fallback");
    assert_eq!(body["data"]["outcome"]["reason"]["reason"], "no_seed");

    let mut placed: Vec<String> = groups(&body).into_iter().flatten().collect();
    placed.sort();
    assert_eq!(
        placed,
        vec!["anna", "bruno", "chie", "dieter", "elisa", "fumi"]
    );
}

#[test]
fn cli_unknown_country_names_participant() {
    let temp = workspace(r#"[{ "id": "zed", "country": "Atlantis" }]"#);
    let (ok, body) = run_cli(
        temp.path(),
        &["partition", "--framework", "lewis", "--size", "3"],
    );
    assert!(!ok);
    assert_eq!(body["status"], "error");
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("zed"), "message did not name the participant: {message}");
}

#[test]
fn cli_validate_reports_incomplete_profile() {
    let roster = r#"[
      { "id": "anna", "country": "Germany" },
      { "id": "kalle", "country": "Finland" },
      { "id": "chie", "country": "Japan" }
    ]"#;
    let temp = workspace(roster);

    let (ok, body) = run_cli(temp.path(), &["validate", "--framework", "hall"]);
    assert!(!ok);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("kalle"), "{message}");

    let (ok, body) = run_cli(temp.path(), &["validate", "--framework", "combined"]);
    assert!(ok, "combined validation failed: {body}");
    assert_eq!(body["data"]["participants"], 3);
}

#[test]
fn cli_validate_text_mode_fails_with_stderr() {
    let roster = r#"[{ "id": "kalle", "country": "Finland" }]"#;
    let temp = workspace(roster);

    #[allow(deprecated)]
    let output = Command::cargo_bin("culture-groups")
        .expect("binary")
        .current_dir(temp.path())
        .args(["validate", "--framework", "hofstede"])
        .args(["--roster", "roster.json", "--catalog", "catalog.json"])
        .output()
        .expect("command run");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("kalle"), "{stderr}");
}

#[test]
fn cli_matrix_is_symmetric_with_zero_diagonal() {
    let temp = workspace(ROSTER);
    let (ok, body) = run_cli(temp.path(), &["matrix", "--framework", "combined"]);
    assert!(ok, "matrix failed: {body}");

    let rows: Vec<Vec<f64>> = serde_json::from_value(body["data"]["rows"].clone()).unwrap();
    assert_eq!(rows.len(), 6);
    for i in 0..rows.len() {
        assert_eq!(rows[i][i], 0.0);
        for j in 0..rows.len() {
            assert_eq!(rows[i][j], rows[j][i]);
            assert!(rows[i][j] <= 1.0);
        }
    }
    assert_eq!(body["data"]["ids"][0], "anna");
}

#[test]
fn cli_rejects_invalid_search_config() {
    let temp = workspace(ROSTER);
    fs::write(temp.path().join("search.toml"), "population_size = 1\n").unwrap();

    let (ok, body) = run_cli(
        temp.path(),
        &[
            "partition",
            "--framework",
            "lewis",
            "--size",
            "4",
            "--seed",
            "s",
            "--config",
            "search.toml",
        ],
    );
    assert!(!ok);
    let message = body["message"].as_str().unwrap_or_default();
    assert!(message.contains("population_size"), "{message}");
}

#[test]
fn cli_partial_config_keeps_defaults() {
    let temp = workspace(ROSTER);
    fs::write(
        temp.path().join("search.toml"),
        "population_size = 10\ngenerations = 5\n",
    )
    .unwrap();

    let (ok, body) = run_cli(
        temp.path(),
        &[
            "partition",
            "--framework",
            "lewis",
            "--size",
            "flexible",
            "--seed",
            "s",
            "--config",
            "search.toml",
        ],
    );
    assert!(ok, "partition failed: {body}");
    assert_eq!(body["data"]["outcome"]["generations"], 5);
    // Six remaining draws three or four; either way every id is placed once
    let placed: usize = groups(&body).iter().map(Vec::len).sum();
    assert_eq!(placed, 6);
}
