use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/TopologyConfig.txt")
}

fn run_topoplan(topo_file: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_topoplan"))
        .arg("-f")
        .arg(topo_file)
        .args(extra)
        .env_remove("TOPOPLAN_LOG")
        .output()
        .expect("run topoplan")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn reports_selected_cases_in_file_order() {
    let output = run_topoplan(&fixture_path(), &["-c", "5.2.1", "5.1.1"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let expected = "\
case 5.1.1:
\trole-vendor pair: [(Leader, ARM), (Router_1, ARM)]
\tvendor devices  : {ARM: 2}
case 5.2.1:
\trole-vendor pair: [(Leader, OpenThread), (REED_1, Kirale), (MED_1, SiLabs)]
\tvendor devices  : {OpenThread: 1, Kirale: 1, SiLabs: 1}

Testbed needed vendor devices: {ARM: 2, OpenThread: 1, Kirale: 1, SiLabs: 1}
";
    assert_eq!(stdout_of(&output), expected);
}

#[test]
fn all_cases_fill_any_with_remaining_capacity() {
    let output = run_topoplan(&fixture_path(), &[]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert_eq!(stdout.matches("case ").count(), 5);
    assert!(stdout.ends_with(
        "Testbed needed vendor devices: {ARM: 3, NXP: 2, SiLabs: 1, Kirale: 1, OpenThread: 1, Any: 24}\n"
    ));
}

#[test]
fn unknown_case_is_reported_without_failing() {
    let output = run_topoplan(&fixture_path(), &["-c", "9.9.9"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "case 9.9.9 not found\n\nTestbed needed vendor devices: {}\n"
    );
}

#[test]
fn json_report_matches_text_totals() {
    let output = run_topoplan(&fixture_path(), &["--json", "-c", "5.1.2", "9.2.1"]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&stdout_of(&output)).expect("parse json report");
    let cases = report["cases"].as_array().expect("cases array");
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0]["case_id"], "5.1.2");
    assert_eq!(cases[1]["vendors"]["Any"], 2);
    assert_eq!(report["not_found"], serde_json::json!([]));
    assert_eq!(report["testbed"]["NXP"], 2);
    assert_eq!(report["testbed"]["Any"], 32 - 2 - 1 - 1 - 1 - 1);
}

#[test]
fn malformed_line_fails_and_names_the_line() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let topo = temp_dir.path().join("TopologyConfig.txt");
    std::fs::write(&topo, "5.1.1-Leader:ARM,Router_1:ARM\n5.2.1 Leader:NXP\n6.1.1-Leader:NXP\n")
        .expect("write topology");

    let output = run_topoplan(&topo, &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
    assert!(stderr.contains("5.2.1 Leader:NXP"), "stderr: {stderr}");
    assert!(stderr.contains("rejected topology line"), "stderr: {stderr}");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("case 5.1.1:"));
    assert!(!stdout.contains("6.1.1"));
    assert!(!stdout.contains("Testbed needed vendor devices"));
}

#[test]
fn comment_only_file_yields_empty_tally() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let topo = temp_dir.path().join("TopologyConfig.txt");
    std::fs::write(&topo, "# nothing yet\n\n  # still nothing\n").expect("write topology");

    let output = run_topoplan(&topo, &[]);
    assert!(output.status.success());
    assert_eq!(
        stdout_of(&output),
        "\nTestbed needed vendor devices: {}\n"
    );
}

#[test]
fn missing_file_is_fatal() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let missing = temp_dir.path().join("absent.txt");

    let output = run_topoplan(&missing, &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open topology file"), "stderr: {stderr}");
}
