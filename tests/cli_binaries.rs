//! Runs the built binaries end to end.

use std::path::Path;
use std::process::{Command, Output};

const DATASET: &str = "\
fin_year,month,state_code,state_name,district_code,district_name,Persondays_of_Central_Liability_so_far
2024-2025,Apr,18,MAHARASHTRA,1801,Nagpur,1000
2024-2025,Apr,18,MAHARASHTRA,1801,Nagpur,1000
2024-2025,May,18,MAHARASHTRA,1802,Wardha,900
";

fn write_dataset(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("district_data.csv");
    std::fs::write(&path, DATASET).expect("write dataset");
    path
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn dedup_count_prints_report_for_given_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path());

    let output = Command::new(env!("CARGO_BIN_EXE_dedup-count")).arg(&path).output().unwrap();
    let text = stdout(&output);

    assert!(text.contains("Total rows: 3"), "{}", text);
    assert!(text.contains("combinations: 2"), "{}", text);
    assert!(text.contains("Duplicate rows: 1"), "{}", text);
}

#[test]
fn dedup_count_reads_default_path_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("data")).unwrap();
    write_dataset(&dir.path().join("data"));

    let output =
        Command::new(env!("CARGO_BIN_EXE_dedup-count")).current_dir(dir.path()).output().unwrap();

    assert!(stdout(&output).contains("Total rows: 3"));
}

#[test]
fn dedup_count_fails_for_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dedup-count"))
        .arg(dir.path().join("absent.csv"))
        .output()
        .unwrap();

    assert!(!output.status.success());
}

#[test]
fn cli_imports_then_reports_schema_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_dataset(dir.path());
    let url = format!("sqlite://{}", dir.path().join("district_data.db").display());
    let cli = env!("CARGO_BIN_EXE_district-data-cli");

    let import = Command::new(cli)
        .current_dir(dir.path())
        .args(["--database-url", &url, "dataset", "import"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(stdout(&import).contains("Imported 3 of 3 rows"));

    let status = Command::new(cli)
        .current_dir(dir.path())
        .args(["--database-url", &url, "database", "status"])
        .output()
        .unwrap();
    assert!(stdout(&status).contains("up to date"));
}
