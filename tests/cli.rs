// tests/cli.rs
// Exit codes and end-to-end runs of the binary.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_csv-text-mapper"))
}

#[test]
fn wrong_argument_count_exits_with_one() {
    let status = bin().args(["extract", "only-one.csv"]).status().unwrap();
    assert_eq!(status.code(), Some(1));

    let status = bin()
        .args(["reconstruct", "a.csv", "b.txt", "c.csv", "extra"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let status = bin()
        .current_dir(dir.path())
        .args(["extract", "nonexistent.csv", "map.txt", "numbered.csv"])
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!dir.path().join("map.txt").exists());
}

#[test]
fn extract_then_reconstruct() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("survey.csv"), "\"Yes\";\"No;Maybe\"\n\"yes\";\"\"\n").unwrap();

    let status = bin()
        .current_dir(dir.path())
        .args(["extract", "survey.csv", "texts.txt", "survey_numbered.csv", "utf-8"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("texts.txt")).unwrap(),
        "[1] Yes\n[2] No\n[3] Maybe\n"
    );

    fs::write(dir.path().join("texts.txt"), "[1] Oui\n[2] Non\n[3] =Peut-être\n").unwrap();
    let status = bin()
        .current_dir(dir.path())
        .args(["reconstruct", "survey_numbered.csv", "texts.txt", "survey_fr.csv"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("survey_fr.csv")).unwrap(),
        "\"Oui\";\"Non;'=Peut-être\"\n\"Oui\";\"\"\n"
    );
}
