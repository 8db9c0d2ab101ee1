//! CLI-level tests driving the built `faxt` binary end to end.

use std::io::Write as _;

use assert_cmd::Command;
use predicates::str::contains;

fn write_fax_file(dir: &tempfile::TempDir, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::File::create(&path)
        .unwrap()
        .write_all(source.as_bytes())
        .unwrap();
    path
}

#[test]
fn run_prints_all_stages_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fax_file(&dir, "main.fax", "x <- 1 + 2 * 3\n");

    Command::cargo_bin("faxt")
        .unwrap()
        .arg("run")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("== tokens =="))
        .stdout(contains("== ast =="))
        .stdout(contains("== bytecode =="));
}

#[test]
fn run_emit_bytecode_only_prints_disassembly() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fax_file(&dir, "main.fax", "x <- 1\n");

    Command::cargo_bin("faxt")
        .unwrap()
        .arg("run")
        .arg(&file)
        .args(["--emit", "bytecode"])
        .assert()
        .success()
        .stdout(contains("== bytecode =="))
        .stdout(contains("== tokens ==").not());
}

#[test]
fn run_on_unterminated_string_exits_with_lex_code() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_fax_file(&dir, "main.fax", "\"abc\n");

    Command::cargo_bin("faxt")
        .unwrap()
        .arg("run")
        .arg(&file)
        .assert()
        .code(1)
        .stderr(contains("error"));
}

#[test]
fn run_on_missing_file_exits_with_io_code() {
    Command::cargo_bin("faxt")
        .unwrap()
        .arg("run")
        .arg("/nonexistent/missing.fax")
        .assert()
        .code(5);
}

#[test]
fn run_resolves_include_relative_to_source_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_fax_file(&dir, "lib.fax", "shared <- 1\n");
    let main = write_fax_file(
        &dir,
        "main.fax",
        "include \"lib.fax\"\nx <- shared\n",
    );

    Command::cargo_bin("faxt")
        .unwrap()
        .arg("run")
        .arg(&main)
        .args(["--emit", "bytecode"])
        .assert()
        .success();
}
