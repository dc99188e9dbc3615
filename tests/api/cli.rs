//! tests/api/cli.rs
use crate::helpers::test_data_dir;
use assert_cmd::Command;
use predicates::prelude::*;

fn wordcount() -> Command {
    let mut cmd = Command::cargo_bin("wordcount").expect("Failed to find binary");
    cmd.env_remove("RUST_LOG").current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn map_reads_stdin_and_writes_records_to_stdout() {
    wordcount()
        .arg("map")
        .write_stdin("the cat sat on the mat.\n")
        .assert()
        .success()
        .stdout("the\t1\ncat\t1\nsat\t1\non\t1\nthe\t1\nmat\t1\n");
}

#[test]
fn map_of_an_empty_line_prints_nothing() {
    wordcount()
        .arg("map")
        .write_stdin("\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn reduce_sums_sorted_records() {
    wordcount()
        .arg("reduce")
        .write_stdin("cat\t1\nmat\t1\non\t1\nsat\t1\nthe\t1\nthe\t1\n")
        .assert()
        .success()
        .stdout("cat\t1\nmat\t1\non\t1\nsat\t1\nthe\t2\n");
}

#[test]
fn reduce_keeps_stdout_clean_when_skipping_bad_lines() {
    wordcount()
        .arg("reduce")
        .write_stdin("a\t1\nno separator here\na\t2\n")
        .assert()
        .success()
        .stdout("a\t3\n")
        .stderr(predicate::str::contains("Skipping record"));
}

#[test]
fn strict_reduce_fails_on_a_missing_separator() {
    wordcount()
        .args(["reduce", "--strict"])
        .write_stdin("a\t1\nbroken\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record on line 2"));
}

#[test]
fn environment_can_select_the_abort_policy() {
    wordcount()
        .arg("reduce")
        .env("WORDCOUNT_REDUCER__MISSING_SEPARATOR", "abort")
        .write_stdin("broken\n")
        .assert()
        .failure();
}

#[test]
fn input_and_output_files_replace_the_standard_streams() {
    let out_dir = std::env::temp_dir().join(format!("wordcount-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&out_dir).expect("Failed to create test directory");
    let out_file = out_dir.join("mapped.txt");

    wordcount()
        .arg("map")
        .arg("--input")
        .arg(test_data_dir().join("small_test.txt"))
        .arg("--output")
        .arg(&out_file)
        .assert()
        .success()
        .stdout("");

    let mapped = std::fs::read_to_string(&out_file).expect("Failed to read output");
    assert!(mapped.starts_with("the\t1\nquick\t1\nbrown\t1\n"));

    std::fs::remove_dir_all(out_dir).expect("Failed to delete dirs");
}

#[test]
fn missing_input_file_is_reported() {
    wordcount()
        .args(["map", "--input", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open"));
}
