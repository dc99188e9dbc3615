//! tests/api/helpers.rs
use std::path::PathBuf;
use std::sync::LazyLock;
use wordcount::stage::{StageOptions, StageSummary, run_mapper, run_reducer};
use wordcount::telemetry::init_tracing;

static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_tracing("debug", std::io::stdout).expect("Failed to setup tracing");
    }
});

pub fn test_data_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("data");
    path
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(test_data_dir().join(name)).expect("Failed to read fixture")
}

/// Stands in for the external sort stage: a stable byte-wise sort of lines.
pub fn sort_lines(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    lines.iter().map(|l| format!("{l}\n")).collect()
}

pub fn map(text: &str) -> (String, StageSummary) {
    LazyLock::force(&TRACING);
    let mut out = Vec::new();
    let summary =
        run_mapper(text.as_bytes(), &mut out, StageOptions::default()).expect("Map stage failed");
    (String::from_utf8(out).expect("Mapper wrote invalid UTF-8"), summary)
}

pub fn reduce(records: &str) -> (String, StageSummary) {
    LazyLock::force(&TRACING);
    let mut out = Vec::new();
    let summary = run_reducer(records.as_bytes(), &mut out, StageOptions::default())
        .expect("Reduce stage failed");
    (String::from_utf8(out).expect("Reducer wrote invalid UTF-8"), summary)
}

/// Parses `key<TAB>count` output lines for assertions.
pub fn parse_output(text: &str) -> Vec<(String, u64)> {
    text.lines()
        .map(|line| {
            let (key, count) = line.split_once('\t').expect("Output line without a tab");
            (key.to_string(), count.parse().expect("Output count is not a number"))
        })
        .collect()
}
