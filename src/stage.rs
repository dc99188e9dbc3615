//! src/stage.rs
//!
//! Drivers that run one pipeline stage over a byte stream: read lines until
//! end of input, feed them to the mapper or reducer, flush the output.
use crate::configuration::{MissingSeparatorPolicy, Settings};
use crate::emitter::{DEFAULT_BUFFER_CAPACITY, LineEmitter};
use crate::functions::{Mapper, Reducer};
use crate::mappers::WordCounter;
use crate::record::RawRecord;
use crate::reducers::Adder;
use anyhow::Context;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy)]
pub struct StageOptions {
    pub buffer_capacity: usize,
    pub missing_separator: MissingSeparatorPolicy,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            missing_separator: MissingSeparatorPolicy::Skip,
        }
    }
}

impl From<&Settings> for StageOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            buffer_capacity: settings.output.buffer_capacity,
            missing_separator: settings.reducer.missing_separator,
        }
    }
}

/// Counters reported by a finished stage. Fields that do not apply to a
/// stage stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StageSummary {
    pub lines_read: u64,
    pub records_emitted: u64,
    pub tokens_dropped: u64,
    pub blank_lines: u64,
    pub malformed_counts: u64,
    pub missing_separators: u64,
    pub out_of_order_keys: u64,
}

/// Lines of a byte stream, read one at a time. Invalid UTF-8 is replaced
/// with U+FFFD rather than failing the stage.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

#[tracing::instrument(name = "Map stage", skip_all)]
pub fn run_mapper<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: StageOptions,
) -> anyhow::Result<StageSummary> {
    let mut mapper = WordCounter::build(LineEmitter::with_capacity(options.buffer_capacity, output));
    let mut summary = StageSummary::default();

    for line in LossyLines::new(input) {
        let line = line.context("Failed to read input line")?;
        summary.lines_read += 1;
        mapper.map(&line).context("Failed to write record")?;
    }

    summary.records_emitted = mapper.tokens_emitted();
    summary.tokens_dropped = mapper.tokens_dropped();
    mapper
        .into_emitter()
        .finish()
        .context("Failed to flush output")?;

    tracing::info!(
        lines_read = summary.lines_read,
        records_emitted = summary.records_emitted,
        tokens_dropped = summary.tokens_dropped,
        "Map stage finished"
    );
    Ok(summary)
}

/// Input must be sorted by key; see [`Adder`].
#[tracing::instrument(name = "Reduce stage", skip_all, fields(missing_separator = ?options.missing_separator))]
pub fn run_reducer<R: BufRead, W: Write>(
    input: R,
    output: W,
    options: StageOptions,
) -> anyhow::Result<StageSummary> {
    let mut reducer = Adder::build(LineEmitter::with_capacity(options.buffer_capacity, output));
    let mut summary = StageSummary::default();

    for line in LossyLines::new(input) {
        let line = line.context("Failed to read input line")?;
        summary.lines_read += 1;
        if line.trim().is_empty() {
            summary.blank_lines += 1;
            continue;
        }
        match RawRecord::parse(&line) {
            Ok(record) => reducer.reduce(record).context("Failed to reduce record")?,
            Err(e) => match options.missing_separator {
                MissingSeparatorPolicy::Skip => {
                    tracing::warn!(line = summary.lines_read, error = %e, "Skipping record");
                    summary.missing_separators += 1;
                }
                MissingSeparatorPolicy::Abort => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Malformed record on line {}", summary.lines_read)));
                }
            },
        }
    }

    reducer.finish().context("Failed to emit final group")?;
    let stats = reducer.stats();
    summary.records_emitted = stats.groups_emitted;
    summary.malformed_counts = stats.malformed_counts;
    summary.out_of_order_keys = stats.out_of_order_keys;
    reducer
        .into_emitter()
        .finish()
        .context("Failed to flush output")?;

    tracing::info!(
        lines_read = summary.lines_read,
        records_emitted = summary.records_emitted,
        malformed_counts = summary.malformed_counts,
        missing_separators = summary.missing_separators,
        out_of_order_keys = summary.out_of_order_keys,
        "Reduce stage finished"
    );
    Ok(summary)
}
