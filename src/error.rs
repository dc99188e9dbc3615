//! src/error.rs
use std::num::ParseIntError;

/// Problems with a single `key<TAB>count` line.
#[derive(thiserror::Error)]
pub enum RecordError {
    #[error("Record has no tab separator: {line:?}")]
    MissingSeparator { line: String },
    #[error("Count {value:?} for key {key:?} is not a non-negative integer")]
    MalformedCount {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("Count {value:?} for key {key:?} does not fit in 64 bits")]
    CountTooLarge { key: String, value: String },
}

impl std::fmt::Debug for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

/// Fatal failures of the aggregation stage.
#[derive(thiserror::Error)]
pub enum AggregateError {
    #[error("Count for key {key:?} exceeds {}", u64::MAX)]
    CountOverflow { key: String },
    #[error("Failed to emit aggregated record")]
    Emit(#[from] std::io::Error),
}

impl std::fmt::Debug for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(f, self)
    }
}

pub fn error_chain_fmt(
    f: &mut std::fmt::Formatter<'_>,
    e: &impl std::error::Error,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
