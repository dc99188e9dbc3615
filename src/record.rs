//! src/record.rs
//!
//! Line codec for key-count records: `<key><TAB><count>`, one per line.
use crate::error::RecordError;
use crate::functions::{Count, KeyCount};
use std::io::Write;
use std::num::IntErrorKind;

pub const SEPARATOR: char = '\t';

/// A record line split at its first tab, with the count still unparsed.
///
/// The key stays available even when the count is malformed, which the
/// reducer needs to detect group boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    key: &'a str,
    value: &'a str,
}

impl<'a> RawRecord<'a> {
    /// Splits a record line. Surrounding whitespace, including a trailing
    /// `\r`, is ignored.
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let line = line.trim();
        match line.split_once(SEPARATOR) {
            Some((key, value)) => Ok(RawRecord { key, value }),
            None => Err(RecordError::MissingSeparator {
                line: line.to_string(),
            }),
        }
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Parses the count. A well-formed integer above `u64::MAX` is
    /// `CountTooLarge`, not `MalformedCount`.
    pub fn count(&self) -> Result<Count, RecordError> {
        self.value
            .trim()
            .parse::<Count>()
            .map_err(|source| match source.kind() {
                IntErrorKind::PosOverflow => RecordError::CountTooLarge {
                    key: self.key.to_string(),
                    value: self.value.to_string(),
                },
                _ => RecordError::MalformedCount {
                    key: self.key.to_string(),
                    value: self.value.to_string(),
                    source,
                },
            })
    }
}

pub fn write_record<W: Write>(writer: &mut W, record: &KeyCount) -> std::io::Result<()> {
    writeln!(writer, "{}{SEPARATOR}{}", record.key(), record.count())
}
