//! src/functions.rs
//!
//! Shared vocabulary for the two pipeline stages: the key-count record and the
//! mapper/reducer/emitter traits that move it around.
use crate::error::AggregateError;
use crate::record::RawRecord;

pub type Key = String;
pub type Count = u64;

/// A `(key, count)` pair, serialized as `key<TAB>count` on its own line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCount {
    key: Key,
    count: Count,
}

impl KeyCount {
    pub fn new(key: impl Into<Key>, count: Count) -> Self {
        KeyCount {
            key: key.into(),
            count,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn count(&self) -> Count {
        self.count
    }
}

pub trait MapEmitter {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()>;
}

pub trait ReduceEmitter {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()>;
}

pub trait Mapper {
    type Emitter: MapEmitter;
    fn build(emitter: Self::Emitter) -> Self;
    fn map(&mut self, line: &str) -> std::io::Result<()>;
    fn into_emitter(self) -> Self::Emitter;
}

/// A streaming reducer fed one record at a time.
///
/// Records sharing a key must arrive contiguously. The reducer does not
/// buffer or regroup its input, so a key split across non-adjacent runs is
/// reduced once per run.
pub trait Reducer {
    type Emitter: ReduceEmitter;
    fn build(emitter: Self::Emitter) -> Self;
    fn reduce(&mut self, record: RawRecord<'_>) -> Result<(), AggregateError>;
    /// Called once at end of input to flush any pending group.
    fn finish(&mut self) -> Result<(), AggregateError>;
    fn into_emitter(self) -> Self::Emitter;
}

impl MapEmitter for Vec<KeyCount> {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()> {
        self.push(record);
        Ok(())
    }
}

impl ReduceEmitter for Vec<KeyCount> {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()> {
        self.push(record);
        Ok(())
    }
}
