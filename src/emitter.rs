//! src/emitter.rs
use crate::functions::{KeyCount, MapEmitter, ReduceEmitter};
use crate::record::write_record;
use std::io::{BufWriter, Write};

pub const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// Writes records as tab-separated lines through a buffered writer.
///
/// Used by both stages: the mapper's output and the reducer's output share
/// the same line format.
pub struct LineEmitter<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> LineEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, writer)
    }

    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
        }
    }

    fn write(&mut self, record: &KeyCount) -> std::io::Result<()> {
        write_record(&mut self.writer, record)
    }

    /// Flushes buffered records and hands back the underlying writer.
    pub fn finish(self) -> std::io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

impl<W: Write> MapEmitter for LineEmitter<W> {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()> {
        self.write(&record)
    }
}

impl<W: Write> ReduceEmitter for LineEmitter<W> {
    fn emit(&mut self, record: KeyCount) -> std::io::Result<()> {
        self.write(&record)
    }
}
