//! Newline-delimited JSON record framing.
//!
//! The broker's streaming endpoints (pricing, transactions) deliver one JSON
//! object per line. [`RecordReader`] pulls records one at a time from any
//! [`BufRead`]: nothing is read ahead of the consumer, so backpressure falls
//! out of the iterator contract, and records are yielded strictly in arrival
//! order. A malformed line yields an error for that record and the reader
//! continues with the next line.

use std::io::{BufRead, Write};

use crate::json::{reader, writer, JsonError};
use crate::WireValue;

/// Pull-based reader over newline-delimited JSON records.
///
/// Blank and whitespace-only lines are skipped without counting as records.
pub struct RecordReader<R> {
    input: R,
    line: String,
    records_read: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
            records_read: 0,
        }
    }

    /// Number of records yielded so far, including failed ones.
    pub fn records_read(&self) -> usize {
        self.records_read
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<WireValue, JsonError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.input.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.records_read += 1;
                    return Some(Err(JsonError::Io(e)));
                }
            }
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            self.records_read += 1;
            return Some(reader::from_str(trimmed));
        }
    }
}

/// Writes one compact JSON record per line, flushing nothing implicitly;
/// callers that need per-record delivery flush the underlying writer.
pub struct RecordWriter<W> {
    output: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn write(&mut self, value: &WireValue) -> std::io::Result<()> {
        self.output.write_all(&writer::to_vec(value))?;
        self.output.write_all(b"\n")
    }

    pub fn into_inner(self) -> W {
        self.output
    }
}
