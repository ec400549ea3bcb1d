//! Typed decoding of newline-delimited streaming feeds.
//!
//! The pricing and transaction streams carry sequence-sensitive state
//! (heartbeats, incremental account changes), so records are decoded
//! strictly in arrival order, one per [`Iterator::next`] call; the decoder
//! never reads ahead of the consumer. A record that fails to parse or
//! decode yields an error carrying its position and the stream continues
//! with the next record; nothing is dropped or reordered.

use std::io::BufRead;

use thiserror::Error;

use tradewire_json::{JsonError, RecordReader};
use tradewire_schema::{decode, DecodeError, Registry, TypeId, TypedInstance};

/// What went wrong with one record.
#[derive(Debug, Error)]
pub enum StreamErrorKind {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A per-record failure. `record` is the zero-based position among
/// non-blank records.
#[derive(Debug, Error)]
#[error("record {record}: {source}")]
pub struct StreamError {
    pub record: usize,
    #[source]
    pub source: StreamErrorKind,
}

/// Pull-based typed decoder over a newline-delimited JSON feed.
///
/// `target` is usually the abstract base of a discriminator family, so
/// heartbeats and data records fall out of the same resolution step, and
/// server-side variants added after this client was built degrade to
/// passthrough records rather than failures.
pub struct StreamDecoder<R> {
    registry: Registry,
    target: TypeId,
    records: RecordReader<R>,
    position: usize,
}

impl<R: BufRead> StreamDecoder<R> {
    pub fn new(registry: Registry, target: TypeId, input: R) -> Self {
        Self {
            registry,
            target,
            records: RecordReader::new(input),
            position: 0,
        }
    }

    /// Number of records yielded so far, including failed ones.
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<R: BufRead> Iterator for StreamDecoder<R> {
    type Item = Result<TypedInstance, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.records.next()?;
        let record = self.position;
        self.position += 1;
        let item = match result {
            Ok(wire) => decode(&self.registry, self.target, &wire).map_err(|e| StreamError {
                record,
                source: StreamErrorKind::Decode(e),
            }),
            Err(e) => Err(StreamError {
                record,
                source: StreamErrorKind::Json(e),
            }),
        };
        Some(item)
    }
}
