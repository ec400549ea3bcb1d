//! Wire-format value tree and JSON framing for tradewire.
//!
//! The broker API exchanges JSON objects whose scalar fields are frequently
//! transmitted as JSON strings. This crate owns the untyped half of that
//! exchange: [`WireValue`], a generic ordered JSON value tree, the eager
//! text/byte entry points in [`json`], and newline-delimited record framing
//! in [`ndjson`]. The typed half (field tables, codecs, marshalling) lives
//! in `tradewire-schema`.

mod wire_value;

pub mod json;
pub mod ndjson;

pub use json::JsonError;
pub use ndjson::{RecordReader, RecordWriter};
pub use wire_value::WireValue;
