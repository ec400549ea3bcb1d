//! Eager JSON entry points.
//!
//! Whole-document parsing into a [`WireValue`](crate::WireValue) tree and
//! compact serialization back out. Streaming payloads go through
//! [`ndjson`](crate::ndjson) instead.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::JsonError;
pub use reader::{from_slice, from_str};
pub use writer::{to_string, to_vec};
