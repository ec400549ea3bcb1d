//! tradewire — typed JSON transport core for a broker REST/streaming API.
//!
//! The broker's wire format is JSON with string-encoded scalars (decimals,
//! integers and enums arrive as JSON strings) and polymorphic objects
//! resolved through a `type` discriminator field. This crate is the
//! one-call surface over the two layers underneath:
//!
//! - [`tradewire_json`] parses bytes into a generic [`WireValue`] tree and
//!   serializes it back out, including newline-delimited streaming frames;
//! - [`tradewire_schema`] holds the registered model types and converts
//!   wire objects to and from [`TypedInstance`]s.
//!
//! Typical use: build a [`Registry`] once at startup, then call
//! [`from_str`]/[`to_string`] for REST payloads and [`StreamDecoder`] for
//! the pricing/transaction feeds.

pub mod codec;
pub mod stream;

pub use codec::{from_slice, from_str, to_string, to_vec, CodecError};
pub use stream::{StreamDecoder, StreamError, StreamErrorKind};

pub use tradewire_json::{JsonError, RecordReader, RecordWriter, WireValue};
pub use tradewire_schema::{
    decode, encode, DecodeError, DiscriminatorFamily, EnumDef, FieldCodec, FieldDescriptor,
    FieldGroup, FieldTable, FieldValue, ModelType, Presence, Registry, RegistryBuilder,
    ScalarKind, Secret, TypeId, TypedInstance, UnknownVariant,
};
