//! Eager (whole-document) entry points.

use thiserror::Error;

use tradewire_json::json;
use tradewire_json::JsonError;
use tradewire_schema::{decode, encode, DecodeError, Registry, TypeId, TypedInstance};

/// A whole-document decode/encode failure: either the JSON text itself, or
/// the typed marshalling of the parsed tree.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Parses one JSON document and decodes it as `target`.
///
/// `target` may be a concrete model type or the abstract base of a
/// discriminator family.
pub fn from_str(
    registry: &Registry,
    target: TypeId,
    text: &str,
) -> Result<TypedInstance, CodecError> {
    let wire = json::from_str(text)?;
    Ok(decode(registry, target, &wire)?)
}

/// Byte-stream variant of [`from_str`]. The input must be UTF-8.
pub fn from_slice(
    registry: &Registry,
    target: TypeId,
    bytes: &[u8],
) -> Result<TypedInstance, CodecError> {
    let wire = json::from_slice(bytes)?;
    Ok(decode(registry, target, &wire)?)
}

/// Encodes an instance and serializes it as compact JSON text.
pub fn to_string(registry: &Registry, instance: &TypedInstance) -> Result<String, CodecError> {
    let wire = encode(registry, instance)?;
    Ok(json::to_string(&wire))
}

/// Byte variant of [`to_string`].
pub fn to_vec(registry: &Registry, instance: &TypedInstance) -> Result<Vec<u8>, CodecError> {
    to_string(registry, instance).map(String::into_bytes)
}
