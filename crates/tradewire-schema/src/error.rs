//! Decode/encode error taxonomy.
//!
//! Structural failures (shape mismatch, missing required field) and
//! codec-internal failures (malformed digit string) are fatal for the record
//! and carry the dotted field path from the decode root. Unknown variants
//! and unknown fields are handled upstream (passthrough record, `extra` bag)
//! and never surface through these types.

use thiserror::Error;

/// A scalar codec failure, before the field path is known.
///
/// Codecs operate on bare wire values; the marshaller attaches the path via
/// [`DecodeError::at`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScalarError {
    #[error("expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("malformed {expected}: `{raw}`")]
    FormatInvalid { expected: &'static str, raw: String },
    #[error("unknown {enum_name} value `{value}`")]
    UnknownEnumValue { enum_name: String, value: String },
    #[error("{detail}")]
    ValueShape { detail: String },
}

/// A decode or encode failure for one record, located by field path.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("type mismatch at `{path}`: expected {expected}, got {got}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        got: &'static str,
    },
    #[error("malformed {expected} at `{path}`: `{raw}`")]
    FormatInvalid {
        path: String,
        expected: &'static str,
        raw: String,
    },
    #[error("unknown {enum_name} value `{value}` at `{path}`")]
    UnknownEnumValue {
        path: String,
        enum_name: String,
        value: String,
    },
    #[error("missing required field `{path}`")]
    MissingRequiredField { path: String },
    #[error("missing discriminator field `{field}`")]
    MissingDiscriminator { field: String },
    #[error("cannot encode `{path}`: {detail}")]
    ValueShape { path: String, detail: String },
}

impl DecodeError {
    /// Attaches a field path to a scalar codec failure.
    pub(crate) fn at(path: &str, err: ScalarError) -> Self {
        let path = path.to_owned();
        match err {
            ScalarError::TypeMismatch { expected, got } => Self::TypeMismatch { path, expected, got },
            ScalarError::FormatInvalid { expected, raw } => Self::FormatInvalid { path, expected, raw },
            ScalarError::UnknownEnumValue { enum_name, value } => {
                Self::UnknownEnumValue { path, enum_name, value }
            }
            ScalarError::ValueShape { detail } => Self::ValueShape { path, detail },
        }
    }

    /// The field path the failure is anchored at.
    pub fn path(&self) -> &str {
        match self {
            Self::TypeMismatch { path, .. }
            | Self::FormatInvalid { path, .. }
            | Self::UnknownEnumValue { path, .. }
            | Self::MissingRequiredField { path }
            | Self::ValueShape { path, .. } => path,
            Self::MissingDiscriminator { field } => field,
        }
    }
}
