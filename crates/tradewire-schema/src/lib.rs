//! Schema core for the tradewire transport layer.
//!
//! The broker's generated model layer is declarative: each model type is a
//! list of field declarations (internal name, wire alias, presence, codec),
//! and polymorphic families (orders, transactions) resolve to a concrete
//! type through a discriminator field. This crate implements the machinery
//! those declarations drive:
//!
//! - [`scalar`] — per-semantic-type wire codecs (string-encoded integers and
//!   decimals, enum names, masked credentials);
//! - [`field`] — field descriptors and the per-model lookup table;
//! - [`model`] — field groups and model types;
//! - [`registry`] — the build-once registry and discriminator families;
//! - [`marshal`] — wire object ⇄ [`TypedInstance`] conversion;
//! - [`instance`] — the typed in-memory record.
//!
//! Registration is a single-threaded startup phase ending in
//! [`RegistryBuilder::build`]; the resulting [`Registry`] is immutable and
//! shared freely across threads. Declaration mistakes (duplicate aliases,
//! double binds) panic at registration, never at request time.

pub mod error;
pub mod field;
pub mod instance;
pub mod marshal;
pub mod model;
pub mod registry;
pub mod scalar;

pub use error::{DecodeError, ScalarError};
pub use field::{FieldCodec, FieldDescriptor, FieldTable, Presence};
pub use instance::{FieldValue, TypedInstance};
pub use marshal::{decode, encode};
pub use model::{FieldGroup, ModelType, TypeId};
pub use registry::{DiscriminatorFamily, Registry, RegistryBuilder, UnknownVariant};
pub use scalar::{EnumDef, ScalarKind, Secret};
