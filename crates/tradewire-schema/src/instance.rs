//! [`TypedInstance`] — the decoded in-memory record.

use indexmap::IndexMap;
use tradewire_json::WireValue;

use crate::model::TypeId;
use crate::scalar::Secret;

/// A native field value.
///
/// `Null` records a field that was *present on the wire as JSON null*,
/// never interchangeable with an absent field, which is simply missing from
/// the instance's field map. Several request payloads give the two different
/// meanings server-side.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(f64),
    Text(String),
    Enum(String),
    Secret(Secret),
    Model(TypedInstance),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Shape name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Decimal(_) => "decimal",
            Self::Text(_) => "text",
            Self::Enum(_) => "enum",
            Self::Secret(_) => "secret",
            Self::Model(_) => "model",
            Self::List(_) => "list",
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Secret> for FieldValue {
    fn from(v: Secret) -> Self {
        Self::Secret(v)
    }
}

impl From<TypedInstance> for FieldValue {
    fn from(v: TypedInstance) -> Self {
        Self::Model(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        Self::List(v)
    }
}

/// An in-memory object conforming to a registered model type: internal field
/// name → native value, plus a side bag of unrecognized wire fields.
///
/// The `extra` bag preserves server-added fields verbatim (alias and
/// arrival order), so decode→encode round-trips reproduce them; the broker
/// adds fields ahead of client releases, and proxy use re-emits them. An
/// unknown-variant
/// record is an instance of its family's abstract type whose *entire* wire
/// object lives in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedInstance {
    type_id: TypeId,
    fields: IndexMap<String, FieldValue>,
    extra: Vec<(String, WireValue)>,
}

impl TypedInstance {
    pub fn new(type_id: TypeId) -> Self {
        Self {
            type_id,
            fields: IndexMap::new(),
            extra: Vec::new(),
        }
    }

    /// Builder-style field assignment, for hand-constructed instances.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// `None` means the field is absent; `Some(FieldValue::Null)` means it
    /// was present as wire null.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn is_absent(&self, name: &str) -> bool {
        !self.fields.contains_key(name)
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn extra(&self) -> &[(String, WireValue)] {
        &self.extra
    }

    pub fn push_extra(&mut self, alias: impl Into<String>, value: WireValue) {
        self.extra.push((alias.into(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tid() -> TypeId {
        TypeId(0)
    }

    #[test]
    fn absent_and_null_are_distinct() {
        let mut inst = TypedInstance::new(tid());
        inst.set("present_null", FieldValue::Null);
        assert!(inst.is_absent("never_set"));
        assert!(!inst.is_absent("present_null"));
        assert_eq!(inst.get("present_null"), Some(&FieldValue::Null));
        assert_eq!(inst.get("never_set"), None);
    }

    #[test]
    fn with_builder_sets_fields() {
        let inst = TypedInstance::new(tid())
            .with("units", 100i64)
            .with("instrument", "EUR_USD");
        assert_eq!(inst.get("units"), Some(&FieldValue::Int(100)));
        assert_eq!(inst.get("instrument"), Some(&FieldValue::Text("EUR_USD".into())));
    }

    #[test]
    fn extra_preserves_order() {
        let mut inst = TypedInstance::new(tid());
        inst.push_extra("zeta", WireValue::Int(1));
        inst.push_extra("alpha", WireValue::Int(2));
        let keys: Vec<&str> = inst.extra().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn debug_output_masks_secrets() {
        let inst = TypedInstance::new(tid()).with("token", Secret::new("hunter2"));
        let debug = format!("{inst:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("Secret(****)"));
    }
}
