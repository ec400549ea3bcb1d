//! Field descriptors and the per-model lookup table.

use indexmap::IndexMap;
use tradewire_json::WireValue;

use crate::model::{FieldGroup, TypeId};
use crate::scalar::ScalarKind;

/// Presence of a field on the wire.
///
/// Three states, kept distinct on purpose: a `Required` field must arrive; a
/// `DefaultValue` field decodes to its default when the key is missing (used
/// for constant discriminator fields, among others); an `Optional` field is
/// left absent. "Absent" is not the same as "present as wire null"; see
/// [`FieldValue::Null`](crate::FieldValue).
#[derive(Debug, Clone)]
pub enum Presence {
    Required,
    DefaultValue(WireValue),
    Optional,
}

/// What a field's wire value decodes through.
///
/// Deliberately shallow: the model layer only ever needs optional scalars,
/// lists, and nested declared models.
#[derive(Debug, Clone)]
pub enum FieldCodec {
    Scalar(ScalarKind),
    Model(TypeId),
    List(Box<FieldCodec>),
}

/// One declared field of a model type.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    alias: Option<String>,
    presence: Presence,
    deprecated: bool,
    codec: FieldCodec,
    declared_in: String,
}

impl FieldDescriptor {
    /// A required field with no explicit alias (wire name = internal name).
    pub fn new(name: impl Into<String>, codec: FieldCodec) -> Self {
        Self {
            name: name.into(),
            alias: None,
            presence: Presence::Required,
            deprecated: false,
            codec,
            declared_in: String::new(),
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.presence = Presence::Optional;
        self
    }

    pub fn default_value(mut self, value: WireValue) -> Self {
        self.presence = Presence::DefaultValue(value);
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wire-format key: the explicit alias, or the internal name.
    pub fn wire_alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn presence(&self) -> &Presence {
        &self.presence
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    pub fn codec(&self) -> &FieldCodec {
        &self.codec
    }

    /// Name of the field group that introduced this field.
    pub fn declared_in(&self) -> &str {
        &self.declared_in
    }
}

/// The resolved field set of one model type, built once at registration.
///
/// Field order is the concatenation of the model's field groups in
/// declaration order. Both lookup paths (internal name for encoding, wire
/// alias for decoding) are O(1): decoding runs per-field for every object in
/// the streaming price feed.
#[derive(Debug)]
pub struct FieldTable {
    fields: Vec<FieldDescriptor>,
    by_name: IndexMap<String, usize>,
    by_alias: IndexMap<String, usize>,
}

impl FieldTable {
    /// Resolves the groups into one table.
    ///
    /// A field re-declared by a later group (same wire alias or same
    /// internal name) overrides the earlier declaration in place: the
    /// most-derived group wins, keeping the original position. Two fields
    /// colliding *within* one group, or a collision that would merge two
    /// distinct earlier fields, is a declaration bug and panics.
    pub(crate) fn build(model_name: &str, groups: &[FieldGroup]) -> Self {
        let mut fields: Vec<(FieldDescriptor, usize)> = Vec::new();
        let mut by_name: IndexMap<String, usize> = IndexMap::new();
        let mut by_alias: IndexMap<String, usize> = IndexMap::new();

        for (group_ord, group) in groups.iter().enumerate() {
            for desc in group.fields() {
                let mut desc = desc.clone();
                desc.declared_in = group.name().to_owned();
                assert!(
                    !desc.name().is_empty() && !desc.wire_alias().is_empty(),
                    "model `{model_name}`: empty field name or alias"
                );

                let alias_hit = by_alias.get(desc.wire_alias()).copied();
                let name_hit = by_name.get(desc.name()).copied();
                match (alias_hit, name_hit) {
                    (Some(i), Some(j)) if i != j => panic!(
                        "model `{model_name}`: field `{}` would merge two earlier fields \
                         (`{}` and `{}`)",
                        desc.name(),
                        fields[i].0.name(),
                        fields[j].0.name(),
                    ),
                    (Some(i), _) | (None, Some(i)) => {
                        if fields[i].1 == group_ord {
                            panic!(
                                "model `{model_name}`: duplicate wire alias `{}` in group `{}` \
                                 (fields `{}` and `{}`)",
                                desc.wire_alias(),
                                group.name(),
                                fields[i].0.name(),
                                desc.name(),
                            );
                        }
                        // most-derived wins: replace in place
                        by_name.shift_remove(fields[i].0.name());
                        by_alias.shift_remove(fields[i].0.wire_alias());
                        by_name.insert(desc.name().to_owned(), i);
                        by_alias.insert(desc.wire_alias().to_owned(), i);
                        fields[i] = (desc, group_ord);
                    }
                    (None, None) => {
                        let i = fields.len();
                        by_name.insert(desc.name().to_owned(), i);
                        by_alias.insert(desc.wire_alias().to_owned(), i);
                        fields.push((desc, group_ord));
                    }
                }
            }
        }

        Self {
            fields: fields.into_iter().map(|(d, _)| d).collect(),
            by_name,
            by_alias,
        }
    }

    /// Lookup by internal name (outbound encoding path).
    pub fn by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Lookup by wire alias (inbound decoding path).
    pub fn by_alias(&self, alias: &str) -> Option<&FieldDescriptor> {
        self.by_alias.get(alias).map(|&i| &self.fields[i])
    }

    /// Descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
