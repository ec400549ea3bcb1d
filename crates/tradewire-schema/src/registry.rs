//! Model registry and discriminated-union resolution.
//!
//! Registration is an explicit, single-threaded startup phase: the host
//! application declares enums, models, and family bindings on a
//! [`RegistryBuilder`], then calls [`build`](RegistryBuilder::build) once.
//! The resulting [`Registry`] is an immutable handle, `Arc`-shared and
//! lock-free; there is no way to rebind after the fact.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::field::{FieldCodec, FieldTable, Presence};
use crate::model::{FieldGroup, ModelType, TypeId};
use crate::scalar::{EnumDef, ScalarKind};

use tradewire_json::WireValue;

/// A discriminator value with no registered concrete type.
///
/// Recoverable by design: the server adds variants ahead of client
/// releases, and a long-running stream consumer must degrade to a
/// passthrough record instead of crashing.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("unknown `{family}` variant `{value}`")]
pub struct UnknownVariant {
    pub family: String,
    pub value: String,
}

/// One polymorphic family: an abstract model type, the wire field carrying
/// the type tag, and the tag-value → concrete-type table.
#[derive(Debug)]
pub struct DiscriminatorFamily {
    family_name: String,
    abstract_type: TypeId,
    field: String,
    enum_def: Arc<EnumDef>,
    members: HashMap<String, TypeId>,
}

impl DiscriminatorFamily {
    pub fn abstract_type(&self) -> TypeId {
        self.abstract_type
    }

    /// The wire alias of the field carrying the type tag (e.g. `"type"`).
    pub fn discriminator_field(&self) -> &str {
        &self.field
    }

    pub fn enum_def(&self) -> &EnumDef {
        &self.enum_def
    }

    /// Maps a decoded discriminator value to its concrete model type.
    pub fn resolve(&self, value: &str) -> Result<TypeId, UnknownVariant> {
        self.members.get(value).copied().ok_or_else(|| UnknownVariant {
            family: self.family_name.clone(),
            value: value.to_owned(),
        })
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, TypeId)> {
        self.members.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Mutable registration state. Consumed by [`build`](Self::build).
#[derive(Default)]
pub struct RegistryBuilder {
    enums: IndexMap<String, Arc<EnumDef>>,
    models: Vec<ModelType>,
    by_name: HashMap<String, TypeId>,
    families: HashMap<TypeId, DiscriminatorFamily>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enum definition. Duplicate names are a declaration bug.
    pub fn enum_def<I, S>(&mut self, name: &str, members: I) -> Arc<EnumDef>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        assert!(
            !self.enums.contains_key(name),
            "enum `{name}` registered twice"
        );
        let def = Arc::new(EnumDef::new(name, members));
        self.enums.insert(name.to_owned(), Arc::clone(&def));
        def
    }

    /// Registers a concrete model type from its field groups.
    pub fn model(&mut self, name: &str, groups: &[FieldGroup]) -> TypeId {
        self.register(name, groups, false)
    }

    /// Registers an abstract model type: the decode target of a
    /// discriminator family, never constructed with its own field table.
    pub fn abstract_model(&mut self, name: &str) -> TypeId {
        self.register(name, &[], true)
    }

    fn register(&mut self, name: &str, groups: &[FieldGroup], is_abstract: bool) -> TypeId {
        assert!(
            !self.by_name.contains_key(name),
            "model `{name}` registered twice"
        );
        let id = TypeId(self.models.len() as u32);
        let table = FieldTable::build(name, groups);
        self.models.push(ModelType::new(id, name.to_owned(), is_abstract, table));
        self.by_name.insert(name.to_owned(), id);
        id
    }

    /// Binds the concrete member types of a family, keyed on
    /// `discriminator_field`.
    ///
    /// Called exactly once per family, after every member type is
    /// registered (concrete subtypes must exist before the table can be
    /// built, and the abstract base before the subtypes reference it; this
    /// call breaks that circular ordering). Binding twice, binding a
    /// non-abstract base, or binding a member that does not pin the
    /// discriminator field to the selecting value is a declaration bug and
    /// panics.
    pub fn bind_types(
        &mut self,
        family: TypeId,
        discriminator_field: &str,
        enum_def: &Arc<EnumDef>,
        members: &[(&str, TypeId)],
    ) {
        let family_name = {
            let base = self.model_ref(family);
            assert!(
                base.is_abstract(),
                "bind_types target `{}` is not abstract",
                base.name()
            );
            base.name().to_owned()
        };
        assert!(
            !self.families.contains_key(&family),
            "family `{family_name}` bound twice"
        );

        let mut table: HashMap<String, TypeId> = HashMap::new();
        for &(value, member) in members {
            assert!(
                enum_def.has(value),
                "family `{family_name}`: `{value}` is not a member of enum {}",
                enum_def.name()
            );
            assert!(
                table.insert(value.to_owned(), member).is_none(),
                "family `{family_name}`: variant `{value}` bound twice"
            );
            self.check_member(&family_name, discriminator_field, value, member);
        }

        self.families.insert(
            family,
            DiscriminatorFamily {
                family_name,
                abstract_type: family,
                field: discriminator_field.to_owned(),
                enum_def: Arc::clone(enum_def),
                members: table,
            },
        );
    }

    /// Every member must declare the discriminator field as an enum-coded
    /// constant fixed to the value that selects it.
    fn check_member(&self, family_name: &str, field: &str, value: &str, member: TypeId) {
        let model = self.model_ref(member);
        assert!(
            !model.is_abstract(),
            "family `{family_name}`: member `{}` is abstract",
            model.name()
        );
        let desc = model.table().by_alias(field).unwrap_or_else(|| {
            panic!(
                "family `{family_name}`: member `{}` has no field aliased `{field}`",
                model.name()
            )
        });
        assert!(
            matches!(desc.codec(), FieldCodec::Scalar(ScalarKind::Enum(_))),
            "family `{family_name}`: member `{}` field `{field}` is not enum-coded",
            model.name()
        );
        match desc.presence() {
            Presence::DefaultValue(WireValue::Str(s)) if s == value => {}
            _ => panic!(
                "family `{family_name}`: member `{}` must pin `{field}` to `{value}`",
                model.name()
            ),
        }
    }

    fn model_ref(&self, id: TypeId) -> &ModelType {
        self.models
            .get(id.0 as usize)
            .unwrap_or_else(|| panic!("unregistered type id {id:?}"))
    }

    /// Freezes the registry. One-way: registration state is consumed.
    pub fn build(self) -> Registry {
        Registry {
            inner: Arc::new(RegistryInner {
                enums: self.enums,
                models: self.models,
                by_name: self.by_name,
                families: self.families,
            }),
        }
    }
}

struct RegistryInner {
    enums: IndexMap<String, Arc<EnumDef>>,
    models: Vec<ModelType>,
    by_name: HashMap<String, TypeId>,
    families: HashMap<TypeId, DiscriminatorFamily>,
}

/// The immutable registry handle. Cheap to clone, `Send + Sync`; decode and
/// encode calls share it across threads without locking.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Looks up a model type. A stale or foreign id is a programmer error.
    pub fn model(&self, id: TypeId) -> &ModelType {
        self.inner
            .models
            .get(id.0 as usize)
            .unwrap_or_else(|| panic!("unregistered type id {id:?}"))
    }

    pub fn model_by_name(&self, name: &str) -> Option<&ModelType> {
        self.inner.by_name.get(name).map(|&id| self.model(id))
    }

    /// The discriminator family of an abstract type, if bound.
    pub fn family(&self, id: TypeId) -> Option<&DiscriminatorFamily> {
        self.inner.families.get(&id)
    }

    /// Field-table introspection, used by generic tooling to enumerate
    /// fields without per-type logic.
    pub fn field_table(&self, id: TypeId) -> &FieldTable {
        self.model(id).table()
    }

    pub fn enum_def(&self, name: &str) -> Option<&Arc<EnumDef>> {
        self.inner.enums.get(name)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("models", &self.inner.models.len())
            .field("enums", &self.inner.enums.len())
            .field("families", &self.inner.families.len())
            .finish()
    }
}
