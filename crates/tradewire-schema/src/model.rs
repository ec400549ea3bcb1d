//! Model types and field groups.

use crate::field::{FieldDescriptor, FieldTable};

/// Identifier of a registered model type. Allocated by the
/// [`RegistryBuilder`](crate::RegistryBuilder); only meaningful against the
/// registry that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub(crate) u32);

/// A named, ordered set of field declarations.
///
/// Field groups are the explicit-composition replacement for the source
/// model layer's inheritance mixins: a concrete model type is the
/// concatenation of its groups in declaration order, resolved once at
/// registration rather than through runtime attribute lookup.
#[derive(Debug, Clone)]
pub struct FieldGroup {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl FieldGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }
}

/// A registered model type: name, resolved field table, abstract flag.
///
/// Constructed once at registration time and immutable thereafter: the
/// runtime analogue of a class definition, not a per-request object.
#[derive(Debug)]
pub struct ModelType {
    id: TypeId,
    name: String,
    is_abstract: bool,
    table: FieldTable,
}

impl ModelType {
    pub(crate) fn new(id: TypeId, name: String, is_abstract: bool, table: FieldTable) -> Self {
        Self {
            id,
            name,
            is_abstract,
            table,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Abstract types decode only through their discriminator family.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn table(&self) -> &FieldTable {
        &self.table
    }
}
