//! Schema model for CMDB object types.
//!
//! A [`Schema`] declares the attributes of one object type: scalar fields
//! (strings, integers) and nested tables (lists of sub-objects keyed by an
//! mkey field). Attribute names are `snake_case` locally and `kebab-case`
//! on the wire; the wire name is derived from the local name unless a
//! field overrides it.
//!
//! Schemas drive both directions of the generic tree transform: `flatten`
//! (wire JSON → normalized attribute map, read path) and `expand`
//! (attribute map → wire JSON, write path).

use indexmap::IndexMap;
use thiserror::Error;

/// Validation errors raised while flattening or expanding values
/// against a schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    #[error("missing required attribute '{name}'")]
    MissingRequired { name: String },

    #[error("attribute '{name}': expected {expected}, got {got}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        got: String,
    },

    #[error("table '{field}': entry missing key attribute '{mkey}'")]
    MissingTableKey { field: String, mkey: String },

    #[error("expected a JSON object for {context}")]
    NotAnObject { context: String },
}

/// The kind of a schema field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Free-form or enumerated string (`"enable"`, `"10.0.0.0 255.255.255.0"`, ...).
    Str,
    /// Integer (ids, distances, MTUs, colors).
    Int,
    /// Nested table: a list of sub-objects, each identified by an mkey field.
    Table(TableDef),
}

/// Definition of a nested table field.
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Local name of the key attribute inside each entry.
    pub mkey: &'static str,
    /// Set-like tables are sorted by mkey on flatten so reads compare
    /// stably; sequence-sensitive tables keep wire order.
    pub sorted: bool,
    /// Schema of each table entry.
    pub schema: Schema,
}

impl TableDef {
    /// A sorted (set-like) table — the common case for member lists.
    pub fn set(mkey: &'static str, schema: Schema) -> Self {
        Self { mkey, sorted: true, schema }
    }

    /// An order-preserving table.
    pub fn sequence(mkey: &'static str, schema: Schema) -> Self {
        Self { mkey, sorted: false, schema }
    }
}

/// One attribute of an object type.
#[derive(Debug, Clone)]
pub struct Field {
    /// Wire name (kebab-case).
    pub api_name: String,
    pub kind: FieldKind,
    /// Required attributes must be present when expanding a full object.
    pub required: bool,
}

/// Ordered attribute schema for one CMDB object type.
///
/// Field order follows declaration order (and therefore the device's CLI
/// ordering), which keeps rendered output predictable.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub(crate) fields: IndexMap<&'static str, Field>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Look up a field by local attribute name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Iterate fields in declaration order as `(local_name, field)`.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Field)> {
        self.fields.iter().map(|(name, field)| (*name, field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Derive the wire name from a local attribute name.
///
/// `snake_case` becomes `kebab-case`; names that already match the wire
/// form (no underscores) pass through unchanged.
fn derive_api_name(local: &str) -> String {
    local.replace('_', "-")
}

/// Fluent schema builder. Fields are recorded in call order.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: IndexMap<&'static str, Field>,
}

impl SchemaBuilder {
    fn push(mut self, local: &'static str, kind: FieldKind, required: bool) -> Self {
        let field = Field {
            api_name: derive_api_name(local),
            kind,
            required,
        };
        self.fields.insert(local, field);
        self
    }

    /// Optional string attribute.
    pub fn str(self, local: &'static str) -> Self {
        self.push(local, FieldKind::Str, false)
    }

    /// Required string attribute.
    pub fn req_str(self, local: &'static str) -> Self {
        self.push(local, FieldKind::Str, true)
    }

    /// Optional integer attribute.
    pub fn int(self, local: &'static str) -> Self {
        self.push(local, FieldKind::Int, false)
    }

    /// Required integer attribute.
    pub fn req_int(self, local: &'static str) -> Self {
        self.push(local, FieldKind::Int, true)
    }

    /// Nested table attribute.
    pub fn table(self, local: &'static str, def: TableDef) -> Self {
        self.push(local, FieldKind::Table(def), false)
    }

    /// Override the wire name of the most recently added field, for the
    /// handful of attributes whose wire form is not a mechanical
    /// kebab-case rename (e.g. `interface` → `associated-interface`).
    pub fn wire_name(mut self, api_name: &'static str) -> Self {
        if let Some((_, field)) = self.fields.last_mut() {
            field.api_name = api_name.to_owned();
        }
        self
    }

    pub fn build(self) -> Schema {
        Schema { fields: self.fields }
    }
}
