//! Attribute-level diff between a live object and a desired attribute map.
//!
//! Powers the CLI's dry-run preview: fetch + flatten the current object,
//! diff the desired attributes against it, print the pending changes
//! without writing anything. Only attributes present in `desired` are
//! considered — absent attributes are unmanaged, matching the partial-PUT
//! semantics of the write path.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::schema::{FieldKind, Schema, SchemaError};

/// One pending change, addressed by attribute path.
///
/// Table entries are addressed as `attr[mkey]` and their inner fields as
/// `attr[mkey].field`. Serializes as `{ path, old, new }` for machine
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub path: String,
    /// Current value (`None` when the attribute/entry is being added).
    pub old: Option<Value>,
    /// Desired value (`None` when the entry is being removed).
    pub new: Option<Value>,
}

impl Change {
    fn set(path: String, old: Option<Value>, new: Value) -> Self {
        Self { path, old, new: Some(new) }
    }

    fn remove(path: String, old: Value) -> Self {
        Self { path, old: Some(old), new: None }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.old, &self.new) {
            (None, Some(new)) => write!(f, "+ {}: {new}", self.path),
            (Some(old), None) => write!(f, "- {}: {old}", self.path),
            (Some(old), Some(new)) => write!(f, "~ {}: {old} -> {new}", self.path),
            (None, None) => write!(f, "  {}", self.path),
        }
    }
}

/// Diff `desired` against `current`, both in normalized (flattened) form.
///
/// `desired` is validated against the schema; unknown attributes error the
/// same way the write path would. Scalar attributes compare directly;
/// table attributes diff entry-wise keyed by mkey.
pub fn diff(
    schema: &Schema,
    current: &Map<String, Value>,
    desired: &Map<String, Value>,
) -> Result<Vec<Change>, SchemaError> {
    let mut changes = Vec::new();

    for (name, new_value) in desired {
        let field = schema
            .field(name)
            .ok_or_else(|| SchemaError::UnknownAttribute { name: name.clone() })?;

        let old_value = current.get(name);

        match &field.kind {
            FieldKind::Str | FieldKind::Int => {
                if old_value != Some(new_value) {
                    changes.push(Change::set(
                        name.clone(),
                        old_value.cloned(),
                        new_value.clone(),
                    ));
                }
            }
            FieldKind::Table(def) => {
                diff_table(name, def.mkey, old_value, new_value, &mut changes);
            }
        }
    }

    Ok(changes)
}

/// Entry-wise table diff keyed by mkey.
fn diff_table(
    attr: &str,
    mkey: &str,
    old_value: Option<&Value>,
    new_value: &Value,
    changes: &mut Vec<Change>,
) {
    let old_entries = table_entries(old_value.unwrap_or(&Value::Null), mkey);
    let new_entries = table_entries(new_value, mkey);

    // Additions and per-entry field changes.
    for (key, new_entry) in &new_entries {
        let path = format!("{attr}[{key}]");
        match old_entries.iter().find(|(k, _)| k == key) {
            None => changes.push(Change::set(path, None, Value::Object((*new_entry).clone()))),
            Some((_, old_entry)) => {
                for (field, new_field_value) in *new_entry {
                    if field == mkey {
                        continue;
                    }
                    let old_field_value = old_entry.get(field);
                    if old_field_value != Some(new_field_value) {
                        changes.push(Change::set(
                            format!("{path}.{field}"),
                            old_field_value.cloned(),
                            new_field_value.clone(),
                        ));
                    }
                }
            }
        }
    }

    // Removals.
    for (key, old_entry) in &old_entries {
        if !new_entries.iter().any(|(k, _)| k == key) {
            changes.push(Change::remove(
                format!("{attr}[{key}]"),
                Value::Object((*old_entry).clone()),
            ));
        }
    }
}

/// Collect `(mkey-as-string, entry)` pairs from a flattened table value.
fn table_entries<'a>(value: &'a Value, mkey: &str) -> Vec<(String, &'a Map<String, Value>)> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let key = match entry.get(mkey) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            (key, entry)
        })
        .collect()
}
