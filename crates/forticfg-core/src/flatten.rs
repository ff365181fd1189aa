//! Read-path transform: wire JSON → normalized attribute map.
//!
//! The gateway returns objects with kebab-case keys, loosely typed scalars
//! (integers sometimes arrive as strings and vice versa), member tables as
//! arrays of sub-objects, and plenty of fields no schema cares about.
//! `flatten` normalizes all of that: schema fields only, local names,
//! coerced scalars, recursively flattened tables, set-like tables sorted
//! by mkey so two reads of the same object always compare equal.

use serde_json::{Map, Value};

use crate::schema::{Field, FieldKind, Schema, SchemaError, TableDef};

/// Flatten a raw wire object into a normalized attribute map.
///
/// Fields absent from the wire object (or JSON `null`) are absent from the
/// result — never null. Wire fields not covered by the schema are dropped.
pub fn flatten(schema: &Schema, raw: &Value) -> Result<Map<String, Value>, SchemaError> {
    let obj = raw.as_object().ok_or_else(|| SchemaError::NotAnObject {
        context: "object body".into(),
    })?;

    let mut out = Map::new();
    for (local, field) in schema.iter() {
        let Some(raw_value) = obj.get(&field.api_name) else {
            continue;
        };
        if raw_value.is_null() {
            continue;
        }

        let value = flatten_field(local, field, raw_value)?;
        out.insert(local.to_owned(), value);
    }

    Ok(out)
}

fn flatten_field(local: &str, field: &Field, raw: &Value) -> Result<Value, SchemaError> {
    match &field.kind {
        FieldKind::Str => coerce_str(local, raw).map(Value::String),
        FieldKind::Int => coerce_int(local, raw).map(Value::from),
        FieldKind::Table(def) => flatten_table(local, def, raw),
    }
}

/// Flatten a nested table field.
///
/// Accepts the usual array-of-objects, a bare object (single entry), or a
/// bare scalar / array of scalars (some firmwares abbreviate single-field
/// member entries to just the key value).
fn flatten_table(local: &str, def: &TableDef, raw: &Value) -> Result<Value, SchemaError> {
    let entries: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let row = match entry {
            Value::Object(_) => flatten(&def.schema, entry)?,
            Value::String(_) | Value::Number(_) => {
                // Abbreviated entry: the scalar is the mkey.
                let key_field =
                    def.schema
                        .field(def.mkey)
                        .ok_or_else(|| SchemaError::MissingTableKey {
                            field: local.to_owned(),
                            mkey: def.mkey.to_owned(),
                        })?;
                let mut row = Map::new();
                row.insert(def.mkey.to_owned(), flatten_field(def.mkey, key_field, entry)?);
                row
            }
            _ => {
                return Err(SchemaError::NotAnObject {
                    context: format!("entry of table '{local}'"),
                });
            }
        };
        rows.push(row);
    }

    if def.sorted {
        sort_rows(&mut rows, def.mkey);
    }

    Ok(Value::Array(rows.into_iter().map(Value::Object).collect()))
}

/// Sort table rows by mkey: numerically when every key is a number,
/// lexically otherwise.
pub(crate) fn sort_rows(rows: &mut [Map<String, Value>], mkey: &str) {
    rows.sort_by(|a, b| {
        let ka = a.get(mkey);
        let kb = b.get(mkey);
        match (ka.and_then(Value::as_i64), kb.and_then(Value::as_i64)) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            _ => {
                let sa = ka.and_then(Value::as_str).unwrap_or_default();
                let sb = kb.and_then(Value::as_str).unwrap_or_default();
                sa.cmp(sb)
            }
        }
    });
}

// ── Scalar coercion ─────────────────────────────────────────────────

/// Coerce a wire value to a string attribute. Numbers are rendered,
/// anything else is a type mismatch.
pub(crate) fn coerce_str(name: &str, raw: &Value) -> Result<String, SchemaError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(SchemaError::TypeMismatch {
            name: name.to_owned(),
            expected: "string",
            got: type_name(other).to_owned(),
        }),
    }
}

/// Coerce a wire value to an integer attribute. Numeric strings parse,
/// anything else is a type mismatch.
pub(crate) fn coerce_int(name: &str, raw: &Value) -> Result<i64, SchemaError> {
    match raw {
        Value::Number(n) => n.as_i64().ok_or_else(|| SchemaError::TypeMismatch {
            name: name.to_owned(),
            expected: "integer",
            got: format!("non-integer number {n}"),
        }),
        Value::String(s) => s.trim().parse().map_err(|_| SchemaError::TypeMismatch {
            name: name.to_owned(),
            expected: "integer",
            got: format!("string \"{s}\""),
        }),
        other => Err(SchemaError::TypeMismatch {
            name: name.to_owned(),
            expected: "integer",
            got: type_name(other).to_owned(),
        }),
    }
}

pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
