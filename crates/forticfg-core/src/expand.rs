//! Write-path transform: normalized attribute map → wire JSON.
//!
//! Exact inverse of [`crate::flatten`]: local names become wire names,
//! scalars are emitted with their schema type regardless of how the caller
//! spelled them, and table entries are validated to carry their mkey.
//! Unknown attributes are an error on this path — a typo in a write must
//! never silently drop configuration.

use serde_json::{Map, Value};

use crate::flatten::{coerce_int, coerce_str, type_name};
use crate::schema::{Field, FieldKind, Schema, SchemaError, TableDef};

/// Expand a normalized attribute map into a wire JSON object.
///
/// Attributes absent from `attrs` are omitted from the payload (the CMDB
/// API merges partial PUT bodies), but attributes the schema marks
/// `required` must be present. JSON `null` counts as absent.
pub fn expand(schema: &Schema, attrs: &Map<String, Value>) -> Result<Value, SchemaError> {
    for (name, value) in attrs {
        if schema.field(name).is_none() {
            return Err(SchemaError::UnknownAttribute { name: name.clone() });
        }
        // Required fields may not be nulled out.
        if value.is_null() && schema.field(name).is_some_and(|f| f.required) {
            return Err(SchemaError::MissingRequired { name: name.clone() });
        }
    }

    for (local, field) in schema.iter() {
        if field.required && !attrs.get(local).is_some_and(|v| !v.is_null()) {
            return Err(SchemaError::MissingRequired {
                name: local.to_owned(),
            });
        }
    }

    let mut out = Map::new();
    for (local, field) in schema.iter() {
        let Some(value) = attrs.get(local) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        out.insert(field.api_name.clone(), expand_field(local, field, value)?);
    }

    Ok(Value::Object(out))
}

/// Expand a partial attribute map (e.g. an update body). Unknown
/// attributes still error, but `required` markers are not enforced.
pub fn expand_partial(schema: &Schema, attrs: &Map<String, Value>) -> Result<Value, SchemaError> {
    let mut out = Map::new();
    for (name, value) in attrs {
        let field = schema
            .field(name)
            .ok_or_else(|| SchemaError::UnknownAttribute { name: name.clone() })?;
        if value.is_null() {
            continue;
        }
        out.insert(field.api_name.clone(), expand_field(name, field, value)?);
    }
    Ok(Value::Object(out))
}

fn expand_field(local: &str, field: &Field, value: &Value) -> Result<Value, SchemaError> {
    match &field.kind {
        FieldKind::Str => coerce_str(local, value).map(Value::String),
        FieldKind::Int => coerce_int(local, value).map(Value::from),
        FieldKind::Table(def) => expand_table(local, def, value),
    }
}

fn expand_table(local: &str, def: &TableDef, value: &Value) -> Result<Value, SchemaError> {
    let entries = match value {
        Value::Array(items) => items.as_slice(),
        other => std::slice::from_ref(other),
    };

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let obj = match entry {
            Value::Object(map) => map.clone(),
            // Abbreviated entry: a bare scalar stands for the mkey.
            Value::String(_) | Value::Number(_) => {
                let mut map = Map::new();
                map.insert(def.mkey.to_owned(), entry.clone());
                map
            }
            other => {
                return Err(SchemaError::TypeMismatch {
                    name: local.to_owned(),
                    expected: "table entry object",
                    got: type_name(other).to_owned(),
                });
            }
        };

        if !obj.get(def.mkey).is_some_and(|v| !v.is_null()) {
            return Err(SchemaError::MissingTableKey {
                field: local.to_owned(),
                mkey: def.mkey.to_owned(),
            });
        }

        rows.push(expand(&def.schema, &obj)?);
    }

    Ok(Value::Array(rows))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::flatten::flatten;
    use crate::schema::{Schema, TableDef};

    fn policy_schema() -> Schema {
        Schema::builder()
            .int("policyid")
            .req_str("name")
            .table(
                "srcaddr",
                TableDef::set("name", Schema::builder().req_str("name").build()),
            )
            .str("action")
            .int("priority")
            .build()
    }

    fn attrs(v: serde_json::Value) -> Map<String, Value> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn expands_to_wire_names_and_types() {
        let body = expand(
            &policy_schema(),
            &attrs(json!({
                "name": "allow-lan",
                "action": "accept",
                "priority": "5",
            })),
        )
        .unwrap();

        assert_eq!(
            body,
            json!({ "name": "allow-lan", "action": "accept", "priority": 5 })
        );
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let err = expand(
            &policy_schema(),
            &attrs(json!({ "name": "p", "nat_mode": "enable" })),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownAttribute { name: "nat_mode".into() }
        );
    }

    #[test]
    fn missing_required_attribute_is_an_error() {
        let err = expand(&policy_schema(), &attrs(json!({ "action": "deny" }))).unwrap_err();
        assert_eq!(err, SchemaError::MissingRequired { name: "name".into() });
    }

    #[test]
    fn partial_expand_skips_required_check() {
        let body = expand_partial(&policy_schema(), &attrs(json!({ "action": "deny" }))).unwrap();
        assert_eq!(body, json!({ "action": "deny" }));
    }

    #[test]
    fn table_entries_require_their_mkey() {
        let err = expand(
            &policy_schema(),
            &attrs(json!({ "name": "p", "srcaddr": [{ "comment": "x" }] })),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingTableKey {
                field: "srcaddr".into(),
                mkey: "name".into(),
            }
        );
    }

    #[test]
    fn abbreviated_table_entries_expand_to_keyed_objects() {
        let body = expand(
            &policy_schema(),
            &attrs(json!({ "name": "p", "srcaddr": ["lan", "dmz"] })),
        )
        .unwrap();
        assert_eq!(
            body["srcaddr"],
            json!([{ "name": "lan" }, { "name": "dmz" }])
        );
    }

    #[test]
    fn flatten_of_expand_round_trips() {
        let schema = policy_schema();
        let input = attrs(json!({
            "policyid": 4,
            "name": "allow-lan",
            "srcaddr": [{ "name": "dmz" }, { "name": "lan" }],
            "action": "accept",
        }));

        let wire = expand(&schema, &input).unwrap();
        let back = flatten(&schema, &wire).unwrap();

        assert_eq!(Value::Object(back), Value::Object(input));
    }

    #[test]
    fn null_optional_attributes_are_omitted_from_the_payload() {
        let body = expand(
            &policy_schema(),
            &attrs(json!({ "name": "p", "action": null })),
        )
        .unwrap();
        assert_eq!(body, json!({ "name": "p" }));
    }
}
