//! Output formatting: table, JSON, YAML, plain.
//!
//! Objects are schema-shaped attribute maps, so tables are built
//! dynamically from the resource schema rather than derived per type:
//! lists show the mkey plus the first few scalar columns, single objects
//! render as a field/value detail table.

use std::io::{self, IsTerminal};

use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

use forticfg_core::{FieldKind, ResourceDef};

use crate::cli::{ColorMode, OutputFormat};

/// Maximum number of columns in a list table (mkey included).
const MAX_LIST_COLUMNS: usize = 6;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of objects in the chosen format.
pub fn render_list(
    format: &OutputFormat,
    def: &ResourceDef,
    items: &[Map<String, Value>],
) -> String {
    match format {
        OutputFormat::Table => list_table(def, items),
        OutputFormat::Json => render_json(items, false),
        OutputFormat::JsonCompact => render_json(items, true),
        OutputFormat::Yaml => render_yaml(items),
        OutputFormat::Plain => items
            .iter()
            .map(|item| scalar_to_string(item.get(def.mkey)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Render a single object in the chosen format.
pub fn render_single(
    format: &OutputFormat,
    def: &ResourceDef,
    item: &Map<String, Value>,
) -> String {
    match format {
        OutputFormat::Table => detail_table(def, item),
        OutputFormat::Json => render_json(item, false),
        OutputFormat::JsonCompact => render_json(item, true),
        OutputFormat::Yaml => render_yaml(item),
        OutputFormat::Plain => scalar_to_string(item.get(def.mkey)),
    }
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("serialization error: {e}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization error: {e}"))
}

// ── Table builders ───────────────────────────────────────────────────

/// Pick the columns for a list table: the mkey first, then scalar fields
/// in schema order up to `MAX_LIST_COLUMNS`.
fn list_columns(def: &ResourceDef) -> Vec<&'static str> {
    let mut columns = vec![def.mkey];
    for (local, field) in def.schema.iter() {
        if columns.len() == MAX_LIST_COLUMNS {
            break;
        }
        if local == def.mkey {
            continue;
        }
        if matches!(field.kind, FieldKind::Str | FieldKind::Int) {
            columns.push(local);
        }
    }
    columns
}

fn list_table(def: &ResourceDef, items: &[Map<String, Value>]) -> String {
    let columns = list_columns(def);

    let mut builder = Builder::default();
    builder.push_record(columns.iter().copied());
    for item in items {
        builder.push_record(columns.iter().map(|col| scalar_to_string(item.get(*col))));
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Field/value detail table covering every attribute present, tables
/// rendered as compact JSON.
fn detail_table(def: &ResourceDef, item: &Map<String, Value>) -> String {
    let mut builder = Builder::default();
    builder.push_record(["attribute", "value"]);
    for (local, _field) in def.schema.iter() {
        let Some(value) = item.get(local) else {
            continue;
        };
        builder.push_record([local.to_owned(), value_to_string(value)]);
    }

    builder.build().with(Style::rounded()).to_string()
}

// ── Value rendering ──────────────────────────────────────────────────

fn scalar_to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
        None => "-".into(),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
