//! Offline catalog inspection: `paths` and `schema`.

use tabled::builder::Builder;
use tabled::settings::Style;

use forticfg_core::{catalog, FieldKind, MkeyKind, ResourceDef};

use crate::cli::{GlobalOpts, OutputFormat, SchemaArgs};
use crate::error::CliError;

use super::util;

/// `forticfg paths`: list every object type in the catalog.
pub fn paths(global: &GlobalOpts) -> Result<(), CliError> {
    let defs = catalog::all();

    match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            let names: Vec<&str> = defs.iter().map(|d| d.name).collect();
            print_serialized(&global.output, &names);
        }
        OutputFormat::Plain => {
            for def in &defs {
                println!("{}", def.name);
            }
        }
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["type", "endpoint", "mkey", "attributes"]);
            for def in &defs {
                builder.push_record([
                    def.name.to_owned(),
                    def.path.endpoint(),
                    def.mkey.to_owned(),
                    def.schema.len().to_string(),
                ]);
            }
            println!("{}", builder.build().with(Style::rounded()));
        }
    }
    Ok(())
}

/// `forticfg schema <type>`: show the attribute schema of one type.
pub fn schema(args: &SchemaArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;

    match global.output {
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml => {
            print_serialized(&global.output, &describe(def));
        }
        OutputFormat::Plain => {
            for (local, _field) in def.schema.iter() {
                println!("{local}");
            }
        }
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(["attribute", "wire name", "kind", "required"]);
            for (local, field) in def.schema.iter() {
                builder.push_record([
                    local.to_owned(),
                    field.api_name.clone(),
                    kind_name(&field.kind).to_owned(),
                    if field.required { "yes" } else { "" }.to_owned(),
                ]);
            }
            println!("{}", builder.build().with(Style::rounded()));
            eprintln!(
                "mkey: {} ({})",
                def.mkey,
                match def.mkey_kind() {
                    MkeyKind::Str => "string",
                    MkeyKind::Int => "integer",
                }
            );
        }
    }
    Ok(())
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Str => "string",
        FieldKind::Int => "integer",
        FieldKind::Table(t) if t.sorted => "table",
        FieldKind::Table(_) => "table (ordered)",
    }
}

/// Schema description as plain JSON for machine output.
fn describe(def: &ResourceDef) -> serde_json::Value {
    let fields: Vec<serde_json::Value> = def
        .schema
        .iter()
        .map(|(local, field)| {
            serde_json::json!({
                "name": local,
                "wire_name": field.api_name,
                "kind": kind_name(&field.kind),
                "required": field.required,
            })
        })
        .collect();

    serde_json::json!({
        "type": def.name,
        "endpoint": def.path.endpoint(),
        "mkey": def.mkey,
        "fields": fields,
    })
}

fn print_serialized<T: serde::Serialize>(format: &OutputFormat, data: &T) {
    let out = match format {
        OutputFormat::JsonCompact => serde_json::to_string(data).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(data).unwrap_or_default(),
        _ => serde_json::to_string_pretty(data).unwrap_or_default(),
    };
    println!("{}", out.trim_end());
}
