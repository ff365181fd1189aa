//! Dry-run preview: fetch the live object and diff desired attributes
//! against it without writing anything.

use owo_colors::OwoColorize;

use forticfg_core::{diff, Cmdb};

use crate::cli::{DiffArgs, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(cmdb: &Cmdb, args: DiffArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;
    let desired = util::gather_attrs(args.file.as_deref(), &args.attrs)?;

    // An absent object diffs against nothing: every attribute is an add.
    let current = match cmdb.get(def, &args.mkey).await {
        Ok(item) => item,
        Err(e) if e.is_not_found() => serde_json::Map::new(),
        Err(e) => return Err(CliError::from_core(e, &util::active_profile(global))),
    };

    let changes = diff(&def.schema, &current, &desired)
        .map_err(|e| CliError::from_core(e.into(), &util::active_profile(global)))?;

    if matches!(global.output, OutputFormat::Json | OutputFormat::JsonCompact) {
        let out = if matches!(global.output, OutputFormat::JsonCompact) {
            serde_json::to_string(&changes)
        } else {
            serde_json::to_string_pretty(&changes)
        };
        println!("{}", out.unwrap_or_default());
        return Ok(());
    }

    if changes.is_empty() {
        if !global.quiet {
            eprintln!("no changes");
        }
        return Ok(());
    }

    let colored = output::should_color(&global.color);
    for change in &changes {
        if colored {
            match (&change.old, &change.new) {
                (None, Some(_)) => println!("{}", change.green()),
                (Some(_), None) => println!("{}", change.red()),
                _ => println!("{}", change.yellow()),
            }
        } else {
            println!("{change}");
        }
    }
    if !global.quiet {
        eprintln!("{} pending change(s)", changes.len());
    }
    Ok(())
}
