//! Object CRUD handlers: list, get, create, set, delete.
//!
//! Each handler resolves the catalog definition, runs the CMDB
//! operation, and renders the result in the requested format. Errors
//! come back as `CliError` with the active profile attached so auth
//! failures point at the right token.

use owo_colors::OwoColorize;

use forticfg_core::Cmdb;

use crate::cli::{GlobalOpts, ObjectArgs, SetArgs, TypeArgs, WriteArgs};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn list(cmdb: &Cmdb, args: TypeArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;
    let items = cmdb
        .list(def)
        .await
        .map_err(|e| CliError::from_core(e, &util::active_profile(global)))?;

    println!("{}", output::render_list(&global.output, def, &items));
    if !global.quiet {
        eprintln!("{} object(s)", items.len());
    }
    Ok(())
}

pub async fn get(cmdb: &Cmdb, args: ObjectArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;
    let item = cmdb
        .get(def, &args.mkey)
        .await
        .map_err(|e| CliError::from_core(e, &util::active_profile(global)))?;

    println!("{}", output::render_single(&global.output, def, &item));
    Ok(())
}

pub async fn create(cmdb: &Cmdb, args: WriteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;
    let attrs = util::gather_attrs(args.file.as_deref(), &args.attrs)?;

    let mkey = cmdb
        .create(def, &attrs)
        .await
        .map_err(|e| CliError::from_core(e, &util::active_profile(global)))?;

    // Print the (possibly auto-assigned) mkey so scripts can capture it.
    println!("{mkey}");
    if !global.quiet {
        let colored = output::should_color(&global.color);
        if colored {
            eprintln!("{} created {} '{}'", "✓".green(), def.name, mkey);
        } else {
            eprintln!("✓ created {} '{}'", def.name, mkey);
        }
    }
    Ok(())
}

pub async fn set(cmdb: &Cmdb, args: SetArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;
    let attrs = util::gather_attrs(args.file.as_deref(), &args.attrs)?;

    let mkey = cmdb
        .set(def, &args.mkey, &attrs)
        .await
        .map_err(|e| CliError::from_core(e, &util::active_profile(global)))?;

    println!("{mkey}");
    if !global.quiet {
        eprintln!("✓ set {} '{}'", def.name, mkey);
    }
    Ok(())
}

pub async fn delete(cmdb: &Cmdb, args: ObjectArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let def = util::lookup_resource(&args.resource)?;

    let prompt = format!("Delete {} '{}'?", def.name, args.mkey);
    if !util::confirm(&prompt, global.yes)? {
        return Err(CliError::Cancelled);
    }

    cmdb.delete(def, &args.mkey)
        .await
        .map_err(|e| CliError::from_core(e, &util::active_profile(global)))?;

    if !global.quiet {
        eprintln!("✓ deleted {} '{}'", def.name, args.mkey);
    }
    Ok(())
}
