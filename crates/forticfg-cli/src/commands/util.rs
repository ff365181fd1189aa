//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::{Map, Value};

use forticfg_core::ResourceDef;

use crate::error::CliError;

use crate::cli::GlobalOpts;

/// The profile name in effect, for error diagnostics.
pub fn active_profile(global: &GlobalOpts) -> String {
    let cfg = forticfg_config::load_config_or_default();
    crate::config::active_profile_name(global, &cfg)
}

/// Look up a catalog definition or fail with a helpful error.
pub fn lookup_resource(name: &str) -> Result<&'static ResourceDef, CliError> {
    forticfg_core::catalog::find(name).ok_or_else(|| CliError::UnknownResource {
        name: name.to_owned(),
    })
}

/// Parse repeated `-a key=value` assignments into an attribute map.
///
/// Values that parse as JSON (numbers, arrays, objects) are taken as
/// such, so `-a 'srcaddr=["lan"]'` and `-a color=7` both do the right
/// thing; everything else is a plain string.
pub fn parse_attrs(assignments: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut attrs = Map::new();
    for assignment in assignments {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| CliError::Validation {
            field: "attr".into(),
            reason: format!("expected KEY=VALUE, got '{assignment}'"),
        })?;
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
        attrs.insert(key.trim().to_owned(), value);
    }
    Ok(attrs)
}

/// Read and parse a JSON object file for `--file` flags.
pub fn read_attrs_file(path: &Path) -> Result<Map<String, Value>, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "file".into(),
        reason: format!("invalid JSON: {e}"),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CliError::Validation {
            field: "file".into(),
            reason: "expected a JSON object of attributes".into(),
        }),
    }
}

/// Merge `--file` attributes with `-a` assignments (flags win).
pub fn gather_attrs(
    file: Option<&Path>,
    assignments: &[String],
) -> Result<Map<String, Value>, CliError> {
    let mut attrs = match file {
        Some(path) => read_attrs_file(path)?,
        None => Map::new(),
    };
    for (key, value) in parse_attrs(assignments)? {
        attrs.insert(key, value);
    }
    if attrs.is_empty() {
        return Err(CliError::Validation {
            field: "attributes".into(),
            reason: "no attributes given; use --attr or --file".into(),
        });
    }
    Ok(attrs)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parse_attrs_detects_json_values() {
        let attrs = parse_attrs(&[
            "color=7".into(),
            "subnet=10.0.0.0 255.0.0.0".into(),
            r#"srcaddr=["lan","dmz"]"#.into(),
        ])
        .unwrap();

        assert_eq!(attrs["color"], json!(7));
        assert_eq!(attrs["subnet"], json!("10.0.0.0 255.0.0.0"));
        assert_eq!(attrs["srcaddr"], json!(["lan", "dmz"]));
    }

    #[test]
    fn parse_attrs_rejects_missing_equals() {
        let err = parse_attrs(&["oops".into()]).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn gather_attrs_lets_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("addr.json");
        std::fs::write(&path, r#"{ "subnet": "10.0.0.0 255.0.0.0", "color": 1 }"#).unwrap();

        let attrs = gather_attrs(Some(&path), &["color=9".into()]).unwrap();

        assert_eq!(attrs["subnet"], json!("10.0.0.0 255.0.0.0"));
        assert_eq!(attrs["color"], json!(9));
    }

    #[test]
    fn gather_attrs_requires_something() {
        let err = gather_attrs(None, &[]).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }
}
