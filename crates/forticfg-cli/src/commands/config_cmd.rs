//! Config subcommand handlers.

use dialoguer::{Input, Select};

use forticfg_config::{self as config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("forticfg — configuration wizard");
            eprintln!("  Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let host: String = Input::new()
                .with_prompt("Gateway URL")
                .default("https://192.168.1.99".into())
                .interact_text()
                .map_err(prompt_err)?;

            host.parse::<url::Url>().map_err(|_| CliError::Validation {
                field: "host".into(),
                reason: format!("invalid URL: {host}"),
            })?;

            let vdom: String = Input::new()
                .with_prompt("VDOM (empty for global scope)")
                .default("root".into())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let token = rpassword::prompt_password("REST API access token: ")
                .map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "access token cannot be empty".into(),
                });
            }

            let store_choices = &[
                "Store in system keyring (recommended)",
                "Save to config file (plaintext)",
            ];
            let store_selection = Select::new()
                .with_prompt("Where to store the token?")
                .items(store_choices)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let token_field = if store_selection == 0 {
                config::store_token(&profile_name, &token)?;
                eprintln!("  ✓ Token stored in system keyring");
                None
            } else {
                Some(token)
            };

            let profile = Profile {
                host,
                vdom,
                token: token_field,
                token_env: None,
                ca_cert: None,
                insecure: None,
                timeout: None,
            };

            let mut cfg = config::load_config_or_default();
            cfg.profiles.insert(profile_name.clone(), profile);
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: forticfg list firewall.address");
            Ok(())
        }

        // ── Show (tokens redacted) ──────────────────────────────────
        ConfigCommand::Show => {
            let mut cfg = config::load_config_or_default();
            for profile in cfg.profiles.values_mut() {
                if profile.token.is_some() {
                    profile.token = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to serialize config: {e}"),
            })?;
            println!("{}", rendered.trim_end());
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        // ── Set-token ───────────────────────────────────────────────
        ConfigCommand::SetToken { profile } => {
            let name = token_profile(profile, global);
            let token = rpassword::prompt_password("REST API access token: ")
                .map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "access token cannot be empty".into(),
                });
            }
            config::store_token(&name, &token)?;
            eprintln!("✓ Token stored in keyring for profile '{name}'");
            Ok(())
        }

        // ── Delete-token ────────────────────────────────────────────
        ConfigCommand::DeleteToken { profile } => {
            let name = token_profile(profile, global);
            config::delete_token(&name)?;
            eprintln!("✓ Token removed from keyring for profile '{name}'");
            Ok(())
        }
    }
}

/// The profile a token operation targets: explicit flag, then the
/// globally active profile.
fn token_profile(flag: Option<String>, global: &GlobalOpts) -> String {
    flag.unwrap_or_else(|| {
        let cfg = config::load_config_or_default();
        crate::config::active_profile_name(global, &cfg)
    })
}
