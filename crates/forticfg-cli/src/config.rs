//! CLI-side configuration resolution: profiles + flag overrides →
//! `forticfg_core::ConnectionConfig`.
//!
//! `forticfg-config` owns the TOML/keyring machinery; this module layers
//! `GlobalOpts` on top so flags always win over profile values.

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;

use forticfg_config::{Config, Profile};
use forticfg_core::{ConnectionConfig, Scope, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The active profile name: `--profile` flag, then the config default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ConnectionConfig` from the config file, profile, and CLI
/// overrides. Falls back to flags/env alone when no profile exists.
pub fn build_connection_config(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let cfg = forticfg_config::load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        debug!(profile = %profile_name, "using configured profile");
        return resolve_profile(profile, &profile_name, global);
    }

    // No profile found -- try to build from CLI flags / env vars alone.
    let host = global.host.as_deref().ok_or_else(|| CliError::NoConfig {
        path: forticfg_config::config_path().display().to_string(),
    })?;

    let url: url::Url = host.parse().map_err(|_| CliError::Validation {
        field: "host".into(),
        reason: format!("invalid URL: {host}"),
    })?;

    let token = global
        .token
        .as_ref()
        .map(|t| SecretString::from(t.clone()))
        .ok_or_else(|| CliError::NoToken {
            profile: profile_name,
        })?;

    Ok(ConnectionConfig {
        url,
        token,
        scope: scope_from_flags(global, None),
        tls: tls_from_flags(global, None),
        timeout: timeout_from_flags(global, None),
    })
}

/// Resolve a profile with CLI flag overrides applied.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ConnectionConfig, CliError> {
    let host = global.host.as_deref().unwrap_or(&profile.host);
    let url: url::Url = host.parse().map_err(|_| CliError::Validation {
        field: "host".into(),
        reason: format!("invalid URL: {host}"),
    })?;

    let token = match &global.token {
        Some(t) => SecretString::from(t.clone()),
        None => forticfg_config::resolve_token(profile, profile_name).map_err(|_| {
            CliError::NoToken {
                profile: profile_name.to_owned(),
            }
        })?,
    };

    Ok(ConnectionConfig {
        url,
        token,
        scope: scope_from_flags(global, Some(profile)),
        tls: tls_from_flags(global, Some(profile)),
        timeout: timeout_from_flags(global, Some(profile)),
    })
}

/// Timeout precedence: `--timeout` flag > profile timeout > 30s.
fn timeout_from_flags(global: &GlobalOpts, profile: Option<&Profile>) -> Duration {
    let secs = global
        .timeout
        .or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Scope precedence: `--global` > `--vdom` > profile vdom > "root".
fn scope_from_flags(global: &GlobalOpts, profile: Option<&Profile>) -> Scope {
    if global.global_scope {
        return Scope::Global;
    }
    if let Some(vdom) = &global.vdom {
        return Scope::Vdom(vdom.clone());
    }
    profile.map_or_else(|| Scope::Vdom("root".into()), Profile::scope)
}

/// TLS precedence: `--insecure` > profile insecure > profile ca_cert >
/// system defaults.
fn tls_from_flags(global: &GlobalOpts, profile: Option<&Profile>) -> TlsVerification {
    if global.insecure || profile.and_then(|p| p.insecure).unwrap_or(false) {
        return TlsVerification::DangerAcceptInvalid;
    }
    if let Some(ca) = profile.and_then(|p| p.ca_cert.clone()) {
        return TlsVerification::CustomCa(ca);
    }
    TlsVerification::SystemDefaults
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ColorMode, OutputFormat};

    fn opts() -> GlobalOpts {
        GlobalOpts {
            profile: None,
            host: None,
            token: None,
            vdom: None,
            global_scope: false,
            output: OutputFormat::Table,
            color: ColorMode::Auto,
            verbose: 0,
            quiet: false,
            yes: false,
            insecure: false,
            timeout: None,
        }
    }

    fn profile_with_timeout(secs: u64) -> Profile {
        Profile {
            host: "https://gw".into(),
            timeout: Some(secs),
            ..Profile::default()
        }
    }

    #[test]
    fn explicit_timeout_flag_beats_profile_timeout() {
        let mut global = opts();
        global.timeout = Some(30);

        let timeout = timeout_from_flags(&global, Some(&profile_with_timeout(120)));
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn profile_timeout_applies_when_flag_absent() {
        let timeout = timeout_from_flags(&opts(), Some(&profile_with_timeout(120)));
        assert_eq!(timeout, Duration::from_secs(120));
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        assert_eq!(
            timeout_from_flags(&opts(), None),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(timeout_from_flags(&opts(), None), Duration::from_secs(30));
    }

    #[test]
    fn global_flag_beats_vdom_settings() {
        let mut global = opts();
        global.global_scope = true;
        global.vdom = None;

        let profile = Profile {
            host: "https://gw".into(),
            vdom: "lab".into(),
            ..Profile::default()
        };
        assert_eq!(scope_from_flags(&global, Some(&profile)), Scope::Global);
    }
}
