//! Clap derive structures for the `forticfg` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! This file is also included by `build.rs` for man-page generation, so
//! it must only depend on clap + clap_complete.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// forticfg -- manage FortiGate configuration objects from the command line
#[derive(Debug, Parser)]
#[command(
    name = "forticfg",
    version,
    about = "Manage FortiGate configuration objects from the command line",
    long_about = "A CLI for FortiGate configuration management over the CMDB REST API.\n\n\
        Object types are addressed by catalog name (see `forticfg paths`),\n\
        attributes by their snake_case names (see `forticfg schema <type>`).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Gateway profile to use
    #[arg(long, short = 'p', env = "FORTICFG_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Gateway URL (overrides profile)
    #[arg(long, short = 'H', env = "FORTICFG_HOST", global = true)]
    pub host: Option<String>,

    /// REST API access token
    #[arg(long, env = "FORTICFG_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// VDOM to operate in
    #[arg(long, env = "FORTICFG_VDOM", global = true)]
    pub vdom: Option<String>,

    /// Operate in the global configuration scope instead of a VDOM
    #[arg(long = "global", global = true, conflicts_with = "vdom")]
    pub global_scope: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FORTICFG_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "FORTICFG_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "FORTICFG_TIMEOUT", value_name = "SECS", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one mkey per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the object types in the catalog (offline)
    Paths,

    /// Show the attribute schema of an object type (offline)
    Schema(SchemaArgs),

    /// List every object of a type
    #[command(alias = "ls")]
    List(TypeArgs),

    /// Fetch one object by mkey
    Get(ObjectArgs),

    /// Create a new object
    Create(WriteArgs),

    /// Update an object, creating it if absent
    Set(SetArgs),

    /// Delete an object
    #[command(alias = "rm")]
    Delete(ObjectArgs),

    /// Preview pending changes without writing (dry run)
    Diff(DiffArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Per-command argument structs ─────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,
}

#[derive(Debug, Args)]
pub struct TypeArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,
}

#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,

    /// Object key (name or numeric id)
    pub mkey: String,
}

#[derive(Debug, Args)]
pub struct WriteArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,

    /// Attribute assignment, repeatable: -a subnet="10.0.0.0 255.0.0.0"
    #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,

    /// Read attributes from a JSON file ("-" for stdin not supported)
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,

    /// Object key (name or numeric id)
    pub mkey: String,

    /// Attribute assignment, repeatable: -a status=disable
    #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,

    /// Read attributes from a JSON file
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Object type, e.g. "firewall.address"
    pub resource: String,

    /// Object key (name or numeric id)
    pub mkey: String,

    /// Attribute assignment, repeatable
    #[arg(long = "attr", short = 'a', value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,

    /// Read desired attributes from a JSON file
    #[arg(long, short = 'f', value_name = "FILE")]
    pub file: Option<PathBuf>,
}

// ── Config subcommands ───────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactively create or update a profile
    Init,

    /// Show the loaded configuration (tokens redacted)
    Show,

    /// Print the config file path
    Path,

    /// Store an access token in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },

    /// Remove a profile's token from the system keyring
    DeleteToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
