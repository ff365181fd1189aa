//! Command dispatch: bridges CLI args -> CMDB operations -> output.

pub mod config_cmd;
pub mod diff_cmd;
pub mod objects;
pub mod schema_cmd;
pub mod util;

use forticfg_core::Cmdb;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a gateway-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, cmdb: &Cmdb, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => objects::list(cmdb, args, global).await,
        Command::Get(args) => objects::get(cmdb, args, global).await,
        Command::Create(args) => objects::create(cmdb, args, global).await,
        Command::Set(args) => objects::set(cmdb, args, global).await,
        Command::Delete(args) => objects::delete(cmdb, args, global).await,
        Command::Diff(args) => diff_cmd::handle(cmdb, args, global).await,
        // Paths, Schema, Config and Completions are handled before dispatch
        Command::Paths
        | Command::Schema(_)
        | Command::Config(_)
        | Command::Completions(_) => unreachable!(),
    }
}
