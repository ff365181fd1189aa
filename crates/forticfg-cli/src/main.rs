mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use forticfg_core::Cmdb;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Offline commands need no gateway connection
        Command::Paths => commands::schema_cmd::paths(&cli.global),
        Command::Schema(args) => commands::schema_cmd::schema(&args, &cli.global),
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "forticfg", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the gateway
        cmd => {
            let conn = config::build_connection_config(&cli.global)?;
            let profile = commands::util::active_profile(&cli.global);
            let cmdb =
                Cmdb::connect(&conn).map_err(|e| CliError::from_core(e, &profile))?;

            commands::dispatch(cmd, &cmdb, &cli.global).await
        }
    }
}
