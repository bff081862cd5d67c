//! CLI entry point - the composition root.
//!
//! Settings are loaded before argument parsing so a saved host reaches
//! `--host` through its environment fallback. Everything else is wired in
//! `bootstrap`; handlers only see `CliContext`.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use picozen_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

const VERBOSE_FILTER: &str = "picozen_core=debug,picozen_remote=debug,picozen_cli=debug";

fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings() {
    // A missing or unreadable settings file just means no saved host
    if let Ok(path) = picozen_core::env_file_path() {
        dotenvy::from_path(path).ok();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // Host management never touches the network, so it skips bootstrap
    let connect = move || bootstrap(config);

    match command {
        Commands::Host { command } => handlers::host::execute(command),
        Commands::Ls { path, json } => handlers::ls::execute(&connect()?, &path, json).await,
        Commands::Browse { path } => handlers::browse::execute(&connect()?, &path).await,
        Commands::Get {
            path,
            output,
            force,
        } => handlers::get::execute(&connect()?, &path, output.as_deref(), force).await,
        Commands::Url { path } => handlers::url::execute(&connect()?, &path),
        Commands::Watch { path, interval } => {
            handlers::watch::execute(&connect()?, &path, interval).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_settings();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
