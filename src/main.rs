//! ctascope - find the primary call-to-action on a captured web page

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ctascope::cli::{Cli, Commands, ConfigCommands};
use ctascope::error::Result;

mod commands;

/// Environment variable read when `RUST_LOG` is unset
const LOG_ENV: &str = "CTASCOPE_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "ctascope=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.hint() {
            eprintln!("\n{}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze { snapshot, json } => {
            commands::cmd_analyze(&snapshot, config_path, json)
        }
        Commands::Match {
            snapshot,
            text,
            alternatives,
            form,
            confidence,
            json,
        } => commands::cmd_match(
            &snapshot, config_path, text, alternatives, form, confidence, json,
        ),
        Commands::Sections { page_height, json } => {
            commands::cmd_sections(config_path, page_height, json)
        }

        Commands::Config(ConfigCommands::Show) => commands::cmd_config_show(config_path),
        Commands::Config(ConfigCommands::Path) => commands::cmd_config_path(config_path),
        Commands::Config(ConfigCommands::Init { force }) => {
            commands::cmd_config_init(config_path, force)
        }

        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
