use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use dl_cli::commands::{input, parse, summary, sync};
use dl_cli::{Cli, Commands, Config, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Sync reads its config before tracing starts: the run log location lives there
    let is_sync = matches!(cli.command, Some(Commands::Sync(_)));
    let config = if is_sync {
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?
    } else {
        Config::default()
    };
    let run_log_dir = is_sync.then(|| config.run_log_dir());
    let _run_log = logging::init(cli.verbose, run_log_dir.as_deref())?;

    let mut stdout = io::stdout().lock();

    match &cli.command {
        Some(Commands::Parse { input: args, json }) => {
            let parsed = input::read_log(args)?;
            parse::run(&mut stdout, &parsed, *json)?;
        }
        Some(Commands::Summary { input: args, json }) => {
            let parsed = input::read_log(args)?;
            summary::run(&mut stdout, &parsed, *json)?;
        }
        Some(Commands::Sync(args)) => {
            tracing::debug!(?config, "loaded configuration");
            sync::run(&mut stdout, args, &config)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
