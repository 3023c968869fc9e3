// src/main.rs

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use wolfi_dev::Error;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        // Mistakes the user can fix (bad argument, missing identity,
        // existing package, absent tool) exit 1; anything else is an
        // internal failure and exits 2.
        let recoverable = err
            .downcast_ref::<Error>()
            .is_some_and(Error::is_user_recoverable);
        std::process::exit(if recoverable { 1 } else { 2 });
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Sandbox { label }) => commands::sandbox::cmd_sandbox(label.as_deref()),
        Some(Commands::Clone { repo, url }) => commands::clone::cmd_clone(&repo, url.as_deref()),
        Some(Commands::Branch { branch, repo }) => commands::branch::cmd_branch(&branch, &repo),
        Some(Commands::Convert { package }) => commands::convert::cmd_convert(&package),
        Some(Commands::Stats { dir }) => commands::stats::cmd_stats(&dir),
        Some(Commands::Numbers) => commands::numbers::cmd_numbers(),
        Some(Commands::Sdk { args }) => commands::sdk::cmd_sdk(&args),
        Some(Commands::Build { package, dir }) => commands::build::cmd_build(&package, &dir),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No command provided, show help
            println!("wolfi-dev helpers v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'wolfi-dev --help' for usage information");
            Ok(())
        }
    }
}
