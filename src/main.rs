mod analytics;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod extract;
mod matcher;
mod output;
mod sample;
mod store;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::GithubClient;
use config::Config;
use error::Result;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if std::env::args().any(|arg| arg == "--verbose" || arg == "-v") {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    output::set_json_output(cli.json);

    match cli.command {
        // Commands that don't require config
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "issuelens", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run().await?;
        }
        // Commands that require config
        command => {
            let config = Config::load()?;

            match command {
                Commands::Collect(args) => {
                    let client = GithubClient::new(config.github_token());
                    commands::collect::run(&client, &config, args).await?;
                }
                Commands::Issues(args) => {
                    commands::issues::run(&config, args)?;
                }
                Commands::Stats => {
                    commands::stats::run(&config)?;
                }
                Commands::Search(args) => {
                    commands::search::run(&config, args)?;
                }
                Commands::Tech(args) => {
                    commands::tech::run(&config, args)?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
