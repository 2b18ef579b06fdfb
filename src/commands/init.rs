use std::io::{self, Write};

use crate::config::{Config, DEFAULT_REPO};
use crate::error::{IntelError, Result};

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        print!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        );
        io::stdout().flush().unwrap();

        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("issuelens configuration");
    println!("=======================\n");

    // Token is optional; unauthenticated runs just hit lower rate limits.
    print!("Enter a GitHub token (https://github.com/settings/tokens) [optional]: ");
    io::stdout().flush().unwrap();

    let mut token = String::new();
    io::stdin().read_line(&mut token).unwrap();
    let token = token.trim();

    print!("Enter default repository (owner/name) [default: {DEFAULT_REPO}]: ");
    io::stdout().flush().unwrap();

    let mut repo = String::new();
    io::stdin().read_line(&mut repo).unwrap();
    let repo = repo.trim();

    // Create config directory if it doesn't exist
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| IntelError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let mut config_content = String::new();
    if !token.is_empty() {
        config_content.push_str(&format!("github_token = \"{token}\"\n"));
    }
    if !repo.is_empty() {
        config_content.push_str(&format!("repo = \"{repo}\"\n"));
    }

    std::fs::write(&config_path, config_content).map_err(|e| IntelError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run `issuelens collect` to build your first snapshot!");

    Ok(())
}
