//! tabrelay - per-user WebSocket relay
//!
//! Main entry point for the tabrelay CLI and server.

mod cli;
mod server;

use clap::Parser;

use tabrelay_config::ConfigValidator;

use crate::cli::{Cli, Commands};
use crate::server::{init_tracing, load_config, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(&cli.config, None, None)?;
            init_tracing(&config.logging)?;
            run_server(config).await
        }
        Some(Commands::Run { host, port }) => {
            let config = load_config(&cli.config, host, port)?;
            init_tracing(&config.logging)?;
            run_server(config).await
        }
        Some(Commands::Check) => handle_check_command(&cli.config),
    }
}

/// Validate the configuration file and print the findings.
fn handle_check_command(path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_config(path, None, None) {
        Ok(config) => config,
        Err(e) => {
            println!("error:   {}", e);
            return Err(format!("{}: failed to load", path.display()).into());
        }
    };
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    for error in &result.errors {
        println!("error:   {}", error);
    }

    if result.is_valid() {
        println!("{}: OK", path.display());
        Ok(())
    } else {
        Err(format!("{}: {} error(s)", path.display(), result.errors.len()).into())
    }
}
