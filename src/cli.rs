//! CLI definitions for tabrelay.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tabrelay CLI.
#[derive(Parser)]
#[command(name = "tabrelay")]
#[command(about = "Per-user WebSocket relay for browser tabs")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the relay server in foreground (default)
    Run {
        /// Override server host
        #[arg(long)]
        host: Option<String>,

        /// Override server port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration file and exit
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["tabrelay"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_run_overrides() {
        let args = ["tabrelay", "run", "--host", "0.0.0.0", "--port", "9000"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Run { host, port }) => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["tabrelay", "check", "-c", "/etc/tabrelay.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check)));
        assert_eq!(cli.config, PathBuf::from("/etc/tabrelay.toml"));
    }
}
