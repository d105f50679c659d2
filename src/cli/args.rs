//! CLI argument definitions using clap
//!
//! Commands:
//! - game-catalog serve [--config <path>] [--port <n>] [--fixture <path>]
//! - game-catalog check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Game catalog query service
#[derive(Parser, Debug)]
#[command(name = "game-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to an optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Serve games from a JSON fixture instead of PostgreSQL
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Print the resolved configuration and exit
    CheckConfig {
        /// Path to an optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from(["game-catalog", "serve", "--port", "9000", "--fixture", "games.json"]);
        match cli.command {
            Command::Serve { config, port, fixture } => {
                assert!(config.is_none());
                assert_eq!(port, Some(9000));
                assert_eq!(fixture, Some(PathBuf::from("games.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_config() {
        let cli = Cli::parse_from(["game-catalog", "check-config", "--config", "catalog.json"]);
        assert!(matches!(
            cli.command,
            Command::CheckConfig { config: Some(ref p) } if p == &PathBuf::from("catalog.json")
        ));
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(Cli::try_parse_from(["game-catalog", "serve", "--port", "http"]).is_err());
    }
}
