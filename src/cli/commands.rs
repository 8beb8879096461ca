//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the HTTP server
//! - invoke: run one serverless event through the handler
//! - list: list cycles
//! - squads: show or upload the squad/module configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Regressivos - release regression cycles with an SLA countdown
#[derive(Parser, Debug)]
#[command(name = "regressivos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Handle one API Gateway proxy event and print the response
    Invoke {
        /// Event file; reads stdin when omitted or "-"
        event: Option<PathBuf>,
    },

    /// List cycles
    List {
        /// Only cycles still active
        #[arg(short, long)]
        active: bool,
    },

    /// Squad/module configuration
    Squads {
        #[command(subcommand)]
        command: SquadsCommands,
    },
}

/// Squad configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum SquadsCommands {
    /// Print the stored configuration
    Show,

    /// Replace the configuration from a JSON file
    Upload {
        /// File holding `{"squads": [{"squad": ..., "modules": [...]}]}`
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["regressivos"]).is_err());
    }

    #[test]
    fn test_cli_verbose_flag() {
        let cli = Cli::try_parse_from(["regressivos", "-v", "list"]).unwrap();
        assert!(cli.is_verbose());
    }

    #[test]
    fn test_cli_config_option() {
        let cli = Cli::try_parse_from(["regressivos", "-c", "/path/to/regressivos.yml", "list"]).unwrap();
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/path/to/regressivos.yml")));
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from(["regressivos", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert!(bind.is_none()),
            _ => panic!("Expected serve command"),
        }

        let cli = Cli::try_parse_from(["regressivos", "serve", "--bind", "127.0.0.1:8080"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.as_deref(), Some("127.0.0.1:8080")),
            _ => panic!("Expected serve command"),
        }
    }

    #[test]
    fn test_invoke_command() {
        let cli = Cli::try_parse_from(["regressivos", "invoke", "event.json"]).unwrap();
        match cli.command {
            Commands::Invoke { event } => assert_eq!(event, Some(PathBuf::from("event.json"))),
            _ => panic!("Expected invoke command"),
        }
    }

    #[test]
    fn test_list_active() {
        let cli = Cli::try_parse_from(["regressivos", "list", "--active"]).unwrap();
        match cli.command {
            Commands::List { active } => assert!(active),
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn test_squads_upload() {
        let cli = Cli::try_parse_from(["regressivos", "squads", "upload", "squads.json"]).unwrap();
        match cli.command {
            Commands::Squads {
                command: SquadsCommands::Upload { file },
            } => assert_eq!(file, PathBuf::from("squads.json")),
            _ => panic!("Expected squads upload command"),
        }
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
