//! Postflow CLI
//!
//! Command-line interface for generating posts through the Postflow gateway.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "postflow")]
#[command(about = "Postflow post generation CLI", long_about = None)]
struct Cli {
    /// Gateway URL
    #[arg(long, env = "POSTFLOW_GATEWAY_URL", default_value = "http://localhost:8000")]
    gateway_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        gateway_url: cli.gateway_url,
    };

    handle_command(cli.command, &config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::HistoryCommands;

    #[test]
    fn test_parse_generate_with_defaults() {
        let cli = Cli::try_parse_from(["postflow", "generate", "--topic", "AI", "--style", "tech"])
            .unwrap();

        match cli.command {
            Commands::Generate {
                topic,
                style,
                tone,
                audience,
                output,
            } => {
                assert_eq!(topic, "AI");
                assert_eq!(style, "tech");
                assert_eq!(tone, "criativo");
                assert_eq!(audience, "público geral");
                assert!(output.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_generate_requires_topic() {
        assert!(Cli::try_parse_from(["postflow", "generate", "--style", "tech"]).is_err());
    }

    #[test]
    fn test_parse_history_get() {
        let cli = Cli::try_parse_from([
            "postflow",
            "--gateway-url",
            "http://gw:9000",
            "history",
            "get",
            "post_20261017_120000.json",
        ])
        .unwrap();

        assert_eq!(cli.gateway_url, "http://gw:9000");
        assert!(matches!(
            cli.command,
            Commands::History {
                command: HistoryCommands::Get { .. }
            }
        ));
    }
}
