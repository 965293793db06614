//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod generate;
mod health;
mod history;

pub use history::HistoryCommands;

use anyhow::Result;
use clap::Subcommand;
use postflow_core::domain::workflow::{DEFAULT_TARGET_AUDIENCE, DEFAULT_TONE};
use std::path::PathBuf;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a post by running the full pipeline
    Generate {
        /// Post topic
        #[arg(short, long)]
        topic: String,

        /// Writing style
        #[arg(short, long)]
        style: String,

        /// Tone of voice
        #[arg(long, default_value = DEFAULT_TONE)]
        tone: String,

        /// Target audience
        #[arg(short, long, default_value = DEFAULT_TARGET_AUDIENCE)]
        audience: String,

        /// Also write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Saved results
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Check the gateway and the agents behind it
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Generate {
            topic,
            style,
            tone,
            audience,
            output,
        } => generate::handle_generate(config, topic, style, tone, audience, output).await,
        Commands::History { command } => history::handle_history_command(command, config).await,
        Commands::Health => health::handle_health(config).await,
    }
}

/// First `max` characters of `text` on one line
pub(crate) fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{}...", cut)
}
