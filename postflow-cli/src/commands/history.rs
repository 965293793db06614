//! History command handlers
//!
//! Lists and shows saved workflow results.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use postflow_client::GatewayClient;
use postflow_core::domain::history::HistoryEntry;

use crate::commands::preview;
use crate::config::Config;

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List the most recent results
    List {
        /// Show at most this many entries
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Show a saved result
    Get {
        /// Result filename (e.g., post_20261017_120000.json)
        filename: String,
    },
}

/// Handle history commands
pub async fn handle_history_command(command: HistoryCommands, config: &Config) -> Result<()> {
    let client = GatewayClient::new(&config.gateway_url);

    match command {
        HistoryCommands::List { limit } => list_history(&client, limit).await,
        HistoryCommands::Get { filename } => get_history(&client, &filename).await,
    }
}

async fn list_history(client: &GatewayClient, limit: usize) -> Result<()> {
    let history = client.list_history().await?;

    if history.is_empty() {
        println!("{}", "No saved posts yet.".yellow());
        return Ok(());
    }

    let shown: Vec<_> = history.into_iter().take(limit).collect();
    println!(
        "{}",
        format!("Showing {} saved post(s):", shown.len()).bold()
    );
    println!();
    for entry in &shown {
        print_entry_summary(entry);
    }

    Ok(())
}

async fn get_history(client: &GatewayClient, filename: &str) -> Result<()> {
    let result = match client.get_history(filename).await {
        Ok(result) => result,
        Err(e) if e.is_not_found() => {
            anyhow::bail!("No saved post named {}", filename);
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

fn print_entry_summary(entry: &HistoryEntry) {
    println!("  {} {}", "▸".cyan(), entry.filename.bold());
    println!(
        "    Topic: {}",
        entry.topic.as_deref().unwrap_or("(unknown)").dimmed()
    );
    if let Some(timestamp) = &entry.timestamp {
        println!("    When:  {}", timestamp.dimmed());
    }
    if let Some(post) = &entry.final_post {
        println!("    Post:  {}", preview(post, 70));
    }
    println!();
}
