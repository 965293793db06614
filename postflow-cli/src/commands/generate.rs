//! Generate command handler

use anyhow::{Context, Result};
use colored::*;
use postflow_client::GatewayClient;
use postflow_core::domain::workflow::{PipelineRequest, WorkflowResult};
use std::path::PathBuf;

use crate::config::Config;

/// Run the pipeline through the gateway and print the result
pub async fn handle_generate(
    config: &Config,
    topic: String,
    style: String,
    tone: String,
    audience: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let client = GatewayClient::new(&config.gateway_url);

    let req = PipelineRequest::new(topic, style)
        .with_tone(tone)
        .with_target_audience(audience);

    println!(
        "{}",
        format!("Generating post about \"{}\"...", req.topic).dimmed()
    );

    let result = match client.generate_post(&req).await {
        Ok(result) => result,
        Err(e) => {
            if e.is_agent_unavailable() {
                eprintln!(
                    "{}",
                    "An agent is down or too slow; check `postflow health`.".yellow()
                );
            }
            return Err(e.into());
        }
    };

    print_result(&result);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write result to {}", path.display()))?;
        println!("{} {}", "Saved to".dimmed(), path.display().to_string().cyan());
    }

    Ok(())
}

fn print_result(result: &WorkflowResult) {
    println!("{}", "✓ Post generated successfully!".green().bold());
    println!("  Topic:     {}", result.metadata.topic.bold());
    println!("  Audience:  {}", result.metadata.target_audience.dimmed());
    println!(
        "  Generated: {}",
        result.timestamp.format("%Y-%m-%d %H:%M:%S")
    );

    print_section("Draft", &result.draft);
    print_section("Final post", &result.final_post);
    print_section("Image prompt", &result.image_prompt);
}

fn print_section(title: &str, body: &str) {
    println!("\n{}", format!("{}:", title).bold());
    println!("{}", "─".repeat(80).dimmed());
    println!("{}", body);
    println!("{}", "─".repeat(80).dimmed());
}
