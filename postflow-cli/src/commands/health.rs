//! Health command handler

use anyhow::Result;
use colored::*;
use postflow_client::GatewayClient;

use crate::config::Config;

/// Print gateway liveness and agent readiness
pub async fn handle_health(config: &Config) -> Result<()> {
    let client = GatewayClient::new(&config.gateway_url);

    let gateway = client.health().await?;
    println!(
        "  Gateway: {} ({})",
        gateway.status.green(),
        gateway.service.dimmed()
    );

    let agents = client.agents_health().await?;
    println!("  Agent1:  {}", up_or_down(agents.agent1));
    println!("  Agent2:  {}", up_or_down(agents.agent2));

    if agents.ready {
        println!("{}", "✓ Ready to generate posts".green().bold());
    } else {
        println!("{}", "✗ Agents not ready".red().bold());
    }

    Ok(())
}

fn up_or_down(up: bool) -> ColoredString {
    if up { "up".green() } else { "down".red() }
}
