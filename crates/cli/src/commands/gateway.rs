//! `inboxpilot gateway` — Start the HTTP agent service.

use inboxpilot_config::AppConfig;

pub async fn run(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(port) = port {
        config.gateway.port = port;
    }

    inboxpilot_gateway::start(config).await
}
