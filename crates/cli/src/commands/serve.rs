//! `folio serve` — Start the HTTP chat gateway.

use folio_config::{AppConfig, LatencyConfig};

pub async fn run(
    port_override: Option<u16>,
    no_delay: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }
    if no_delay {
        config.latency = LatencyConfig::disabled();
    }

    println!("📁 Folio Gateway");
    println!("   Listening: {}", config.gateway.bind_addr());
    match config.latency.range() {
        Some(_) => println!(
            "   Latency:   {}–{} ms",
            config.latency.min_ms, config.latency.max_ms
        ),
        None => println!("   Latency:   off"),
    }

    folio_gateway::start(config).await?;

    Ok(())
}
