//! `folio status` — Show configuration status.

use folio_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    println!("📁 Folio Status");
    println!("===============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Gateway:      {}", config.gateway.bind_addr());
    println!("  Body limit:   {} bytes", config.gateway.max_body_bytes);
    match config.latency.range() {
        Some(_) => println!(
            "  Latency:      {}–{} ms",
            config.latency.min_ms, config.latency.max_ms
        ),
        None => println!("  Latency:      off"),
    }
    println!("  Model name:   {}", config.assistant.model_name);
    match &config.knowledge_path {
        Some(path) => println!("  Knowledge:    {}", path.display()),
        None => println!("  Knowledge:    built-in"),
    }

    match config.load_knowledge() {
        Ok(kb) => println!(
            "\n  ✅ Knowledge base loaded: {} ({} projects, {} skill groups)",
            kb.personal.name,
            kb.projects.len(),
            kb.skills.len()
        ),
        Err(e) => println!("\n  ❌ Knowledge base failed to load: {e}"),
    }

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found");
    } else {
        println!("  ⚠️  No config file — run `folio init` first");
    }

    Ok(())
}
