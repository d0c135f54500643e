//! `folio config` — Configuration management commands.

use folio_config::AppConfig;

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match AppConfig::load() {
        Ok(config) => {
            println!("   ✅ Config parsed successfully");

            let mut warnings = Vec::new();

            if !config.latency.enabled {
                warnings.push("Simulated latency is disabled".to_string());
            }

            if config.gateway.allow_public_bind {
                warnings.push("Gateway may bind to all interfaces (allow_public_bind = true)".to_string());
            }

            if let Err(e) = config.load_knowledge() {
                warnings.push(format!("Knowledge base failed to load: {e}"));
            }

            if warnings.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &warnings {
                    println!("   ⚠️  {w}");
                }
            }

            println!();
            println!("   Gateway:   {}", config.gateway.bind_addr());
            println!(
                "   Latency:   {}–{} ms ({})",
                config.latency.min_ms,
                config.latency.max_ms,
                if config.latency.enabled { "on" } else { "off" }
            );
            println!("   Model:     {}", config.assistant.model_name);
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn config_path_is_valid() {
        let path = folio_config::AppConfig::config_dir().join("config.toml");
        assert!(path.to_str().unwrap().contains(".folio"));
    }
}
