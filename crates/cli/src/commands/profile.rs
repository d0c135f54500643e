//! `folio profile` — Print the active knowledge base.

use folio_config::AppConfig;

pub async fn run(as_toml: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let kb = config.load_knowledge()?;

    if as_toml {
        println!("{}", kb.to_toml()?);
    } else {
        println!("{}", serde_json::to_string_pretty(kb.as_ref())?);
    }

    Ok(())
}
