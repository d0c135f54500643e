//! `folio ask` — Ask the assistant from the terminal.
//!
//! Goes through the same [`Responder`] the gateway uses, without the
//! simulated latency.

use folio_config::AppConfig;
use folio_core::{ChatReply, ChatRequest, KeywordResponder, Responder};
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(message: Option<String>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let responder = KeywordResponder::new(config.load_knowledge()?);

    if let Some(msg) = message {
        // Single message mode
        let reply = ask(&responder, &msg).await?;
        print_reply(&reply, json)?;
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Ask about {}'s projects, skills, education or contact details.", responder.knowledge().personal.name);
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt()?;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if !line.is_empty() {
            match ask(&responder, line).await {
                Ok(reply) => print_reply(&reply, json)?,
                Err(e) => eprintln!("  [Error] {e}"),
            }
        }
        prompt()?;
    }

    println!();
    println!("  Goodbye! 👋");
    Ok(())
}

async fn ask(responder: &dyn Responder, message: &str) -> folio_core::Result<ChatReply> {
    if message.is_empty() {
        return Err(folio_core::ValidationError::MissingMessage.into());
    }
    responder.respond(&ChatRequest::new(message)).await
}

fn prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("  You > ");
    std::io::stdout().flush()
}

fn print_reply(reply: &ChatReply, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
        return Ok(());
    }

    println!();
    for line in reply.response.lines() {
        println!("  Assistant > {line}");
    }
    println!();
    println!("  [{} · confidence {:.2}]", reply.topic, reply.confidence);
    for s in &reply.suggestions {
        println!("    → {s}");
    }
    println!();
    Ok(())
}
