// MailTriage CLI entry point
// Usage: mailtriage <Produtivo|Improdutivo> [email text...]
// Without text arguments the email is read from stdin.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use mailtriage_core::logging::init_tracing;
use mailtriage_core::{ServiceConfig, StaticClassifier, TriageService};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);

    let mut args = std::env::args().skip(1);
    let Some(label) = args.next() else {
        eprintln!("Usage: mailtriage <Produtivo|Improdutivo> [email text...]");
        std::process::exit(2);
    };

    let rest: Vec<String> = args.collect();
    let text = if rest.is_empty() {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read email text from stdin")?;
        buffer
    } else {
        rest.join(" ")
    };

    info!("Starting triage (label: {})", label);
    let service = TriageService::new(Arc::new(StaticClassifier::new(label)), config)?;
    let report = service.triage(&text).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
