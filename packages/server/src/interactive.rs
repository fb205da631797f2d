//! Interactive mode for the server.
//!
//! Prompts for bind address, port, payload format and offline mode before
//! starting the server.

use dialoguer::{Confirm, Input, Select};
use sbte_results_codec::payload::PayloadFormat;

use crate::ServerConfig;

const FORMATS: &[PayloadFormat] = &[PayloadFormat::Full, PayloadFormat::Compact];

/// Runs the server in interactive mode, starting from the environment's
/// configuration and letting the user adjust it.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("SBTE Results Server");
    println!();

    let defaults = ServerConfig::from_env();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let labels: Vec<String> = FORMATS.iter().map(ToString::to_string).collect();
    let default_idx = FORMATS
        .iter()
        .position(|f| *f == defaults.payload_format)
        .unwrap_or(0);
    let payload_format = Select::new()
        .with_prompt("Default payload format")
        .items(&labels)
        .default(default_idx)
        .interact()
        .map_or(defaults.payload_format, |i| FORMATS[i]);

    let offline = Confirm::new()
        .with_prompt("Serve cached results only (skip scraping)?")
        .default(defaults.offline)
        .interact()
        .unwrap_or(defaults.offline);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        payload_format,
        offline,
        ..defaults
    })
    .await
}
