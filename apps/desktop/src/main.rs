use std::{io::Write, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{ClientConfig, LoadPhase, ValuesClient, ValuesLoader, ValuesView};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Fetch and print the values list once")]
struct Args {
    /// Base url of the values API. Falls back to VALUES_API_BASE_URL, then http://127.0.0.1:8000.
    #[arg(long)]
    api_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = args
        .api_base_url
        .map(ClientConfig::new)
        .unwrap_or_else(ClientConfig::from_env);
    info!(api_base_url = %config.api_base_url, "mounting values loader");

    let loader = ValuesLoader::mount(Arc::new(ValuesClient::new(config)));
    let phase = render_until_settled(&loader, &mut std::io::stdout()).await?;
    info!(loaded = matches!(phase, LoadPhase::Loaded(_)), "values loader settled");
    loader.unmount();
    Ok(())
}

/// Writes the rendered section for every phase the loader passes through.
async fn render_until_settled<W: Write>(loader: &ValuesLoader, out: &mut W) -> Result<LoadPhase> {
    let mut rx = loader.subscribe();
    loop {
        let phase = rx.borrow_and_update().clone();
        write!(out, "{}", ValuesView::from_phase(&phase))?;
        out.flush()?;
        if phase.is_settled() {
            return Ok(phase);
        }
        if rx.changed().await.is_err() {
            return Ok(rx.borrow().clone());
        }
    }
}
