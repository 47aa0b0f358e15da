use anyhow::{Context, Result};
use ragdesk_core::client::RagClient;
use ragdesk_core::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = RagClient::from_config(config)?;
    let status = client
        .health()
        .await
        .with_context(|| format!("reach backend at {}", client.base_url()))?;
    println!("{}: {status}", client.base_url());
    Ok(())
}
