//! Login and signup handlers.

use anyhow::{Result, bail};
use ragdesk_core::client::{ClientErrorKind, Credentials, RagClient};
use ragdesk_core::config::Config;

pub async fn login(config: &Config, creds: &Credentials) -> Result<()> {
    let client = RagClient::from_config(config)?;
    match client.login(creds).await {
        Ok(()) => {
            println!("Logged in as {}", creds.username);
            Ok(())
        }
        Err(e) if e.kind == ClientErrorKind::Unauthorized => {
            bail!("Invalid username or password")
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn signup(config: &Config, creds: &Credentials) -> Result<()> {
    let client = RagClient::from_config(config)?;
    match client.signup(creds).await {
        Ok(()) => {
            println!("Account created successfully. Please login.");
            Ok(())
        }
        Err(e) if e.kind == ClientErrorKind::HttpStatus => {
            bail!("User already exists or invalid input ({e})")
        }
        Err(e) => Err(e.into()),
    }
}
