//! Upload and cached file-list handlers.

use std::path::Path;

use anyhow::{Context, Result};
use ragdesk_core::client::{Credentials, RagClient};
use ragdesk_core::config::Config;
use ragdesk_core::store::{Role, Store, UploadedFile};

pub async fn upload(
    config: &Config,
    creds: &Credentials,
    path: &Path,
    visibility: Role,
) -> Result<()> {
    let client = RagClient::from_config(config)?;
    let name = client
        .upload(creds, path)
        .await
        .with_context(|| format!("upload {}", path.display()))?;

    let mut store = Store::open().context("open local state")?;
    let file = UploadedFile::new(name, creds.username.as_str(), visibility);
    let id = file.id.clone();
    let display_name = file.name.clone();
    store.record_upload(file).context("record upload")?;

    tracing::info!(id = %id, name = %display_name, "document uploaded");
    println!("Uploaded {display_name} ({id})");
    Ok(())
}

pub fn list() -> Result<()> {
    let store = Store::open().context("open local state")?;
    let files = store.uploaded_files()?;
    if files.is_empty() {
        println!("No documents uploaded yet.");
        return Ok(());
    }

    let selected = store.selected_file_id()?;
    for file in files {
        let marker = if selected.as_deref() == Some(file.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {}  {}  {}  {}  {}",
            marker, file.id, file.name, file.owner, file.visibility, file.timestamp
        );
    }
    Ok(())
}

pub fn select(id: &str) -> Result<()> {
    let mut store = Store::open().context("open local state")?;
    let file = store
        .select_file(id)
        .with_context(|| format!("select document '{id}'"))?;
    println!("Selected {} ({})", file.name, file.id);
    Ok(())
}

pub fn clear() -> Result<()> {
    let mut store = Store::open().context("open local state")?;
    store.clear()?;
    println!("Cleared uploaded documents in {}", store.path().display());
    Ok(())
}
