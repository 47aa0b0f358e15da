//! Formats a reply read from stdin, without talking to the backend.

use std::io::Read;

use anyhow::{Context, Result};
use ragdesk_core::format::format_response;

use crate::render::render_to_string;

pub fn run(json: bool) -> Result<()> {
    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("read reply from stdin")?;

    let blocks = format_response(&raw);
    if json {
        let out = serde_json::to_string_pretty(&blocks).context("serialize blocks")?;
        println!("{out}");
    } else if !blocks.is_empty() {
        println!("{}", render_to_string(&blocks, None));
    }
    Ok(())
}
