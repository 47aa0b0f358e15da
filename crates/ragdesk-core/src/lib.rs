//! Core ragdesk library (formatter, backend client, local cache, config).

pub mod client;
pub mod config;
pub mod format;
pub mod logging;
pub mod store;
pub mod transcript;
