//! CLI command handlers.

pub mod auth;
pub mod chat;
pub mod config;
pub mod files;
pub mod format;
pub mod health;
