//! # funnel-bot
//!
//! The Telegram-facing crate: configuration, update routing, the admin
//! panel, contact extraction, and wiring for the broadcast engine.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod contact;
pub mod handlers;
pub mod keyboards;
pub mod runner;
pub mod state;
pub mod texts;

#[cfg(test)]
mod config_test;

pub use adapters::StorageRecipientSource;
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use contact::{ContactExtractor, ContactFields};
pub use runner::run_bot;
pub use state::{AppState, Pending};
