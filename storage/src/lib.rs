//! Storage crate: user, referral, and configuration persistence for the funnel bot.
//!
//! ## Modules
//!
//! - [`models`] – UserRecord, UserStats, BotStats
//! - [`user_repo`] – UserRepository (users + referrals, SQLite)
//! - [`config_repo`] – ConfigRepository (key/value config + welcome chain)
//! - [`pool`] – pool opening helper

mod config_repo;
mod models;
mod pool;
mod user_repo;

#[cfg(test)]
mod config_repo_test;

pub use config_repo::{ConfigRepository, WELCOME_CHAIN_KEY};
pub use models::{BotStats, UserRecord, UserStats};
pub use pool::open_pool;
pub use user_repo::UserRepository;
