//! Storage models.

mod bot_stats;
mod user_record;

pub use bot_stats::BotStats;
pub use user_record::{UserRecord, UserStats};
