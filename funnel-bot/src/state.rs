//! Shared application state handed to every handler.

use std::sync::Arc;

use broadcast::{Broadcaster, LinkSet};
use dashmap::DashMap;
use funnel_core::Transport;
use storage::{ConfigRepository, UserRepository};
use tokio::sync::RwLock;

use crate::config::BotConfig;
use crate::contact::ContactExtractor;

/// Link keys editable from the admin panel, with their display labels.
pub const LINK_KEYS: &[(&str, &str)] = &[
    ("freebie_url", "Freebie link"),
    ("course_url", "Course link"),
    ("channel_url", "Channel link"),
    ("consult_url", "Consultation link"),
];

/// What the bot is waiting for from this user's next text message.
/// `Contact` is set for any user; the other two only for admins.
#[derive(Debug, Clone)]
pub enum Pending {
    Contact,
    LinkValue(String),
    WelcomeChain,
}

pub struct AppState {
    pub config: BotConfig,
    pub users: UserRepository,
    pub config_repo: ConfigRepository,
    pub transport: Arc<dyn Transport>,
    pub broadcaster: Broadcaster,
    pub extractor: ContactExtractor,
    /// Current link snapshot; reloaded explicitly after an admin write.
    pub links: RwLock<LinkSet>,
    pub pending: DashMap<i64, Pending>,
}

impl AppState {
    /// Reads link values from storage, falling back to the configured defaults
    /// for keys never written by an admin.
    pub async fn load_links(
        config_repo: &ConfigRepository,
        config: &BotConfig,
    ) -> anyhow::Result<LinkSet> {
        let get = |key: &'static str| config_repo.get_value(key);
        Ok(LinkSet {
            freebie_url: get("freebie_url")
                .await?
                .unwrap_or_else(|| config.freebie_url.clone()),
            course_url: get("course_url")
                .await?
                .unwrap_or_else(|| config.course_url.clone()),
            channel_url: get("channel_url")
                .await?
                .unwrap_or_else(|| config.channel_url.clone()),
            consult_url: get("consult_url")
                .await?
                .unwrap_or_else(|| config.consult_url.clone()),
        })
    }

    /// Refreshes the snapshot from storage. Called after every link write so
    /// the next campaign run picks up the new value.
    pub async fn reload_links(&self) -> anyhow::Result<()> {
        let fresh = Self::load_links(&self.config_repo, &self.config).await?;
        *self.links.write().await = fresh;
        Ok(())
    }

    pub async fn links_snapshot(&self) -> LinkSet {
        self.links.read().await.clone()
    }
}
