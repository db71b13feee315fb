//! Wires config, storage, transport, and the broadcaster together and runs
//! the dispatcher until shutdown.

use std::sync::Arc;

use anyhow::Result;
use broadcast::Broadcaster;
use dashmap::DashMap;
use funnel_core::{init_tracing, RecipientId, TelegramTransport, Transport};
use storage::{open_pool, ConfigRepository, UserRepository};
use teloxide::dptree;
use teloxide::prelude::*;
use tokio::sync::RwLock;
use tracing::info;

use crate::adapters::StorageRecipientSource;
use crate::config::BotConfig;
use crate::contact::ContactExtractor;
use crate::handlers::schema;
use crate::state::AppState;

pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(&config.log_file)?;
    config.validate()?;

    let pool = open_pool(&config.database_url).await?;
    let users = UserRepository::new(pool.clone()).await?;
    let config_repo = ConfigRepository::new(pool).await?;

    let bot = Bot::new(config.bot_token.clone());
    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

    let source = Arc::new(StorageRecipientSource::new(users.clone()));
    let broadcaster = Broadcaster::new(
        transport.clone(),
        source,
        RecipientId(config.report_admin()),
    );

    let links = AppState::load_links(&config_repo, &config).await?;

    let state = Arc::new(AppState {
        config,
        users,
        config_repo,
        transport,
        broadcaster,
        extractor: ContactExtractor::new(),
        links: RwLock::new(links),
        pending: DashMap::new(),
    });

    info!("Starting funnel bot");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            let _ = upd;
        })
        .error_handler(LoggingErrorHandler::with_custom_text("Dispatcher error"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
