//! Onboarding: /start, referral capture, the subscription gate, and the
//! welcome chain.

use broadcast::play_chain;
use funnel_core::RecipientId;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ChatMemberStatus, ParseMode, Recipient, UserId};
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::keyboards;
use crate::state::AppState;
use crate::texts;

pub async fn handle_start(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    payload: &str,
) -> anyhow::Result<()> {
    let Some(user) = &msg.from else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let ref_tag = Some(payload.trim()).filter(|t| !t.is_empty());

    state
        .users
        .upsert_user(
            user_id,
            user.username.as_deref(),
            Some(&user.first_name),
            user.last_name.as_deref(),
            ref_tag,
        )
        .await?;
    if let Some(tag) = ref_tag {
        state.users.save_referral(user_id, tag).await?;
    }
    info!(user_id, ref_tag, "User started the bot");

    // A returning muted user gets unmuted and skips the gate and the chain.
    if state.users.get_dnd(user_id).await? {
        state.users.set_dnd(user_id, false).await?;
        bot.send_message(msg.chat.id, texts::WELCOME_BACK)
            .reply_markup(keyboards::main_menu(&state.links_snapshot().await))
            .await?;
        return Ok(());
    }

    if is_subscribed(bot, &state.config, user.id).await {
        greet(bot, state, msg.chat.id).await?;
    } else {
        let channel_url = state.links_snapshot().await.channel_url;
        bot.send_message(msg.chat.id, texts::SUBSCRIBE_GATE)
            .reply_markup(keyboards::subscribe_keyboard(&channel_url))
            .await?;
    }
    Ok(())
}

/// "I subscribed" button: re-check and let the user through on success.
pub async fn on_subscription_check(
    bot: &Bot,
    state: &AppState,
    q: CallbackQuery,
) -> anyhow::Result<()> {
    let subscribed = is_subscribed(bot, &state.config, q.from.id).await;

    if subscribed {
        bot.answer_callback_query(q.id)
            .text(texts::SUBSCRIPTION_OK)
            .await?;
        if let Some(msg) = &q.message {
            greet(bot, state, msg.chat().id).await?;
        }
    } else {
        bot.answer_callback_query(q.id)
            .text(texts::STILL_NOT_SUBSCRIBED)
            .await?;
    }
    Ok(())
}

/// Plays the stored welcome chain, then shows the main menu.
async fn greet(bot: &Bot, state: &AppState, chat: ChatId) -> anyhow::Result<()> {
    let chain = state.config_repo.welcome_chain().await?;
    play_chain(state.transport.as_ref(), RecipientId(chat.0), &chain).await;

    bot.send_message(chat, texts::MENU)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::main_menu(&state.links_snapshot().await))
        .await?;
    Ok(())
}

/// Checks channel membership. Without a configured channel the gate is open.
/// A transport error here must not lock users out, so it reads as subscribed.
async fn is_subscribed(bot: &Bot, config: &BotConfig, user: UserId) -> bool {
    let Some(channel) = &config.channel_username else {
        return true;
    };
    match bot
        .get_chat_member(Recipient::ChannelUsername(channel.clone()), user)
        .await
    {
        Ok(member) => matches!(
            member.status(),
            ChatMemberStatus::Owner | ChatMemberStatus::Administrator | ChatMemberStatus::Member
        ),
        Err(e) => {
            warn!(channel, error = %e, "Subscription check failed, letting user through");
            true
        }
    }
}
