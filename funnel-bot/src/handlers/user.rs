//! User-facing commands, menu callbacks, and contact collection.

use funnel_core::{MediaRef, RecipientId};
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use tracing::info;

use crate::state::{AppState, Pending};
use crate::texts;
use crate::{contact::ContactFields, keyboards};

const GUIDE_ASSET: &str = "assets/sleep_checklist.pdf";

pub async fn handle_help(bot: &Bot, msg: &Message) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, texts::HELP).await?;
    Ok(())
}

pub async fn handle_menu(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    bot.send_message(msg.chat.id, texts::MENU)
        .reply_markup(keyboards::main_menu(&state.links_snapshot().await))
        .await?;
    Ok(())
}

pub async fn handle_status(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    let Some(user) = &msg.from else {
        return Ok(());
    };

    let text = match state.users.user_stats(user.id.0 as i64).await? {
        Some(stats) => format!(
            "👤 <b>Your profile</b>\n\n\
             Name: {}\nEmail: {}\nPhone: {}\nBroadcasts: {}\nWith us since: {}",
            stats.first_name.as_deref().unwrap_or("—"),
            stats.email.as_deref().unwrap_or("—"),
            stats.phone.as_deref().unwrap_or("—"),
            if stats.do_not_disturb { "muted" } else { "on" },
            stats.created_at.format("%Y-%m-%d"),
        ),
        None => "I don't know you yet — send /start first.".to_string(),
    };

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

pub async fn handle_dnd(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    let Some(user) = &msg.from else {
        return Ok(());
    };
    set_dnd_with_reply(bot, state, msg.chat.id, user.id.0 as i64, None).await
}

async fn set_dnd_with_reply(
    bot: &Bot,
    state: &AppState,
    chat: ChatId,
    user_id: i64,
    force: Option<bool>,
) -> anyhow::Result<()> {
    let muted = match force {
        Some(v) => v,
        None => !state.users.get_dnd(user_id).await?,
    };
    state.users.set_dnd(user_id, muted).await?;

    let text = if muted { texts::DND_ON } else { texts::DND_OFF };
    bot.send_message(chat, text).await?;
    Ok(())
}

/// "Leave a contact" button: open a contact session for this user.
pub async fn on_leave_contact(bot: &Bot, state: &AppState, q: CallbackQuery) -> anyhow::Result<()> {
    state.pending.insert(q.from.id.0 as i64, Pending::Contact);
    bot.answer_callback_query(q.id).await?;
    if let Some(msg) = &q.message {
        bot.send_message(msg.chat().id, texts::CONTACT_PROMPT)
            .parse_mode(ParseMode::Html)
            .await?;
    }
    Ok(())
}

/// Sends the configured freebie: a stored `FILE:` value goes out as a
/// document by file id, anything else as a link.
pub async fn send_freebie(bot: &Bot, state: &AppState, chat: ChatId) -> anyhow::Result<()> {
    let stored = state.config_repo.get_value("freebie").await?;
    match stored {
        Some(value) if value.starts_with("FILE:") => {
            state
                .transport
                .send_document(
                    RecipientId(chat.0),
                    &MediaRef::from_stored(&value),
                    Some(texts::FREEBIE_FALLBACK),
                    &[],
                )
                .await?;
        }
        _ => {
            let url = state.links_snapshot().await.freebie_url;
            bot.send_message(chat, format!("{}\n{url}", texts::FREEBIE_FALLBACK))
                .await?;
        }
    }
    Ok(())
}

/// Sends the guide document from local assets, with a text fallback when the
/// asset is absent.
pub async fn send_guide(bot: &Bot, state: &AppState, chat: ChatId) -> anyhow::Result<()> {
    let media = MediaRef::path(GUIDE_ASSET);
    if media.is_resolvable() {
        state
            .transport
            .send_document(RecipientId(chat.0), &media, Some(texts::GUIDE_CAPTION), &[])
            .await?;
    } else {
        bot.send_message(chat, texts::GUIDE_MISSING).await?;
    }
    Ok(())
}

/// Text received while a contact session is open. Saves whatever was found
/// and keeps asking until the user leaves an email or phone.
pub async fn handle_contact_input(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
) -> anyhow::Result<()> {
    let (Some(user), Some(text)) = (&msg.from, msg.text()) else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    let fields = state.extractor.extract_expecting_name(text);
    if fields.is_empty() {
        bot.send_message(msg.chat.id, texts::CONTACT_NOTHING).await?;
        return Ok(());
    }
    save_fields(state, user_id, &fields).await?;

    let reachable = match state.users.user_stats(user_id).await? {
        Some(stats) => stats.email.is_some() || stats.phone.is_some(),
        None => false,
    };
    if reachable {
        state.pending.remove(&user_id);
        bot.send_message(msg.chat.id, texts::CONTACT_THANKS).await?;
    } else {
        bot.send_message(msg.chat.id, texts::CONTACT_MORE).await?;
    }
    Ok(())
}

/// Parses any plain message: DND words first, then the freebie shortcut,
/// then opportunistic contact extraction.
pub async fn handle_free_text(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    let (Some(user), Some(text)) = (&msg.from, msg.text()) else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    match text.trim().to_lowercase().as_str() {
        "stop" | "pause" => {
            return set_dnd_with_reply(bot, state, msg.chat.id, user_id, Some(true)).await;
        }
        "resume" => {
            return set_dnd_with_reply(bot, state, msg.chat.id, user_id, Some(false)).await;
        }
        "freebie" => return send_freebie(bot, state, msg.chat.id).await,
        _ => {}
    }

    let fields = state.extractor.extract(text);
    if fields.is_empty() {
        return Ok(());
    }
    save_fields(state, user_id, &fields).await?;
    bot.send_message(msg.chat.id, texts::CONTACT_THANKS).await?;
    Ok(())
}

async fn save_fields(
    state: &AppState,
    user_id: i64,
    fields: &ContactFields,
) -> anyhow::Result<()> {
    state
        .users
        .save_contact(
            user_id,
            fields.email.as_deref(),
            fields.phone.as_deref(),
            fields.name.as_deref(),
        )
        .await?;
    info!(
        user_id,
        email = fields.email.is_some(),
        phone = fields.phone.is_some(),
        name = fields.name.is_some(),
        "Extracted contact fields"
    );
    Ok(())
}
