//! Admin panel: statistics, user listings, link editing, welcome-chain
//! editing, and campaign triggering.

use broadcast::campaign_by_key;
use funnel_core::MessageUnit;
use serde_json::Value;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{info, warn};

use crate::keyboards;
use crate::state::{AppState, Pending, LINK_KEYS};
use crate::texts;

const PAGE_SIZE: i64 = 10;

pub async fn handle_admin(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    let Some(user) = &msg.from else {
        return Ok(());
    };
    if !state.config.is_admin(user.id.0 as i64) {
        return Ok(());
    }

    bot.send_message(msg.chat.id, texts::ADMIN_PANEL)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::admin_panel())
        .await?;
    Ok(())
}

pub async fn handle_callback(
    bot: &Bot,
    state: &AppState,
    q: CallbackQuery,
    data: &str,
) -> anyhow::Result<()> {
    let admin_id = q.from.id.0 as i64;
    if !state.config.is_admin(admin_id) {
        bot.answer_callback_query(q.id).text("Not allowed.").await?;
        return Ok(());
    }
    let Some(msg) = &q.message else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let chat = msg.chat().id;

    match data {
        "adm:panel" => {
            bot.send_message(chat, texts::ADMIN_PANEL)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::admin_panel())
                .await?;
        }
        "adm:stats" => {
            let stats = state.users.bot_stats().await?;
            let text = format!(
                "📊 <b>Statistics</b>\n\n\
                 Users: {}\nNew today: {}\nNew this week: {}\nNew this month: {}\n\n\
                 With email: {}\nWith phone: {}\nWith name: {}\nReferral joins: {}",
                stats.total_users,
                stats.new_today,
                stats.new_week,
                stats.new_month,
                stats.with_email,
                stats.with_phone,
                stats.with_name,
                stats.referrals,
            );
            bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;
        }
        "adm:funnel" => {
            let stats = state.users.bot_stats().await?;
            let hours = state.users.avg_hours_to_contact().await?;
            let pct = if stats.total_users > 0 {
                stats.with_contact * 100 / stats.total_users
            } else {
                0
            };
            let text = format!(
                "🔻 <b>Funnel</b>\n\n\
                 Started: {}\nLeft a contact: {} ({pct}%)\n\
                 Avg. time to contact: {hours} h",
                stats.total_users, stats.with_contact,
            );
            bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;
        }
        _ if data == "adm:users" || data.starts_with("adm:users:") => {
            let page = parse_page(data, "adm:users:");
            let users = state.users.recent_users(PAGE_SIZE, page * PAGE_SIZE).await?;
            let total = state.users.total_users().await?;
            let mut text = format!(
                "👥 <b>Users</b> (page {} of {})\n\n",
                page + 1,
                page_count(total),
            );
            for u in &users {
                text.push_str(&format!(
                    "• <code>{}</code> {} @{}\n",
                    u.user_id,
                    u.first_name.as_deref().unwrap_or("—"),
                    u.username.as_deref().unwrap_or("—"),
                ));
            }
            bot.send_message(chat, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::pager("adm:users", page, total, PAGE_SIZE))
                .await?;
        }
        _ if data == "adm:contacts" || data.starts_with("adm:contacts:") => {
            let page = parse_page(data, "adm:contacts:");
            let contacts = state.users.contacts(PAGE_SIZE, page * PAGE_SIZE).await?;
            let total = state.users.contacts_count().await?;
            let mut text = format!(
                "📇 <b>Contacts</b> (page {} of {})\n\n",
                page + 1,
                page_count(total),
            );
            for u in &contacts {
                text.push_str(&format!(
                    "• {} — {} {}\n",
                    u.first_name.as_deref().unwrap_or("—"),
                    u.email.as_deref().unwrap_or(""),
                    u.phone.as_deref().unwrap_or(""),
                ));
            }
            bot.send_message(chat, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::pager("adm:contacts", page, total, PAGE_SIZE))
                .await?;
        }
        "adm:links" => {
            let links = state.links_snapshot().await;
            let text = format!(
                "🔗 <b>Links</b>\n\n\
                 Freebie: {}\nCourse: {}\nChannel: {}\nConsultation: {}",
                links.freebie_url, links.course_url, links.channel_url, links.consult_url,
            );
            bot.send_message(chat, text)
                .parse_mode(ParseMode::Html)
                .reply_markup(keyboards::links_panel())
                .await?;
        }
        "adm:chain" => {
            let chain = state.config_repo.welcome_chain().await?;
            let json = serde_json::to_string_pretty(&chain).unwrap_or_else(|_| "[]".to_string());
            state.pending.insert(admin_id, Pending::WelcomeChain);
            let text = format!(
                "👋 <b>Welcome chain</b> ({} units)\n\n<code>{json}</code>\n\n{}",
                chain.len(),
                texts::CHAIN_PROMPT,
            );
            bot.send_message(chat, text).parse_mode(ParseMode::Html).await?;
        }
        "adm:broadcast" => {
            bot.send_message(chat, "📣 Pick a campaign:")
                .reply_markup(keyboards::broadcast_panel())
                .await?;
        }
        _ if data.starts_with("link:") => {
            let key = data.trim_start_matches("link:");
            if LINK_KEYS.iter().any(|(k, _)| *k == key) {
                state
                    .pending
                    .insert(admin_id, Pending::LinkValue(key.to_string()));
                bot.send_message(chat, texts::LINK_PROMPT).await?;
            }
        }
        _ if data.starts_with("bc:") => {
            let key = data.trim_start_matches("bc:");
            let links = state.links_snapshot().await;
            match campaign_by_key(key, &links) {
                Some(campaign) => {
                    info!(campaign = key, admin_id, "Campaign triggered");
                    // Detached run; the handle is a hook for a future cancel.
                    let _handle = state.broadcaster.spawn(campaign);
                    bot.send_message(chat, texts::BROADCAST_STARTED).await?;
                }
                None => {
                    warn!(campaign = key, "Unknown campaign key");
                    bot.send_message(chat, texts::UNKNOWN_CAMPAIGN).await?;
                }
            }
        }
        _ => {}
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

fn parse_page(data: &str, prefix: &str) -> i64 {
    data.strip_prefix(prefix)
        .and_then(|p| p.parse().ok())
        .unwrap_or(0)
        .max(0)
}

fn page_count(total: i64) -> i64 {
    (total.max(1) + PAGE_SIZE - 1) / PAGE_SIZE
}

/// Consumes the admin's next text message after a panel prompt.
pub async fn handle_pending_input(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    pending: Pending,
) -> anyhow::Result<()> {
    let Some(user) = &msg.from else {
        return Ok(());
    };
    let admin_id = user.id.0 as i64;
    let Some(text) = msg.text() else {
        return Ok(());
    };

    match pending {
        Pending::LinkValue(key) => {
            if url::Url::parse(text.trim()).is_err() {
                bot.send_message(msg.chat.id, texts::LINK_INVALID).await?;
                return Ok(());
            }
            state.config_repo.set_value(&key, text.trim()).await?;
            state.reload_links().await?;
            state.pending.remove(&admin_id);
            info!(key = %key, "Link updated");
            bot.send_message(msg.chat.id, format!("Saved <b>{key}</b>."))
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Pending::WelcomeChain => {
            let Some(units) = parse_chain(text) else {
                bot.send_message(msg.chat.id, texts::CHAIN_INVALID).await?;
                return Ok(());
            };
            state.config_repo.save_welcome_chain(&units).await?;
            state.pending.remove(&admin_id);
            bot.send_message(
                msg.chat.id,
                format!("Welcome chain saved: {} units.", units.len()),
            )
            .await?;
        }
        // Contact sessions are routed to the user handler, never here.
        Pending::Contact => {}
    }
    Ok(())
}

/// Accepts a JSON array of units or a single unit object.
fn parse_chain(text: &str) -> Option<Vec<MessageUnit>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = match value {
        Value::Array(items) => items,
        obj @ Value::Object(_) => vec![obj],
        _ => return None,
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value::<MessageUnit>(item).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_chain;
    use funnel_core::UnitKind;

    #[test]
    fn parses_array_and_single_object() {
        let units = parse_chain(r#"[{"content":"a"},{"type":"photo","content":"id"}]"#).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].kind, UnitKind::Photo);

        let units = parse_chain(r#"{"content":"solo"}"#).unwrap();
        assert_eq!(units.len(), 1);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_chain("not json").is_none());
        assert!(parse_chain("42").is_none());
        assert!(parse_chain(r#"["not a unit"]"#).is_none());
    }
}
