//! Update routing: commands, free text, and callback queries.

pub mod admin;
pub mod start;
pub mod user;

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::state::AppState;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Start the bot.
    Start(String),
    /// Show the main menu.
    Menu,
    /// Show help.
    Help,
    /// Show your profile.
    Status,
    /// Toggle broadcast messages.
    Dnd,
    /// Open the admin panel.
    Admin,
}

pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(
                    |bot: Bot, state: Arc<AppState>, msg: Message, cmd: Command| async move {
                        handle_command(&bot, &state, &msg, cmd).await
                    },
                ),
        )
        .branch(Update::filter_message().endpoint(
            |bot: Bot, state: Arc<AppState>, msg: Message| async move {
                handle_text(&bot, &state, &msg).await
            },
        ))
        .branch(Update::filter_callback_query().endpoint(
            |bot: Bot, state: Arc<AppState>, q: CallbackQuery| async move {
                handle_callback(&bot, &state, q).await
            },
        ))
}

async fn handle_command(
    bot: &Bot,
    state: &AppState,
    msg: &Message,
    cmd: Command,
) -> anyhow::Result<()> {
    match cmd {
        Command::Start(payload) => start::handle_start(bot, state, msg, &payload).await,
        Command::Menu => user::handle_menu(bot, state, msg).await,
        Command::Help => user::handle_help(bot, msg).await,
        Command::Status => user::handle_status(bot, state, msg).await,
        Command::Dnd => user::handle_dnd(bot, state, msg).await,
        Command::Admin => admin::handle_admin(bot, state, msg).await,
    }
}

async fn handle_text(bot: &Bot, state: &AppState, msg: &Message) -> anyhow::Result<()> {
    if !msg.chat.is_private() {
        return Ok(());
    }
    let Some(user) = &msg.from else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;

    // Pending sessions consume the next message: contact collection for
    // anyone, panel inputs for admins.
    if let Some(pending) = state.pending.get(&user_id).map(|p| p.value().clone()) {
        match pending {
            crate::state::Pending::Contact => {
                return user::handle_contact_input(bot, state, msg).await;
            }
            other if state.config.is_admin(user_id) => {
                return admin::handle_pending_input(bot, state, msg, other).await;
            }
            _ => {
                state.pending.remove(&user_id);
            }
        }
    }

    user::handle_free_text(bot, state, msg).await
}

async fn handle_callback(bot: &Bot, state: &AppState, q: CallbackQuery) -> anyhow::Result<()> {
    let Some(data) = q.data.clone() else {
        return Ok(());
    };

    match data.as_str() {
        "check_sub" => start::on_subscription_check(bot, state, q).await,
        "leave_contact" => user::on_leave_contact(bot, state, q).await,
        "freebie" => {
            bot.answer_callback_query(q.id.clone()).await?;
            if let Some(msg) = &q.message {
                user::send_freebie(bot, state, msg.chat().id).await?;
            }
            Ok(())
        }
        "guides" => {
            bot.answer_callback_query(q.id.clone()).await?;
            if let Some(msg) = &q.message {
                user::send_guide(bot, state, msg.chat().id).await?;
            }
            Ok(())
        }
        _ => admin::handle_callback(bot, state, q, &data).await,
    }
}
