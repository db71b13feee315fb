//! Transport abstraction for dispatching message units.
//!
//! [`Transport`] is the seam the broadcast engine sends through; [`TelegramTransport`]
//! implements it via teloxide. Tests substitute their own implementation.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto,
    ParseMode,
};
use tracing::warn;
use url::Url;

use crate::error::{FunnelError, Result};
use crate::types::{AlbumItem, Button, MediaRef, RecipientId};

/// Sends message units to a single recipient. Every method maps to one
/// transport call; any failure is reported as [`FunnelError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a text message, optionally with an inline keyboard.
    async fn send_text(&self, to: RecipientId, text: &str, buttons: &[Button]) -> Result<()>;
    /// Sends a single photo with optional caption and keyboard.
    async fn send_photo(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()>;
    /// Sends a video with optional caption and keyboard.
    async fn send_video(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()>;
    /// Sends a video note (round video). The transport supports no caption here.
    async fn send_video_note(&self, to: RecipientId, media: &MediaRef, buttons: &[Button])
        -> Result<()>;
    /// Sends a document with optional caption and keyboard.
    async fn send_document(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()>;
    /// Sends an album (media group). Captions ride on the items themselves.
    async fn send_album(&self, to: RecipientId, items: &[AlbumItem]) -> Result<()>;
}

/// Builds an inline keyboard from buttons, one button per row. Buttons whose
/// URL does not parse are dropped with a warning rather than failing the send.
pub fn inline_keyboard(buttons: &[Button]) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .iter()
        .filter_map(|b| match Url::parse(&b.url) {
            Ok(url) => Some(vec![InlineKeyboardButton::url(b.text.clone(), url)]),
            Err(e) => {
                warn!(url = %b.url, error = %e, "Dropping button with invalid URL");
                None
            }
        })
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

fn input_file(media: &MediaRef) -> InputFile {
    match media {
        MediaRef::FileId(id) => InputFile::file_id(teloxide::types::FileId(id.clone())),
        MediaRef::Path(p) => InputFile::file(p.clone()),
    }
}

/// Teloxide-based implementation of [`Transport`]. All sends use HTML parse
/// mode, matching the formatting the campaign texts are written in.
pub struct TelegramTransport {
    bot: teloxide::Bot,
}

impl TelegramTransport {
    /// Wraps an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_text(&self, to: RecipientId, text: &str, buttons: &[Button]) -> Result<()> {
        let mut req = self
            .bot
            .send_message(ChatId(to.0), text.to_string())
            .parse_mode(ParseMode::Html);
        if let Some(kb) = inline_keyboard(buttons) {
            req = req.reply_markup(kb);
        }
        req.await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_photo(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()> {
        let mut req = self
            .bot
            .send_photo(ChatId(to.0), input_file(media))
            .parse_mode(ParseMode::Html);
        if let Some(caption) = caption {
            req = req.caption(caption.to_string());
        }
        if let Some(kb) = inline_keyboard(buttons) {
            req = req.reply_markup(kb);
        }
        req.await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_video(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()> {
        let mut req = self
            .bot
            .send_video(ChatId(to.0), input_file(media))
            .parse_mode(ParseMode::Html);
        if let Some(caption) = caption {
            req = req.caption(caption.to_string());
        }
        if let Some(kb) = inline_keyboard(buttons) {
            req = req.reply_markup(kb);
        }
        req.await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_video_note(
        &self,
        to: RecipientId,
        media: &MediaRef,
        buttons: &[Button],
    ) -> Result<()> {
        let mut req = self.bot.send_video_note(ChatId(to.0), input_file(media));
        if let Some(kb) = inline_keyboard(buttons) {
            req = req.reply_markup(kb);
        }
        req.await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_document(
        &self,
        to: RecipientId,
        media: &MediaRef,
        caption: Option<&str>,
        buttons: &[Button],
    ) -> Result<()> {
        let mut req = self
            .bot
            .send_document(ChatId(to.0), input_file(media))
            .parse_mode(ParseMode::Html);
        if let Some(caption) = caption {
            req = req.caption(caption.to_string());
        }
        if let Some(kb) = inline_keyboard(buttons) {
            req = req.reply_markup(kb);
        }
        req.await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn send_album(&self, to: RecipientId, items: &[AlbumItem]) -> Result<()> {
        let media: Vec<InputMedia> = items
            .iter()
            .map(|item| {
                let mut m = InputMediaPhoto::new(input_file(&item.media));
                m.caption = item.caption.clone();
                m.parse_mode = Some(ParseMode::Html);
                InputMedia::Photo(m)
            })
            .collect();
        self.bot
            .send_media_group(ChatId(to.0), media)
            .await
            .map_err(|e| FunnelError::Transport(e.to_string()))?;
        Ok(())
    }
}
