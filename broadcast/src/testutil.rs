//! Shared test doubles for the broadcast engine.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use funnel_core::{AlbumItem, Button, FunnelError, MediaRef, RecipientId, Result, Transport};

/// Transport stub that records every send and fails for a chosen set of
/// recipients.
#[derive(Default)]
pub struct RecordingTransport {
    pub fail_for: HashSet<i64>,
    pub sent: Mutex<Vec<(i64, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            fail_for: ids.into_iter().collect(),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, to: RecipientId, label: String) -> Result<()> {
        if self.fail_for.contains(&to.0) {
            return Err(FunnelError::Transport(format!("stub failure for {to}")));
        }
        self.sent.lock().unwrap().push((to.0, label));
        Ok(())
    }

    pub fn recipients(&self) -> Vec<i64> {
        self.sent.lock().unwrap().iter().map(|(id, _)| *id).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, label)| label.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, to: RecipientId, text: &str, _buttons: &[Button]) -> Result<()> {
        self.record(to, format!("text:{text}"))
    }

    async fn send_photo(
        &self,
        to: RecipientId,
        _media: &MediaRef,
        caption: Option<&str>,
        _buttons: &[Button],
    ) -> Result<()> {
        self.record(to, format!("photo:{}", caption.unwrap_or("")))
    }

    async fn send_video(
        &self,
        to: RecipientId,
        _media: &MediaRef,
        caption: Option<&str>,
        _buttons: &[Button],
    ) -> Result<()> {
        self.record(to, format!("video:{}", caption.unwrap_or("")))
    }

    async fn send_video_note(
        &self,
        to: RecipientId,
        _media: &MediaRef,
        _buttons: &[Button],
    ) -> Result<()> {
        self.record(to, "video_note".to_string())
    }

    async fn send_document(
        &self,
        to: RecipientId,
        _media: &MediaRef,
        caption: Option<&str>,
        _buttons: &[Button],
    ) -> Result<()> {
        self.record(to, format!("document:{}", caption.unwrap_or("")))
    }

    async fn send_album(&self, to: RecipientId, items: &[AlbumItem]) -> Result<()> {
        self.record(to, format!("album:{}", items.len()))
    }
}
