//! Fan-out sender: sequential best-effort delivery of one built payload to a
//! list of recipients with fixed inter-send pacing.

use std::time::Duration;

use funnel_core::{MessageUnit, RecipientId, Result, Transport, UnitKind};
use tracing::{info, warn};

use crate::content::{BuiltPayload, MediaKind, PayloadPart};

/// Inter-send pause after each successful dispatch of a text-only step.
pub const TEXT_PACE: Duration = Duration::from_millis(30);
/// Inter-send pause for steps carrying media or albums.
pub const MEDIA_PACE: Duration = Duration::from_millis(50);

/// Per-step delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub sent: u64,
    pub failed: u64,
}

impl Outcome {
    pub fn attempted(&self) -> u64 {
        self.sent + self.failed
    }
}

/// Dispatches one message unit to one recipient, by kind.
pub async fn dispatch_unit(
    transport: &dyn Transport,
    to: RecipientId,
    unit: &MessageUnit,
) -> Result<()> {
    match unit.kind {
        UnitKind::Text => transport.send_text(to, &unit.content, &unit.buttons).await,
        UnitKind::Photo => {
            transport
                .send_photo(to, &unit.media(), unit.caption.as_deref(), &unit.buttons)
                .await
        }
        UnitKind::Video => {
            transport
                .send_video(to, &unit.media(), unit.caption.as_deref(), &unit.buttons)
                .await
        }
        UnitKind::VideoNote => {
            transport
                .send_video_note(to, &unit.media(), &unit.buttons)
                .await
        }
        UnitKind::Document => {
            transport
                .send_document(to, &unit.media(), unit.caption.as_deref(), &unit.buttons)
                .await
        }
    }
}

async fn dispatch_payload(
    transport: &dyn Transport,
    to: RecipientId,
    payload: &BuiltPayload,
) -> Result<()> {
    for part in &payload.parts {
        match part {
            PayloadPart::Unit(unit) => dispatch_unit(transport, to, unit).await?,
            PayloadPart::Media {
                kind,
                media,
                caption,
                buttons,
            } => match kind {
                MediaKind::Photo => {
                    transport
                        .send_photo(to, media, caption.as_deref(), buttons)
                        .await?
                }
                MediaKind::Video => {
                    transport
                        .send_video(to, media, caption.as_deref(), buttons)
                        .await?
                }
                MediaKind::VideoNote => transport.send_video_note(to, media, buttons).await?,
                MediaKind::Document => {
                    transport
                        .send_document(to, media, caption.as_deref(), buttons)
                        .await?
                }
            },
            PayloadPart::Album(items) => transport.send_album(to, items).await?,
        }
    }
    Ok(())
}

/// Sends the payload to every recipient in order, one at a time.
///
/// A transport error for one recipient is counted and logged; delivery
/// continues with the rest of the list. After each successful dispatch the
/// loop pauses for `pace` to stay under transport rate limits; the pause is
/// skipped after the last recipient. Failed recipients are not retried.
pub async fn fan_out(
    transport: &dyn Transport,
    recipients: &[RecipientId],
    payload: &BuiltPayload,
    pace: Duration,
) -> Outcome {
    let mut outcome = Outcome::default();

    for (i, &to) in recipients.iter().enumerate() {
        match dispatch_payload(transport, to, payload).await {
            Ok(()) => {
                outcome.sent += 1;
                if i + 1 < recipients.len() {
                    tokio::time::sleep(pace).await;
                }
            }
            Err(e) => {
                outcome.failed += 1;
                warn!(recipient = %to, error = %e, "Dispatch failed, continuing");
            }
        }
    }

    info!(
        sent = outcome.sent,
        failed = outcome.failed,
        "Fan-out finished"
    );
    outcome
}
