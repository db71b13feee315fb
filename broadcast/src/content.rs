//! Content builder: turns campaign step definitions into ready-to-send
//! payloads, resolving link placeholders and degrading gracefully when a
//! local media asset is missing.

use funnel_core::{AlbumItem, Button, MediaRef, MessageUnit, UnitKind};
use tracing::warn;

/// Configuration-provided link values substituted into campaign texts and
/// buttons at build time. Loaded from storage at startup and reloaded
/// explicitly after an admin edits a link.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    pub freebie_url: String,
    pub course_url: String,
    pub channel_url: String,
    pub consult_url: String,
}

/// Media kinds a campaign step can dispatch as a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    VideoNote,
    Document,
}

/// Definition of what one campaign step sends.
#[derive(Debug, Clone)]
pub enum StepContent {
    /// A single message unit (text or media by stored reference).
    Unit(MessageUnit),
    /// A single media message from an explicit reference, with optional
    /// caption and keyboard.
    Media {
        kind: MediaKind,
        media: MediaRef,
        caption: Option<String>,
        buttons: Vec<Button>,
    },
    /// A media group followed by an optional chaser unit (albums cannot
    /// carry keyboards, so the call to action rides in the chaser).
    Album {
        files: Vec<MediaRef>,
        caption: Option<String>,
        chaser: Option<MessageUnit>,
    },
}

/// One step of a campaign: the content plus the delay to wait before
/// dispatching it, relative to the previous step's completion. The delay of
/// the first step is ignored.
#[derive(Debug, Clone)]
pub struct CampaignStep {
    pub delay_before: std::time::Duration,
    pub content: StepContent,
}

impl CampaignStep {
    pub fn immediate(content: StepContent) -> Self {
        Self {
            delay_before: std::time::Duration::ZERO,
            content,
        }
    }

    pub fn after_minutes(minutes: u64, content: StepContent) -> Self {
        Self {
            delay_before: std::time::Duration::from_secs(minutes * 60),
            content,
        }
    }
}

/// A named, ordered sequence of steps broadcast to all recipients.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub name: &'static str,
    pub steps: Vec<CampaignStep>,
}

/// One dispatchable part of a built step. A recipient receives every part in
/// order; a failure on any part counts the recipient as failed once and
/// skips their remaining parts.
#[derive(Debug, Clone)]
pub enum PayloadPart {
    Unit(MessageUnit),
    Media {
        kind: MediaKind,
        media: MediaRef,
        caption: Option<String>,
        buttons: Vec<Button>,
    },
    Album(Vec<AlbumItem>),
}

/// A campaign step ready for fan-out.
#[derive(Debug, Clone)]
pub struct BuiltPayload {
    pub parts: Vec<PayloadPart>,
}

impl BuiltPayload {
    /// Whether every part is plain text. Text-only steps are paced faster.
    pub fn is_text_only(&self) -> bool {
        self.parts
            .iter()
            .all(|p| matches!(p, PayloadPart::Unit(u) if u.kind == UnitKind::Text))
    }
}

/// Builds the payload for one step.
///
/// Missing album assets are dropped and the caption shifts to whichever item
/// is now first. If every asset of an album (or the asset of a single media
/// step) is missing, the step degrades to a text unit carrying the caption so
/// it is never silently skipped.
pub fn build_step(content: &StepContent) -> BuiltPayload {
    let parts = match content {
        StepContent::Unit(unit) => vec![PayloadPart::Unit(unit.clone())],

        StepContent::Media {
            kind,
            media,
            caption,
            buttons,
        } => {
            if media.is_resolvable() {
                vec![PayloadPart::Media {
                    kind: *kind,
                    media: media.clone(),
                    caption: caption.clone(),
                    buttons: buttons.clone(),
                }]
            } else {
                warn!(?media, "Media asset missing, degrading step to text");
                let mut unit = MessageUnit::text(caption.clone().unwrap_or_default());
                unit.buttons = buttons.clone();
                vec![PayloadPart::Unit(unit)]
            }
        }

        StepContent::Album {
            files,
            caption,
            chaser,
        } => {
            let present: Vec<&MediaRef> = files.iter().filter(|f| f.is_resolvable()).collect();
            if present.len() < files.len() {
                warn!(
                    missing = files.len() - present.len(),
                    total = files.len(),
                    "Dropping missing album assets"
                );
            }

            let mut parts = Vec::new();
            if present.is_empty() {
                warn!("All album assets missing, degrading step to text");
                parts.push(PayloadPart::Unit(MessageUnit::text(
                    caption.clone().unwrap_or_default(),
                )));
            } else {
                let items: Vec<AlbumItem> = present
                    .into_iter()
                    .enumerate()
                    .map(|(i, media)| AlbumItem {
                        media: media.clone(),
                        caption: if i == 0 { caption.clone() } else { None },
                    })
                    .collect();
                parts.push(PayloadPart::Album(items));
            }
            if let Some(chaser) = chaser {
                parts.push(PayloadPart::Unit(chaser.clone()));
            }
            parts
        }
    };

    BuiltPayload { parts }
}
