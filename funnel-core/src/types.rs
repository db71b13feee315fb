//! Core types: recipients, message units, media references.
//!
//! [`MessageUnit`] mirrors the operator-editable welcome-chain JSON
//! (`{"type", "content", "caption", "buttons": [{"text", "url"}]}`), so it
//! derives serde with `type` defaulting to `text`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Opaque numeric identifier of a conversation endpoint (a Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipientId(pub i64);

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One inline action button: label plus destination URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub url: String,
}

/// What a [`MessageUnit`] dispatches as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    #[default]
    Text,
    Photo,
    Video,
    VideoNote,
    Document,
}

/// A single dispatchable payload: text body or a media reference, with an
/// optional caption and optional inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageUnit {
    #[serde(rename = "type", default)]
    pub kind: UnitKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl MessageUnit {
    /// A plain text unit with no keyboard.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: UnitKind::Text,
            content: content.into(),
            caption: None,
            buttons: Vec::new(),
        }
    }

    /// The media reference this unit carries. Meaningless for text units.
    pub fn media(&self) -> MediaRef {
        MediaRef::from_stored(&self.content)
    }
}

/// A transport media reference: either an id already known to the transport
/// or a local file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    FileId(String),
    Path(PathBuf),
}

impl MediaRef {
    /// Parses a stored media value. Values written by the admin link flow use
    /// a `FILE:` prefix for transport file ids; bare values are treated as
    /// file ids too (the welcome chain stores them unprefixed).
    pub fn from_stored(value: &str) -> Self {
        match value.strip_prefix("FILE:") {
            Some(id) => MediaRef::FileId(id.to_string()),
            None => MediaRef::FileId(value.to_string()),
        }
    }

    /// A local asset path.
    pub fn path(p: impl Into<PathBuf>) -> Self {
        MediaRef::Path(p.into())
    }

    /// Whether the reference can be dispatched right now. File ids are always
    /// resolvable; local paths must exist on disk.
    pub fn is_resolvable(&self) -> bool {
        match self {
            MediaRef::FileId(_) => true,
            MediaRef::Path(p) => p.exists(),
        }
    }
}

/// One item of an album (media group). Only the first item of an album may
/// carry a caption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumItem {
    pub media: MediaRef,
    pub caption: Option<String>,
}
