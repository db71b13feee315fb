//! # funnel-core
//!
//! Core types and traits for the funnel bot: the [`Transport`] seam over Telegram,
//! message-unit and recipient types, the error taxonomy, and tracing initialization.
//! Transport-agnostic except for the teloxide implementation in [`transport`].

pub mod error;
pub mod logger;
pub mod transport;
pub mod types;

pub use error::{FunnelError, Result};
pub use logger::init_tracing;
pub use transport::{TelegramTransport, Transport};
pub use types::{AlbumItem, Button, MediaRef, MessageUnit, RecipientId, UnitKind};
