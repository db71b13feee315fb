//! # broadcast
//!
//! Best-effort, rate-limited, multi-step broadcast engine.
//!
//! ## Modules
//!
//! - [`content`] – campaign/step definitions and payload building
//! - [`sender`] – sequential fan-out with pacing and per-recipient isolation
//! - [`sequencer`] – detached multi-step campaign runs
//! - [`report`] – step summaries back to the admin
//! - [`welcome`] – welcome-chain playback for a single new user
//! - [`campaigns`] – the hardcoded campaign catalogue

pub mod campaigns;
pub mod content;
pub mod report;
pub mod sender;
pub mod sequencer;
pub mod welcome;

#[cfg(test)]
mod testutil;

#[cfg(test)]
mod content_test;
#[cfg(test)]
mod sender_test;
#[cfg(test)]
mod sequencer_test;
#[cfg(test)]
mod welcome_test;

pub use campaigns::{campaign_by_key, CAMPAIGN_KEYS};
pub use content::{
    build_step, BuiltPayload, Campaign, CampaignStep, LinkSet, MediaKind, PayloadPart, StepContent,
};
pub use report::Reporter;
pub use sender::{dispatch_unit, fan_out, Outcome, MEDIA_PACE, TEXT_PACE};
pub use sequencer::{Broadcaster, RecipientSource};
pub use welcome::{play_chain, UNIT_PAUSE};
