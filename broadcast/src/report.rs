//! Outcome reporting back to the admin's own conversation.
//!
//! Reporting must never crash a running campaign, so every transport error
//! here is logged and swallowed.

use std::sync::Arc;

use funnel_core::{RecipientId, Transport};
use tracing::warn;

use crate::sender::Outcome;

#[derive(Clone)]
pub struct Reporter {
    transport: Arc<dyn Transport>,
    admin: RecipientId,
}

impl Reporter {
    pub fn new(transport: Arc<dyn Transport>, admin: RecipientId) -> Self {
        Self { transport, admin }
    }

    /// Sends a per-step summary: attempted, sent, failed.
    pub async fn step_summary(
        &self,
        campaign: &str,
        step: usize,
        total_steps: usize,
        outcome: &Outcome,
    ) {
        let text = format!(
            "📣 <b>{campaign}</b> — step {step}/{total_steps}\n\
             Recipients: {}\nSent: {}\nFailed: {}",
            outcome.attempted(),
            outcome.sent,
            outcome.failed,
        );
        if let Err(e) = self.transport.send_text(self.admin, &text, &[]).await {
            warn!(error = %e, "Failed to deliver step summary");
        }
    }

    /// Tells the admin a campaign stopped early instead of going silent.
    pub async fn aborted(&self, campaign: &str, reason: &str) {
        let text = format!("⚠️ Campaign <b>{campaign}</b> aborted: {reason}");
        if let Err(e) = self.transport.send_text(self.admin, &text, &[]).await {
            warn!(error = %e, "Failed to deliver abort notice");
        }
    }
}
