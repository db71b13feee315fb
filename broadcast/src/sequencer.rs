//! Step sequencer: runs a campaign's steps in order as a detached task.

use std::sync::Arc;

use async_trait::async_trait;
use funnel_core::{RecipientId, Result, Transport};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::content::{build_step, Campaign};
use crate::report::Reporter;
use crate::sender::{fan_out, MEDIA_PACE, TEXT_PACE};

/// Yields the current snapshot of recipient ids. Read once per step, so
/// users who join mid-campaign receive the remaining steps.
#[async_trait]
pub trait RecipientSource: Send + Sync {
    async fn recipient_ids(&self) -> Result<Vec<RecipientId>>;
}

/// Owns the pieces a campaign run needs and spawns runs as background tasks.
#[derive(Clone)]
pub struct Broadcaster {
    transport: Arc<dyn Transport>,
    source: Arc<dyn RecipientSource>,
    reporter: Reporter,
}

impl Broadcaster {
    pub fn new(
        transport: Arc<dyn Transport>,
        source: Arc<dyn RecipientSource>,
        admin: RecipientId,
    ) -> Self {
        let reporter = Reporter::new(transport.clone(), admin);
        Self {
            transport,
            source,
            reporter,
        }
    }

    /// Starts the campaign as a detached task and returns its handle. The
    /// caller is free to drop the handle; it exists so a future cancel
    /// control has something to hold on to.
    pub fn spawn(&self, campaign: Campaign) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move { this.run(campaign).await })
    }

    /// Executes the campaign's steps strictly in order. The first step's
    /// delay is skipped; each later step waits its configured delay first.
    /// A recipient source failure aborts the remaining steps with an
    /// explicit notice to the admin.
    pub async fn run(&self, campaign: Campaign) {
        let total = campaign.steps.len();
        info!(campaign = campaign.name, steps = total, "Campaign started");

        for (i, step) in campaign.steps.iter().enumerate() {
            if i > 0 && !step.delay_before.is_zero() {
                tokio::time::sleep(step.delay_before).await;
            }

            let recipients = match self.source.recipient_ids().await {
                Ok(recipients) => recipients,
                Err(e) => {
                    error!(campaign = campaign.name, error = %e, "Recipient source failed, aborting campaign");
                    self.reporter.aborted(campaign.name, &e.to_string()).await;
                    return;
                }
            };

            let payload = build_step(&step.content);
            let pace = if payload.is_text_only() {
                TEXT_PACE
            } else {
                MEDIA_PACE
            };

            let outcome = fan_out(self.transport.as_ref(), &recipients, &payload, pace).await;
            self.reporter
                .step_summary(campaign.name, i + 1, total, &outcome)
                .await;
        }

        info!(campaign = campaign.name, "Campaign finished");
    }
}
