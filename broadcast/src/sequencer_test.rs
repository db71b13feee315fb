use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use funnel_core::{FunnelError, MessageUnit, RecipientId, Result};

use crate::content::{Campaign, CampaignStep, StepContent};
use crate::sequencer::{Broadcaster, RecipientSource};
use crate::testutil::RecordingTransport;

const ADMIN: RecipientId = RecipientId(99);

struct StaticSource(Vec<i64>);

#[async_trait]
impl RecipientSource for StaticSource {
    async fn recipient_ids(&self) -> Result<Vec<RecipientId>> {
        Ok(self.0.iter().copied().map(RecipientId).collect())
    }
}

/// Succeeds for the first `ok_calls` reads, then fails.
struct FlakySource {
    ok_calls: u32,
    calls: Mutex<u32>,
}

#[async_trait]
impl RecipientSource for FlakySource {
    async fn recipient_ids(&self) -> Result<Vec<RecipientId>> {
        let mut calls = self.calls.lock().unwrap();
        *calls += 1;
        if *calls <= self.ok_calls {
            Ok(vec![RecipientId(1)])
        } else {
            Err(FunnelError::Database("storage down".to_string()))
        }
    }
}

fn two_step_campaign(gap_minutes: u64) -> Campaign {
    Campaign {
        name: "test",
        steps: vec![
            CampaignStep::immediate(StepContent::Unit(MessageUnit::text("one"))),
            CampaignStep::after_minutes(gap_minutes, StepContent::Unit(MessageUnit::text("two"))),
        ],
    }
}

#[tokio::test(start_paused = true)]
async fn steps_run_in_order_with_configured_gap() {
    let transport = Arc::new(RecordingTransport::new());
    let source = Arc::new(StaticSource(vec![1, 2]));
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    let started = tokio::time::Instant::now();
    broadcaster.run(two_step_campaign(5)).await;

    assert!(started.elapsed() >= Duration::from_secs(5 * 60));
    let user_labels: Vec<String> = transport
        .sent
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, _)| *id != ADMIN.0)
        .map(|(_, label)| label.clone())
        .collect();
    assert_eq!(
        user_labels,
        vec!["text:one", "text:one", "text:two", "text:two"]
    );
}

#[tokio::test(start_paused = true)]
async fn first_step_delay_is_skipped() {
    let transport = Arc::new(RecordingTransport::new());
    let source = Arc::new(StaticSource(vec![1]));
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    let campaign = Campaign {
        name: "test",
        steps: vec![CampaignStep::after_minutes(
            30,
            StepContent::Unit(MessageUnit::text("only")),
        )],
    };

    let started = tokio::time::Instant::now();
    broadcaster.run(campaign).await;

    // Only fan-out pacing elapsed, not the 30 minute pre-step delay.
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn each_step_reports_to_admin() {
    let transport = Arc::new(RecordingTransport::new());
    let source = Arc::new(StaticSource(vec![1]));
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    broadcaster.run(two_step_campaign(1)).await;

    let admin_messages: Vec<String> = transport
        .sent
        .lock()
        .unwrap()
        .iter()
        .filter(|(id, _)| *id == ADMIN.0)
        .map(|(_, label)| label.clone())
        .collect();
    assert_eq!(admin_messages.len(), 2);
    assert!(admin_messages[0].contains("step 1/2"));
    assert!(admin_messages[1].contains("step 2/2"));
}

#[tokio::test(start_paused = true)]
async fn source_failure_aborts_remaining_steps_with_notice() {
    let transport = Arc::new(RecordingTransport::new());
    let source = Arc::new(FlakySource {
        ok_calls: 1,
        calls: Mutex::new(0),
    });
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    broadcaster.run(two_step_campaign(1)).await;

    let sent = transport.sent.lock().unwrap().clone();
    // Step one reached the user; step two never did.
    assert!(sent.iter().any(|(id, l)| *id == 1 && l == "text:one"));
    assert!(!sent.iter().any(|(_, l)| l == "text:two"));
    // The admin got an explicit abort notice.
    assert!(sent
        .iter()
        .any(|(id, l)| *id == ADMIN.0 && l.contains("aborted")));
}

#[tokio::test(start_paused = true)]
async fn reporter_failure_does_not_stop_the_campaign() {
    // Transport fails only for the admin, so summaries cannot be delivered.
    let transport = Arc::new(RecordingTransport::failing_for([ADMIN.0]));
    let source = Arc::new(StaticSource(vec![1]));
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    broadcaster.run(two_step_campaign(1)).await;

    let labels = transport.labels();
    assert_eq!(labels, vec!["text:one", "text:two"]);
}

#[tokio::test(start_paused = true)]
async fn spawn_returns_a_joinable_handle() {
    let transport = Arc::new(RecordingTransport::new());
    let source = Arc::new(StaticSource(vec![1]));
    let broadcaster = Broadcaster::new(transport.clone(), source, ADMIN);

    let handle = broadcaster.spawn(two_step_campaign(1));
    handle.await.unwrap();

    assert!(transport.labels().contains(&"text:two".to_string()));
}
