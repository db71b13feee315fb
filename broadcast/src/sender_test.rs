use funnel_core::{MessageUnit, RecipientId};

use crate::content::{build_step, StepContent};
use crate::sender::{fan_out, TEXT_PACE};
use crate::testutil::RecordingTransport;

fn recipients(n: i64) -> Vec<RecipientId> {
    (1..=n).map(RecipientId).collect()
}

fn text_payload(text: &str) -> crate::content::BuiltPayload {
    build_step(&StepContent::Unit(MessageUnit::text(text)))
}

#[tokio::test(start_paused = true)]
async fn counts_match_failing_subset() {
    let transport = RecordingTransport::failing_for([2, 4]);
    let payload = text_payload("hello");

    let outcome = fan_out(&transport, &recipients(5), &payload, TEXT_PACE).await;

    assert_eq!(outcome.sent, 3);
    assert_eq!(outcome.failed, 2);
    assert_eq!(outcome.attempted(), 5);
}

#[tokio::test(start_paused = true)]
async fn failure_does_not_stop_later_recipients() {
    let transport = RecordingTransport::failing_for([1]);
    let payload = text_payload("hello");

    fan_out(&transport, &recipients(4), &payload, TEXT_PACE).await;

    // First recipient failed, the rest were attempted in order.
    assert_eq!(transport.recipients(), vec![2, 3, 4]);
}

#[tokio::test(start_paused = true)]
async fn empty_list_yields_zero_outcome() {
    let transport = RecordingTransport::new();
    let payload = text_payload("hello");

    let outcome = fan_out(&transport, &[], &payload, TEXT_PACE).await;

    assert_eq!(outcome.sent, 0);
    assert_eq!(outcome.failed, 0);
    assert!(transport.recipients().is_empty());
}

#[tokio::test(start_paused = true)]
async fn preserves_recipient_order() {
    let transport = RecordingTransport::new();
    let payload = text_payload("hello");

    fan_out(&transport, &recipients(5), &payload, TEXT_PACE).await;

    assert_eq!(transport.recipients(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test(start_paused = true)]
async fn no_pacing_pause_after_last_recipient() {
    let transport = RecordingTransport::new();
    let payload = text_payload("hello");

    let started = tokio::time::Instant::now();
    fan_out(&transport, &recipients(3), &payload, TEXT_PACE).await;
    let elapsed = started.elapsed();

    // Pauses happen between recipients only: two gaps for three sends.
    assert!(elapsed >= TEXT_PACE * 2, "elapsed {elapsed:?}");
    assert!(elapsed < TEXT_PACE * 3, "elapsed {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn album_failure_skips_chaser_for_that_recipient() {
    let transport = RecordingTransport::failing_for([1]);
    let payload = build_step(&StepContent::Album {
        files: vec![funnel_core::MediaRef::FileId("a".into())],
        caption: Some("cap".to_string()),
        chaser: Some(MessageUnit::text("chaser")),
    });

    let outcome = fan_out(&transport, &recipients(2), &payload, TEXT_PACE).await;

    assert_eq!(outcome.sent, 1);
    assert_eq!(outcome.failed, 1);
    // Only recipient 2 got anything: the album part then the chaser.
    assert_eq!(
        transport.labels(),
        vec!["album:1".to_string(), "text:chaser".to_string()]
    );
    assert_eq!(transport.recipients(), vec![2, 2]);
}
