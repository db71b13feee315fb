use funnel_core::{MessageUnit, RecipientId, UnitKind};

use crate::testutil::RecordingTransport;
use crate::welcome::play_chain;

const USER: RecipientId = RecipientId(7);

#[tokio::test(start_paused = true)]
async fn empty_chain_plays_exactly_one_placeholder() {
    let transport = RecordingTransport::new();

    play_chain(&transport, USER, &[]).await;

    let labels = transport.labels();
    assert_eq!(labels.len(), 1);
    assert!(labels[0].starts_with("text:"));
}

#[tokio::test(start_paused = true)]
async fn chain_plays_in_order() {
    let transport = RecordingTransport::new();
    let chain = vec![
        MessageUnit::text("first"),
        MessageUnit {
            kind: UnitKind::Photo,
            content: "photo-id".to_string(),
            caption: Some("second".to_string()),
            buttons: Vec::new(),
        },
        MessageUnit::text("third"),
    ];

    play_chain(&transport, USER, &chain).await;

    assert_eq!(
        transport.labels(),
        vec!["text:first", "photo:second", "text:third"]
    );
}

#[tokio::test(start_paused = true)]
async fn unit_error_does_not_abort_the_chain() {
    // Fails every send for the user, then flips to succeeding.
    let transport = RecordingTransport::failing_for([USER.0]);
    let chain = vec![MessageUnit::text("a"), MessageUnit::text("b")];

    // Both dispatches fail; the player must not panic or stop early.
    play_chain(&transport, USER, &chain).await;
    assert!(transport.labels().is_empty());

    // And with a working transport everything lands.
    let ok = RecordingTransport::new();
    play_chain(&ok, USER, &chain).await;
    assert_eq!(ok.labels(), vec!["text:a", "text:b"]);
}
