use std::fs;

use funnel_core::{MediaRef, MessageUnit, UnitKind};
use tempfile::TempDir;

use crate::content::{build_step, LinkSet, MediaKind, PayloadPart, StepContent};

fn asset_dir(existing: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for name in existing {
        fs::write(dir.path().join(name), b"x").unwrap();
    }
    dir
}

#[test]
fn missing_album_assets_are_dropped_and_caption_shifts() {
    let dir = asset_dir(&["c.jpg", "d.jpg", "e.jpg"]);
    let files: Vec<MediaRef> = ["a.jpg", "b.jpg", "c.jpg", "d.jpg", "e.jpg"]
        .iter()
        .map(|n| MediaRef::path(dir.path().join(n)))
        .collect();

    let payload = build_step(&StepContent::Album {
        files,
        caption: Some("the caption".to_string()),
        chaser: None,
    });

    assert_eq!(payload.parts.len(), 1);
    let PayloadPart::Album(items) = &payload.parts[0] else {
        panic!("expected album part");
    };
    // First two of five missing: four-item album becomes three, first
    // present item carries the caption.
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].caption.as_deref(), Some("the caption"));
    assert!(items[1].caption.is_none());
    assert!(items[2].caption.is_none());
}

#[test]
fn fully_missing_album_degrades_to_caption_text() {
    let dir = asset_dir(&[]);
    let files = vec![
        MediaRef::path(dir.path().join("a.jpg")),
        MediaRef::path(dir.path().join("b.jpg")),
    ];

    let payload = build_step(&StepContent::Album {
        files,
        caption: Some("fallback text".to_string()),
        chaser: Some(MessageUnit::text("chaser")),
    });

    assert_eq!(payload.parts.len(), 2);
    let PayloadPart::Unit(unit) = &payload.parts[0] else {
        panic!("expected text fallback");
    };
    assert_eq!(unit.kind, UnitKind::Text);
    assert_eq!(unit.content, "fallback text");
    // The chaser survives degradation.
    assert!(matches!(&payload.parts[1], PayloadPart::Unit(u) if u.content == "chaser"));
}

#[test]
fn missing_single_media_degrades_to_text_with_buttons() {
    let payload = build_step(&StepContent::Media {
        kind: MediaKind::Photo,
        media: MediaRef::path("/no/such/file.jpg"),
        caption: Some("see you".to_string()),
        buttons: vec![funnel_core::Button {
            text: "Go".to_string(),
            url: "https://example.com".to_string(),
        }],
    });

    let PayloadPart::Unit(unit) = &payload.parts[0] else {
        panic!("expected text fallback");
    };
    assert_eq!(unit.content, "see you");
    assert_eq!(unit.buttons.len(), 1);
}

#[test]
fn text_only_detection_drives_pacing() {
    let text = build_step(&StepContent::Unit(MessageUnit::text("hi")));
    assert!(text.is_text_only());

    let media = build_step(&StepContent::Media {
        kind: MediaKind::Photo,
        media: MediaRef::FileId("id".to_string()),
        caption: None,
        buttons: Vec::new(),
    });
    assert!(!media.is_text_only());
}

#[test]
fn every_catalogue_key_resolves() {
    let links = LinkSet {
        freebie_url: "https://example.com/free".to_string(),
        course_url: "https://example.com/course".to_string(),
        channel_url: "https://example.com/channel".to_string(),
        consult_url: "https://example.com/call".to_string(),
    };
    for key in crate::campaigns::CAMPAIGN_KEYS {
        let campaign = crate::campaigns::campaign_by_key(key, &links)
            .unwrap_or_else(|| panic!("unknown campaign key {key}"));
        assert_eq!(campaign.name, *key);
        assert!(!campaign.steps.is_empty());
    }
    assert!(crate::campaigns::campaign_by_key("nope", &links).is_none());
}

#[test]
fn course_flow_steps_and_gaps() {
    let links = LinkSet::default();
    let campaign = crate::campaigns::campaign_by_key("course_flow", &links).unwrap();

    let gaps: Vec<u64> = campaign
        .steps
        .iter()
        .map(|s| s.delay_before.as_secs())
        .collect();
    assert_eq!(gaps, vec![0, 5 * 60, 7 * 60]);
}
