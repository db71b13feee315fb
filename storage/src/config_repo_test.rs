use funnel_core::{MessageUnit, UnitKind};

use crate::{open_pool, ConfigRepository, WELCOME_CHAIN_KEY};

async fn repo() -> ConfigRepository {
    let pool = open_pool("sqlite::memory:").await.unwrap();
    ConfigRepository::new(pool).await.unwrap()
}

#[tokio::test]
async fn get_set_round_trip() {
    let repo = repo().await;

    assert_eq!(repo.get_value("missing").await.unwrap(), None);
    repo.set_value("k", "v1").await.unwrap();
    repo.set_value("k", "v2").await.unwrap();
    assert_eq!(repo.get_value("k").await.unwrap().as_deref(), Some("v2"));
}

#[tokio::test]
async fn missing_chain_yields_default_text_unit() {
    let repo = repo().await;

    let chain = repo.welcome_chain().await.unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].kind, UnitKind::Text);
    assert!(!chain[0].content.is_empty());
}

#[tokio::test]
async fn malformed_chain_yields_empty() {
    let repo = repo().await;

    repo.set_value(WELCOME_CHAIN_KEY, "not json at all").await.unwrap();
    assert!(repo.welcome_chain().await.unwrap().is_empty());

    repo.set_value(WELCOME_CHAIN_KEY, "42").await.unwrap();
    assert!(repo.welcome_chain().await.unwrap().is_empty());
}

#[tokio::test]
async fn single_object_is_coerced_to_one_element_chain() {
    let repo = repo().await;

    repo.set_value(WELCOME_CHAIN_KEY, r#"{"type":"text","content":"hi"}"#)
        .await
        .unwrap();

    let chain = repo.welcome_chain().await.unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].content, "hi");
}

#[tokio::test]
async fn save_and_reload_chain() {
    let repo = repo().await;

    let units = vec![
        MessageUnit::text("step one"),
        MessageUnit {
            kind: UnitKind::Photo,
            content: "FILE:abc123".to_string(),
            caption: Some("look".to_string()),
            buttons: Vec::new(),
        },
    ];
    repo.save_welcome_chain(&units).await.unwrap();

    let chain = repo.welcome_chain().await.unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[1].kind, UnitKind::Photo);
    assert_eq!(chain[1].caption.as_deref(), Some("look"));
}

#[tokio::test]
async fn entry_without_type_defaults_to_text() {
    let repo = repo().await;

    repo.set_value(WELCOME_CHAIN_KEY, r#"[{"content":"plain"}]"#)
        .await
        .unwrap();

    let chain = repo.welcome_chain().await.unwrap();
    assert_eq!(chain.len(), 1);
    assert_eq!(chain[0].kind, UnitKind::Text);
    assert_eq!(chain[0].content, "plain");
}
