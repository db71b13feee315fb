use serial_test::serial;
use std::env;

use crate::config::BotConfig;

fn clear_env() {
    for key in [
        "BOT_TOKEN",
        "DATABASE_URL",
        "LOG_FILE",
        "ADMIN_IDS",
        "CHANNEL_USERNAME",
        "CHANNEL_URL",
        "FREEBIE_URL",
        "COURSE_URL",
        "CONSULT_URL",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn load_uses_defaults_when_env_missing() {
    clear_env();
    let config = BotConfig::load(Some("token123".to_string())).unwrap();

    assert_eq!(config.bot_token, "token123");
    assert_eq!(config.database_url, "sqlite:funnel_bot.db");
    assert!(config.admin_ids.is_empty());
    assert!(config.channel_username.is_none());
}

#[test]
#[serial]
fn load_fails_without_token() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn admin_ids_are_parsed_from_csv() {
    clear_env();
    env::set_var("ADMIN_IDS", "42, 77,notanumber,  99");

    let config = BotConfig::load(Some("t".to_string())).unwrap();
    assert_eq!(config.admin_ids, vec![42, 77, 99]);
    assert!(config.is_admin(42));
    assert!(!config.is_admin(1));
    assert_eq!(config.report_admin(), 42);

    clear_env();
}

#[test]
#[serial]
fn validate_requires_admins_and_valid_channel_url() {
    clear_env();
    let mut config = BotConfig::load(Some("t".to_string())).unwrap();
    assert!(config.validate().is_err());

    config.admin_ids = vec![1];
    config.channel_url = "not a url".to_string();
    assert!(config.validate().is_err());

    config.channel_url = "https://t.me/mychannel".to_string();
    assert!(config.validate().is_ok());
}
