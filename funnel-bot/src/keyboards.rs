//! Inline keyboards for the user menu and the admin panel.

use broadcast::{LinkSet, CAMPAIGN_KEYS};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::warn;
use url::Url;

use crate::state::LINK_KEYS;

fn url_button(text: &str, url: &str) -> Option<InlineKeyboardButton> {
    match Url::parse(url) {
        Ok(url) => Some(InlineKeyboardButton::url(text.to_string(), url)),
        Err(e) => {
            warn!(url, error = %e, "Skipping button with invalid URL");
            None
        }
    }
}

/// Subscribe-to-channel gate: channel link plus a re-check button.
pub fn subscribe_keyboard(channel_url: &str) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();
    if let Some(b) = url_button("📢 Open the channel", channel_url) {
        rows.push(vec![b]);
    }
    rows.push(vec![InlineKeyboardButton::callback(
        "✅ I subscribed".to_string(),
        "check_sub".to_string(),
    )]);
    InlineKeyboardMarkup::new(rows)
}

/// Main user menu, built from the current link snapshot. Freebie, guides,
/// and contact are callbacks; the rest are plain links.
pub fn main_menu(links: &LinkSet) -> InlineKeyboardMarkup {
    let mut rows = vec![
        vec![InlineKeyboardButton::callback("🎁 Free guide", "freebie")],
        vec![InlineKeyboardButton::callback("📘 Guides", "guides")],
        vec![InlineKeyboardButton::callback(
            "📇 Leave a contact",
            "leave_contact",
        )],
    ];
    rows.extend(
        [
            ("📚 The course", links.course_url.as_str()),
            ("📢 Our channel", links.channel_url.as_str()),
            ("📞 Book a call", links.consult_url.as_str()),
        ]
        .iter()
        .filter_map(|(text, url)| url_button(text, url).map(|b| vec![b])),
    );
    InlineKeyboardMarkup::new(rows)
}

pub fn admin_panel() -> InlineKeyboardMarkup {
    let rows = vec![
        vec![
            InlineKeyboardButton::callback("📊 Stats", "adm:stats"),
            InlineKeyboardButton::callback("🔻 Funnel", "adm:funnel"),
        ],
        vec![
            InlineKeyboardButton::callback("👥 Users", "adm:users"),
            InlineKeyboardButton::callback("📇 Contacts", "adm:contacts"),
        ],
        vec![
            InlineKeyboardButton::callback("🔗 Links", "adm:links"),
            InlineKeyboardButton::callback("👋 Welcome chain", "adm:chain"),
        ],
        vec![InlineKeyboardButton::callback(
            "📣 Broadcasts",
            "adm:broadcast",
        )],
    ];
    InlineKeyboardMarkup::new(rows)
}

/// One button per campaign in the catalogue.
pub fn broadcast_panel() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = CAMPAIGN_KEYS
        .iter()
        .map(|key| {
            vec![InlineKeyboardButton::callback(
                format!("▶️ {key}"),
                format!("bc:{key}"),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "adm:panel")]);
    InlineKeyboardMarkup::new(rows)
}

/// Prev/next row for paginated admin listings, plus a back button.
pub fn pager(prefix: &str, page: i64, total: i64, page_size: i64) -> InlineKeyboardMarkup {
    let mut nav = Vec::new();
    if page > 0 {
        nav.push(InlineKeyboardButton::callback(
            "⬅️ Prev",
            format!("{prefix}:{}", page - 1),
        ));
    }
    if (page + 1) * page_size < total {
        nav.push(InlineKeyboardButton::callback(
            "Next ➡️",
            format!("{prefix}:{}", page + 1),
        ));
    }

    let mut rows = Vec::new();
    if !nav.is_empty() {
        rows.push(nav);
    }
    rows.push(vec![InlineKeyboardButton::callback("🛠 Panel", "adm:panel")]);
    InlineKeyboardMarkup::new(rows)
}

pub fn links_panel() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = LINK_KEYS
        .iter()
        .map(|(key, label)| {
            vec![InlineKeyboardButton::callback(
                format!("✏️ {label}"),
                format!("link:{key}"),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("⬅️ Back", "adm:panel")]);
    InlineKeyboardMarkup::new(rows)
}
