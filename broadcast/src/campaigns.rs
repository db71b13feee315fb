//! Hardcoded campaign definitions, one per admin broadcast action.
//!
//! Link values come from the [`LinkSet`] snapshot passed in at build time,
//! so an admin edit followed by a reload takes effect on the next run.

use funnel_core::{Button, MediaRef, MessageUnit};

use crate::content::{Campaign, CampaignStep, LinkSet, MediaKind, StepContent};

const ASSETS_DIR: &str = "assets";

fn asset(name: &str) -> MediaRef {
    MediaRef::path(format!("{ASSETS_DIR}/{name}"))
}

fn text_step(content: &str, buttons: Vec<Button>) -> StepContent {
    let mut unit = MessageUnit::text(content);
    unit.buttons = buttons;
    StepContent::Unit(unit)
}

fn button(text: &str, url: &str) -> Button {
    Button {
        text: text.to_string(),
        url: url.to_string(),
    }
}

/// Resolves a campaign key from the admin panel to its definition.
pub fn campaign_by_key(key: &str, links: &LinkSet) -> Option<Campaign> {
    let campaign = match key {
        "launch_flow" => Campaign {
            name: "launch_flow",
            steps: vec![
                CampaignStep::immediate(text_step(
                    "🚀 <b>The doors are open!</b>\n\n\
                     The new course stream starts this week. \
                     Grab your spot before the group fills up.",
                    vec![button("Join the course", &links.course_url)],
                )),
                CampaignStep::after_minutes(
                    1,
                    text_step(
                        "⏳ Last call — enrollment closes tonight.\n\n\
                         If you have questions, book a free call and we will walk you through it.",
                        vec![
                            button("Join the course", &links.course_url),
                            button("Book a call", &links.consult_url),
                        ],
                    ),
                ),
            ],
        },

        "course_flow" => Campaign {
            name: "course_flow",
            steps: vec![
                CampaignStep::immediate(text_step(
                    "📚 <b>What the course actually covers</b>\n\n\
                     • Week 1: resetting your sleep and morning routine\n\
                     • Week 2: breathing and stress work\n\
                     • Week 3: building habits that survive bad days",
                    vec![button("Full programme", &links.course_url)],
                )),
                CampaignStep::after_minutes(
                    5,
                    StepContent::Media {
                        kind: MediaKind::Document,
                        media: asset("course_syllabus.pdf"),
                        caption: Some(
                            "📎 The full syllabus, week by week. Have a look before we talk results."
                                .to_string(),
                        ),
                        buttons: Vec::new(),
                    },
                ),
                CampaignStep::after_minutes(
                    7,
                    StepContent::Album {
                        files: vec![
                            asset("course_results_1.jpg"),
                            asset("course_results_2.jpg"),
                            asset("course_results_3.jpg"),
                        ],
                        caption: Some("Results from the last stream 📈".to_string()),
                        chaser: Some({
                            let mut unit =
                                MessageUnit::text("Want the same? The next stream is waiting.");
                            unit.buttons = vec![button("Join now", &links.course_url)];
                            unit
                        }),
                    },
                ),
            ],
        },

        "breathing" => Campaign {
            name: "breathing",
            steps: vec![CampaignStep::immediate(StepContent::Media {
                kind: MediaKind::Video,
                media: asset("breathing_practice.mp4"),
                caption: Some(
                    "🌬 <b>5-minute breathing practice</b>\n\n\
                     Do it right now — it works best before you read on."
                        .to_string(),
                ),
                buttons: vec![button("More practices", &links.channel_url)],
            })],
        },

        "morning" => Campaign {
            name: "morning",
            steps: vec![CampaignStep::immediate(text_step(
                "☀️ Good morning!\n\n\
                 One small thing before the day takes over: \
                 two minutes of slow breathing, right where you are.",
                vec![button("Today's practice", &links.channel_url)],
            ))],
        },

        "tips" => Campaign {
            name: "tips",
            steps: vec![CampaignStep::immediate(StepContent::Media {
                kind: MediaKind::Document,
                media: asset("sleep_checklist.pdf"),
                caption: Some(
                    "📋 <b>Your evening checklist</b>\n\n\
                     Seven small steps for a calmer night. Save it, try it tonight."
                        .to_string(),
                ),
                buttons: vec![button("Get the free guide", &links.freebie_url)],
            })],
        },

        "presale" => Campaign {
            name: "presale",
            steps: vec![
                CampaignStep::immediate(text_step(
                    "🎁 <b>Early-bird window is open</b>\n\n\
                     The next stream opens to everyone on Friday. \
                     Until then the price is 30% lower for you.",
                    vec![button("Claim early-bird price", &links.course_url)],
                )),
                CampaignStep::after_minutes(
                    10,
                    text_step(
                        "A quiet reminder: the early-bird price disappears at midnight. \
                         After that it is full price, no exceptions.",
                        vec![button("Claim early-bird price", &links.course_url)],
                    ),
                ),
            ],
        },

        "start_album" => Campaign {
            name: "start_album",
            steps: vec![CampaignStep::immediate(StepContent::Album {
                files: vec![
                    asset("start_1.jpg"),
                    asset("start_2.jpg"),
                    asset("start_3.jpg"),
                    asset("start_4.jpg"),
                    asset("start_5.jpg"),
                ],
                caption: Some("Where it all starts — a look inside the programme 👀".to_string()),
                chaser: None,
            })],
        },

        _ => return None,
    };

    Some(campaign)
}

/// Keys shown in the admin broadcast panel, in display order.
pub const CAMPAIGN_KEYS: &[&str] = &[
    "launch_flow",
    "course_flow",
    "breathing",
    "morning",
    "tips",
    "presale",
    "start_album",
];
