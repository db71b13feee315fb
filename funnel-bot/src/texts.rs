//! User-facing texts. HTML formatting throughout.

pub const SUBSCRIBE_GATE: &str = "👋 Welcome!\n\n\
To get started, subscribe to our channel — then tap the button below.";

pub const STILL_NOT_SUBSCRIBED: &str =
    "Hmm, I don't see your subscription yet. Subscribe and tap the button again.";

pub const SUBSCRIPTION_OK: &str = "Great, you're in! 🎉";

pub const MENU: &str = "Here is everything in one place 👇";

pub const HELP: &str = "What I can do:\n\n\
/start — start the bot\n\
/menu — main menu\n\
/status — your profile\n\
/dnd — toggle broadcast messages on or off\n\n\
You can also just write your name, email or phone and I will save it, \
or send \"stop\" / \"resume\" to mute and unmute broadcasts.";

pub const CONTACT_THANKS: &str = "Got it, saved! 🙌";

pub const CONTACT_PROMPT: &str = "Leave your contact and we will get back to you.\n\n\
Send your name, email and phone in one message, for example:\n\
<code>Anna, anna@mail.com, +7 999 123-45-67</code>";

pub const CONTACT_MORE: &str =
    "Thanks! Could you also add an email or phone so we can reach you?";

pub const CONTACT_NOTHING: &str =
    "I could not find contact data in that. Send a name, email or phone.";

pub const WELCOME_BACK: &str = "🔔 Welcome back! Broadcasts are on again.";

pub const GUIDE_CAPTION: &str = "📋 <b>Your evening checklist</b> — seven small steps for a calmer night.";

pub const GUIDE_MISSING: &str = "The guide is being updated right now — check back a bit later.";

pub const FREEBIE_FALLBACK: &str = "🎁 Here is your free guide:";

pub const DND_ON: &str = "🔕 Broadcasts muted. Send /dnd again to unmute.";
pub const DND_OFF: &str = "🔔 Broadcasts unmuted. Welcome back!";

pub const ADMIN_PANEL: &str = "🛠 <b>Admin panel</b>";

pub const LINK_PROMPT: &str = "Send the new URL as a plain message.";

pub const LINK_INVALID: &str = "That does not look like a valid URL. Try again.";

pub const CHAIN_PROMPT: &str = "Send the welcome chain as JSON: an array of units like\n\
<code>[{\"type\":\"text\",\"content\":\"hi\"},{\"type\":\"photo\",\"content\":\"&lt;file id&gt;\",\"caption\":\"...\"}]</code>";

pub const CHAIN_INVALID: &str =
    "Could not parse that as a welcome chain. Check the JSON and send it again.";

pub const BROADCAST_STARTED: &str = "Campaign started. Summaries will arrive per step.";

pub const UNKNOWN_CAMPAIGN: &str = "Unknown campaign.";
