//! Welcome-chain player: plays the stored onboarding sequence to one user.

use std::time::Duration;

use funnel_core::{MessageUnit, RecipientId, Transport};
use tracing::{info, warn};

use crate::sender::dispatch_unit;

/// Pause between chain units so the conversation keeps its intended order.
pub const UNIT_PAUSE: Duration = Duration::from_millis(500);

const PLACEHOLDER_TEXT: &str = "Welcome! 👋";

/// Plays the chain to a single recipient, unit by unit.
///
/// An empty chain plays one placeholder text unit so the user is never
/// greeted with silence. A dispatch error on one unit is logged and the
/// chain continues with the next.
pub async fn play_chain(transport: &dyn Transport, to: RecipientId, chain: &[MessageUnit]) {
    let placeholder;
    let units: &[MessageUnit] = if chain.is_empty() {
        placeholder = [MessageUnit::text(PLACEHOLDER_TEXT)];
        &placeholder
    } else {
        chain
    };

    for (i, unit) in units.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(UNIT_PAUSE).await;
        }
        if let Err(e) = dispatch_unit(transport, to, unit).await {
            warn!(recipient = %to, unit = i, error = %e, "Welcome unit failed, continuing");
        }
    }

    info!(recipient = %to, units = units.len(), "Welcome chain played");
}
