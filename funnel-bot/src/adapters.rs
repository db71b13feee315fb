//! Adapters wiring the storage crate into the broadcast engine's seams.

use async_trait::async_trait;
use broadcast::RecipientSource;
use funnel_core::{FunnelError, RecipientId, Result};
use storage::UserRepository;

/// Recipient source backed by the users table.
pub struct StorageRecipientSource {
    users: UserRepository,
}

impl StorageRecipientSource {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }
}

#[async_trait]
impl RecipientSource for StorageRecipientSource {
    async fn recipient_ids(&self) -> Result<Vec<RecipientId>> {
        self.users
            .list_recipient_ids()
            .await
            .map_err(|e| FunnelError::Database(e.to_string()))
    }
}
