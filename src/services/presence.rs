use dashmap::DashSet;
use std::fmt::Debug;
use std::sync::Arc;
use uuid::Uuid;

/// Tracks which users currently hold a live session. The preview assembler
/// only reads this; session lifecycle events write it.
#[async_trait::async_trait]
pub trait PresenceService: Send + Sync + Debug {
    async fn is_online(&self, user_id: Uuid) -> bool;
    async fn mark_online(&self, user_id: Uuid);
    async fn mark_offline(&self, user_id: Uuid);
}

/// In-process presence set. A multi-node deployment would back this trait
/// with a shared store instead.
#[derive(Debug, Default)]
pub struct InMemoryPresence {
    online: DashSet<Uuid>,
}

impl InMemoryPresence {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait::async_trait]
impl PresenceService for InMemoryPresence {
    async fn is_online(&self, user_id: Uuid) -> bool {
        self.online.contains(&user_id)
    }

    async fn mark_online(&self, user_id: Uuid) {
        self.online.insert(user_id);
    }

    async fn mark_offline(&self, user_id: Uuid) {
        self.online.remove(&user_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn presence_lifecycle() {
        let presence = InMemoryPresence::new();
        let user = Uuid::new_v4();

        assert!(!presence.is_online(user).await);

        presence.mark_online(user).await;
        assert!(presence.is_online(user).await);

        // Marking twice is harmless
        presence.mark_online(user).await;
        assert!(presence.is_online(user).await);

        presence.mark_offline(user).await;
        assert!(!presence.is_online(user).await);
    }
}
