use crate::domain::message::Message;
use crate::domain::user::{Counterpart, Profile};
use time::OffsetDateTime;
use uuid::Uuid;

/// A persistent thread between exactly two users. The participant pair is
/// unordered and immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: Option<OffsetDateTime>,
}

impl Conversation {
    #[must_use]
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }
}

/// A conversation as fetched for one requester: the counterpart is already
/// resolved by the data-access layer, and messages are ordered oldest-first.
#[derive(Debug, Clone)]
pub struct ConversationThread {
    pub conversation: Conversation,
    pub counterpart: Profile,
    pub messages: Vec<Message>,
}

/// Derived, never persisted: one list entry per conversation for the
/// requesting user.
#[derive(Debug, Clone)]
pub struct ConversationPreview {
    pub id: Uuid,
    pub other_user: Counterpart,
    pub latest_message_text: String,
    pub unread_count: usize,
    pub last_read_id: Option<Uuid>,
    pub messages: Vec<Message>,
}
