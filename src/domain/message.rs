use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub text: String,
    pub read: bool,
    pub created_at: OffsetDateTime,
}

impl Message {
    #[must_use]
    pub fn is_unread_from(&self, sender_id: Uuid) -> bool {
        self.sender_id == sender_id && !self.read
    }
}
