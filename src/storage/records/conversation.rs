use crate::domain::conversation::Conversation;
use crate::domain::user::Profile;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct ConversationRecord {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: Option<OffsetDateTime>,
}

impl From<ConversationRecord> for Conversation {
    fn from(record: ConversationRecord) -> Self {
        Self {
            id: record.id,
            user1_id: record.user1_id,
            user2_id: record.user2_id,
            created_at: record.created_at,
        }
    }
}

/// Row shape for the conversations-for-user query: the counterpart columns
/// are resolved in SQL, so exactly one counterpart comes back per row.
#[derive(sqlx::FromRow)]
pub(crate) struct ConversationWithCounterpartRecord {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    pub created_at: Option<OffsetDateTime>,
    pub other_id: Uuid,
    pub other_username: String,
    pub other_photo_url: Option<String>,
}

impl ConversationWithCounterpartRecord {
    pub(crate) fn into_parts(self) -> (Conversation, Profile) {
        (
            Conversation {
                id: self.id,
                user1_id: self.user1_id,
                user2_id: self.user2_id,
                created_at: self.created_at,
            },
            Profile { id: self.other_id, username: self.other_username, photo_url: self.other_photo_url },
        )
    }
}
