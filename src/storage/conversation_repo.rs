use crate::domain::conversation::{Conversation, ConversationThread};
use crate::error::Result;
use crate::storage::records::conversation::{ConversationRecord, ConversationWithCounterpartRecord};
use crate::storage::records::message::MessageRecord;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct ConversationRepository {
    pool: PgPool,
}

impl ConversationRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user1_id: Uuid, user2_id: Uuid) -> Result<Conversation> {
        let record = sqlx::query_as::<_, ConversationRecord>(
            r#"
            INSERT INTO conversations (user1_id, user2_id)
            VALUES ($1, $2)
            RETURNING id, user1_id, user2_id, created_at
            "#,
        )
        .bind(user1_id)
        .bind(user2_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    pub async fn find_by_id(&self, conversation_id: Uuid) -> Result<Option<Conversation>> {
        let record = sqlx::query_as::<_, ConversationRecord>(
            r#"
            SELECT id, user1_id, user2_id, created_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(conversation_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// The thread between two users, regardless of participant order.
    pub async fn find_between(&self, user_a: Uuid, user_b: Uuid) -> Result<Option<Conversation>> {
        let record = sqlx::query_as::<_, ConversationRecord>(
            r#"
            SELECT id, user1_id, user2_id, created_at
            FROM conversations
            WHERE (user1_id = $1 AND user2_id = $2) OR (user1_id = $2 AND user2_id = $1)
            "#,
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    /// All threads the user participates in, each with the counterpart
    /// resolved in SQL and messages ordered oldest-first.
    pub async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<ConversationThread>> {
        let records = sqlx::query_as::<_, ConversationWithCounterpartRecord>(
            r#"
            SELECT c.id, c.user1_id, c.user2_id, c.created_at,
                   u.id AS other_id, u.username AS other_username, u.photo_url AS other_photo_url
            FROM conversations c
            JOIN users u
              ON u.id = CASE WHEN c.user1_id = $1 THEN c.user2_id ELSE c.user1_id END
            WHERE c.user1_id = $1 OR c.user2_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let conversation_ids: Vec<Uuid> = records.iter().map(|r| r.id).collect();

        let message_records = sqlx::query_as::<_, MessageRecord>(
            r#"
            SELECT id, conversation_id, sender_id, text, read, created_at
            FROM messages
            WHERE conversation_id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(&conversation_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_conversation: HashMap<Uuid, Vec<crate::domain::message::Message>> = HashMap::new();
        for record in message_records {
            by_conversation.entry(record.conversation_id).or_default().push(record.into());
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let (conversation, counterpart) = record.into_parts();
                let messages = by_conversation.remove(&conversation.id).unwrap_or_default();
                ConversationThread { conversation, counterpart, messages }
            })
            .collect())
    }
}
