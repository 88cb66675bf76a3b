use crate::domain::message::Message;
use crate::error::Result;
use crate::storage::records::message::MessageRecord;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, conversation_id: Uuid, sender_id: Uuid, text: &str) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, text)
            VALUES ($1, $2, $3)
            RETURNING id, conversation_id, sender_id, text, read, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    /// Flips the read flag for every message in the conversation authored by
    /// `sender_id`. Idempotent: already-read rows are left untouched.
    pub async fn mark_read(&self, conversation_id: Uuid, sender_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read = TRUE
            WHERE conversation_id = $1 AND sender_id = $2 AND read = FALSE
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
