use crate::domain::user::User;
use crate::error::Result;
use crate::storage::records::user::UserRecord;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// Returns `sqlx::Error::Database` with a unique-violation code if the
    /// username is taken.
    pub async fn create(&self, username: &str, photo_url: Option<&str>, password_hash: &str) -> Result<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, photo_url, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, photo_url, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(photo_url)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, photo_url, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, photo_url, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }
}
