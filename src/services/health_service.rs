use crate::error::Result;
use crate::storage::DbPool;

#[derive(Clone, Debug)]
pub struct HealthService {
    pool: DbPool,
}

impl HealthService {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// # Errors
    /// Returns `AppError::Database` if the ping fails.
    pub async fn check_db(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
