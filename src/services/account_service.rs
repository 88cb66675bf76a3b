use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Password};
use crate::domain::user::User;
use crate::error::{AppError, Result};
use crate::services::presence::PresenceService;
use crate::storage::user_repo::UserRepository;
use std::sync::Arc;
use uuid::Uuid;

/// An issued access token together with the account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Clone, Debug)]
pub struct AccountService {
    config: AuthConfig,
    user_repo: UserRepository,
    presence: Arc<dyn PresenceService>,
}

impl AccountService {
    #[must_use]
    pub fn new(config: AuthConfig, user_repo: UserRepository, presence: Arc<dyn PresenceService>) -> Self {
        Self { config, user_repo, presence }
    }

    /// Registers a new account and opens a session for it.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the username is taken.
    #[tracing::instrument(
        skip(self, password, photo_url),
        fields(user_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn register(
        &self,
        username: String,
        password: String,
        photo_url: Option<String>,
    ) -> Result<Session> {
        if username.trim().is_empty() {
            return Err(AppError::BadRequest("Username must not be empty".into()));
        }
        if password.len() < 8 {
            return Err(AppError::BadRequest("Password must be at least 8 characters".into()));
        }

        let password_hash = Password::hash(&password)?;
        let user = match self.user_repo.create(&username, photo_url.as_deref(), &password_hash).await {
            Ok(user) => user,
            Err(AppError::Database(e)) if is_unique_violation(&e) => {
                return Err(AppError::Conflict("Username already taken".into()));
            }
            Err(e) => return Err(e),
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));
        tracing::info!("Account registered");

        self.open_session(user).await
    }

    /// # Errors
    /// Returns `AppError::AuthError` for an unknown username or wrong password.
    #[tracing::instrument(
        skip(self, username, password),
        fields(user_id = tracing::field::Empty),
        err(level = "warn")
    )]
    pub async fn login(&self, username: String, password: String) -> Result<Session> {
        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            tracing::warn!("Login failed: user not found");
            return Err(AppError::AuthError);
        };

        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        if !Password::verify(&password, &user.password_hash)? {
            tracing::warn!("Login failed: invalid password");
            return Err(AppError::AuthError);
        }

        self.open_session(user).await
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    pub async fn logout(&self, user_id: Uuid) {
        self.presence.mark_offline(user_id).await;
        tracing::info!("Session closed");
    }

    async fn open_session(&self, user: User) -> Result<Session> {
        let claims = Claims::new(user.id, self.config.access_token_ttl_secs);
        let token = claims.encode(&self.config.jwt_secret)?;

        self.presence.mark_online(user.id).await;

        Ok(Session { token, user })
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error.as_database_error().and_then(sqlx::error::DatabaseError::code).is_some_and(|code| code == "23505")
}
