use crate::services::account_service::Session;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            user: SessionUser {
                id: session.user.id,
                username: session.user.username,
                photo_url: session.user.photo_url,
            },
        }
    }
}
