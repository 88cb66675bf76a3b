use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
    pub password_hash: String,
    pub created_at: Option<OffsetDateTime>,
}

/// Public view of a user: what the other side of a conversation may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
}

/// A conversation counterpart, with the presence flag attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    pub id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
    pub online: bool,
}

impl Counterpart {
    #[must_use]
    pub fn new(profile: Profile, online: bool) -> Self {
        Self { id: profile.id, username: profile.username, photo_url: profile.photo_url, online }
    }
}
