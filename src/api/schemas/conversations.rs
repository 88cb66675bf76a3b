use crate::api::schemas::messages::MessageResponse;
use crate::domain::conversation::ConversationPreview;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ConversationPreviewResponse {
    pub id: Uuid,
    pub other_user: OtherUserResponse,
    pub latest_message_text: String,
    pub unread_count: usize,
    pub last_read_id: Option<Uuid>,
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Serialize)]
pub struct OtherUserResponse {
    pub id: Uuid,
    pub username: String,
    pub photo_url: Option<String>,
    pub online: bool,
}

impl From<ConversationPreview> for ConversationPreviewResponse {
    fn from(preview: ConversationPreview) -> Self {
        Self {
            id: preview.id,
            other_user: OtherUserResponse {
                id: preview.other_user.id,
                username: preview.other_user.username,
                photo_url: preview.other_user.photo_url,
                online: preview.other_user.online,
            },
            latest_message_text: preview.latest_message_text,
            unread_count: preview.unread_count,
            last_read_id: preview.last_read_id,
            messages: preview.messages.into_iter().map(Into::into).collect(),
        }
    }
}
