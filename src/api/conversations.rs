use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::conversations::ConversationPreviewResponse;
use crate::error::Result;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

/// Lists the requester's conversations as previews, most recently active
/// first.
pub async fn list_conversations(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let previews = state.conversation_service.list(auth_user.user_id).await?;

    let body: Vec<ConversationPreviewResponse> = previews.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// Marks all messages from `sender_id` in the conversation as read.
///
/// # Errors
/// Returns `AppError::NotFound` for an unknown conversation and
/// `AppError::Forbidden` when the requester is not a participant.
pub async fn mark_read(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((conversation_id, sender_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state.conversation_service.mark_read(auth_user.user_id, conversation_id, sender_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
