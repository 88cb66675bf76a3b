use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::messages::{MessageResponse, SendMessage};
use crate::error::Result;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Stores a message to a recipient, creating the conversation on first
/// contact.
///
/// # Errors
/// Returns `AppError::NotFound` if the recipient does not exist.
pub async fn send_message(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SendMessage>,
) -> Result<impl IntoResponse> {
    let message = state.message_service.send(auth_user.user_id, payload.recipient_id, &payload.text).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}
