use crate::api::AppState;
use crate::api::middleware::AuthUser;
use crate::api::schemas::auth::{Login, Registration, SessionResponse};
use crate::error::Result;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

/// Creates an account and opens a session for it.
///
/// # Errors
/// Returns `AppError::Conflict` if the username is taken.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Registration>,
) -> Result<impl IntoResponse> {
    let session =
        state.account_service.register(payload.username, payload.password, payload.photo_url).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// # Errors
/// Returns `AppError::AuthError` for bad credentials.
pub async fn login(State(state): State<AppState>, Json(payload): Json<Login>) -> Result<impl IntoResponse> {
    let session = state.account_service.login(payload.username, payload.password).await?;
    Ok(Json(SessionResponse::from(session)))
}

pub async fn logout(auth_user: AuthUser, State(state): State<AppState>) -> impl IntoResponse {
    state.account_service.logout(auth_user.user_id).await;
    StatusCode::OK
}
