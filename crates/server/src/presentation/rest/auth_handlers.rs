//! `/api/auth/session`: exchange a provider token for a session cookie,
//! report the current session, and sign out.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::application::CreateSessionCommand;
use crate::presentation::rest::{ApiError, dto::*};

use super::AppState;

/// POST /api/auth/session
///
/// The body is read leniently: anything that is not a JSON object with a
/// `token` string is treated as a missing token.
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: CreateSessionRequest = serde_json::from_slice(&body).unwrap_or_default();

    let session = state
        .sessions()
        .create(CreateSessionCommand {
            token: request.token,
        })
        .await?;

    let cookie = state.cookie.issue(&session.token).map_err(|e| {
        tracing::error!(error = %e, "Verified token cannot be stored in a cookie");
        ApiError::internal("Internal Server Error")
    })?;

    Ok(([(SET_COOKIE, cookie)], Json(StatusResponse::success())).into_response())
}

/// GET /api/auth/session
pub async fn get_session(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let cookie = state.cookie.read(&headers);

    match state.sessions().verify(cookie.as_deref()).await {
        Ok(user) => Json(SessionStatusResponse::authenticated(user)).into_response(),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(SessionStatusResponse::anonymous()),
        )
            .into_response(),
    }
}

/// DELETE /api/auth/session
pub async fn delete_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::info!("Session cleared");
    (
        [(SET_COOKIE, state.cookie.clear())],
        Json(StatusResponse::success()),
    )
}
