use axum::{
    extract::FromRequestParts,
    http::{header::SET_COOKIE, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::AppState;
use crate::domain::DecodedToken;

/// Identity of the signed-in user of a page request
///
/// Taken from the route guard when it already verified the cookie, otherwise
/// verified here. Without a valid session the request is sent to the login
/// page and any stale cookie is cleared, so presence-mode guarding cannot
/// bounce between `/login` and a protected page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub DecodedToken);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<DecodedToken>() {
            return Ok(CurrentUser(user.clone()));
        }

        let cookie = state.cookie.read(&parts.headers);
        match state.sessions().verify(cookie.as_deref()).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(err) => {
                tracing::debug!(path = %parts.uri.path(), error = %err, "Page requires a session");
                let redirect = Redirect::temporary(&state.policy.login_redirect(parts.uri.path()));
                if cookie.is_some() {
                    Err(([(SET_COOKIE, state.cookie.clear())], redirect).into_response())
                } else {
                    Err(redirect.into_response())
                }
            }
        }
    }
}
