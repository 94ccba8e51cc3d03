//! Route guard
//!
//! Redirects unauthenticated visitors of journal pages to the login page and
//! authenticated visitors of the login page to their dashboard. Requests
//! under `/api/` always pass through.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

use super::AppState;
use crate::infrastructure::{GuardConfig, GuardMode};

const API_PREFIX: &str = "/api/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Continue,
    Redirect(String),
}

/// Which paths are protected and where redirects go
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    protected_prefixes: Vec<String>,
    login_path: String,
    home_path: String,
}

impl RoutePolicy {
    pub fn new(
        protected_prefixes: Vec<String>,
        login_path: impl Into<String>,
        home_path: impl Into<String>,
    ) -> Self {
        RoutePolicy {
            protected_prefixes,
            login_path: login_path.into(),
            home_path: home_path.into(),
        }
    }

    pub fn from_config(config: &GuardConfig) -> Self {
        Self::new(
            config.protected_prefixes.clone(),
            config.login_path.clone(),
            config.home_path.clone(),
        )
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Plain prefix match: `/trades-archive` is protected like `/trades`
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_login(&self, path: &str) -> bool {
        path == self.login_path
    }

    /// Whether the guard has an opinion about `path` at all
    pub fn applies_to(&self, path: &str) -> bool {
        !path.starts_with(API_PREFIX) && (self.is_protected(path) || self.is_login(path))
    }

    pub fn decide(&self, path: &str, authenticated: bool) -> GuardDecision {
        if path.starts_with(API_PREFIX) {
            return GuardDecision::Continue;
        }
        if !authenticated && self.is_protected(path) {
            return GuardDecision::Redirect(self.login_redirect(path));
        }
        if authenticated && self.is_login(path) {
            return GuardDecision::Redirect(self.home_path.clone());
        }
        GuardDecision::Continue
    }

    /// Login URL that returns to `path` after sign-in
    pub fn login_redirect(&self, path: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("redirect_to", path)
            .finish();
        format!("{}?{}", self.login_path, query)
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::from_config(&GuardConfig::default())
    }
}

/// Middleware applying [`RoutePolicy`] to every request
///
/// In verified mode the decoded identity is stored in the request
/// extensions for [`super::CurrentUser`].
pub async fn route_guard(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if !state.policy.applies_to(&path) {
        return next.run(request).await;
    }

    let cookie = state.cookie.read(request.headers());
    let authenticated = match state.guard_mode {
        GuardMode::Presence => cookie.is_some(),
        GuardMode::Verified => match state.sessions().verify(cookie.as_deref()).await {
            Ok(user) => {
                request.extensions_mut().insert(user);
                true
            }
            Err(_) => false,
        },
    };

    match state.policy.decide(&path, authenticated) {
        GuardDecision::Continue => next.run(request).await,
        GuardDecision::Redirect(location) => {
            tracing::debug!(%path, %location, authenticated, "Route guard redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}
