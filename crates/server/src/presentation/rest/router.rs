use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::{RoutePolicy, SessionCookie, auth_handlers, guard, handlers, journal_handlers};
use crate::application::{IdentityVerifier, SessionUseCase};
use crate::domain::Clock;
use crate::infrastructure::{GuardMode, InMemoryPortfolioRepository, InMemoryTradeRepository};

/// Application state shared across handlers
pub struct AppState {
    pub app_name: String,
    pub clock: Arc<dyn Clock>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub trade_repo: Arc<InMemoryTradeRepository>,
    pub portfolio_repo: Arc<InMemoryPortfolioRepository>,
    pub cookie: SessionCookie,
    pub policy: RoutePolicy,
    pub guard_mode: GuardMode,
}

impl AppState {
    pub fn new(
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn IdentityVerifier>,
        trade_repo: Arc<InMemoryTradeRepository>,
        portfolio_repo: Arc<InMemoryPortfolioRepository>,
        cookie: SessionCookie,
    ) -> Self {
        AppState {
            app_name: "Ikigai Journal".to_string(),
            clock,
            verifier,
            trade_repo,
            portfolio_repo,
            cookie,
            policy: RoutePolicy::default(),
            guard_mode: GuardMode::default(),
        }
    }

    pub fn with_policy(mut self, policy: RoutePolicy, mode: GuardMode) -> Self {
        self.policy = policy;
        self.guard_mode = mode;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = name.into();
        self
    }

    pub fn sessions(&self) -> SessionUseCase<dyn IdentityVerifier> {
        SessionUseCase::new(Arc::clone(&self.verifier))
    }
}

/// Create the web router
///
/// The route guard wraps the fallback too, so unknown paths under a
/// protected prefix still redirect to the login page.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public pages
        .route("/", get(handlers::landing))
        .route("/login", get(handlers::login))
        // Journal pages
        .route("/dashboard", get(handlers::dashboard))
        .route(
            "/trades",
            get(journal_handlers::list_trades).post(journal_handlers::create_trade),
        )
        .route(
            "/trades/{id}",
            get(journal_handlers::get_trade)
                .put(journal_handlers::update_trade)
                .delete(journal_handlers::delete_trade),
        )
        .route("/portfolio", get(journal_handlers::portfolio_overview))
        .route("/portfolio/accounts", post(journal_handlers::create_account))
        .route(
            "/portfolio/portfolios",
            post(journal_handlers::create_portfolio),
        )
        .route("/analytics", get(journal_handlers::analytics))
        // API
        .route("/api/ping", get(handlers::ping))
        .route(
            "/api/auth/session",
            get(auth_handlers::get_session)
                .post(auth_handlers::create_session)
                .delete(auth_handlers::delete_session),
        )
        .fallback(handlers::not_found)
        // Middleware
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            guard::route_guard,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
