//! Ikigai Journal Server
//!
//! A trading journal web service whose pages are protected by an
//! identity-provider backed session cookie.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: Clock and the decoded identity of a signed-in user
//! - **Application**: Use cases (session, trades, portfolio, analytics, dashboard)
//!   and the ports they depend on (identity verifier, repositories)
//! - **Infrastructure**: Configuration, identity verifiers, in-memory repositories
//! - **Presentation**: REST router, session cookie codec and the route guard
//!
//! # Session flow
//!
//! 1. The client signs in with the identity provider and obtains an ID token.
//! 2. `POST /api/auth/session` verifies the token server-side and stores it
//!    in an http-only `__session` cookie.
//! 3. The route guard re-verifies the cookie on journal pages and redirects
//!    to `/login?redirect_to=...` without a valid session.
//! 4. `DELETE /api/auth/session` clears the cookie.
//!
//! # Example
//!
//! ```ignore
//! use ikigai_server::{JournalConfig, JournalServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = JournalConfig::default();
//!     config.apply_env()?;
//!     JournalServer::from_config(config)?.run().await?;
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types
pub use domain::{Clock, DecodedToken, SystemClock};

pub use infrastructure::{
    ConfigError, FirebaseTokenVerifier, FixedClock, GuardMode, IdentityConfig,
    InMemoryPortfolioRepository, InMemoryTradeRepository, JournalConfig, StaticTokenVerifier,
};

pub use application::{IdentityVerifier, PortfolioRepository, TradeRepository, VerifyError};

pub use presentation::{AppState, create_router};
pub use presentation::rest::{CookieError, RoutePolicy, SessionCookie};

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

/// Failures while assembling or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid session cookie settings: {0}")]
    Cookie(#[from] CookieError),
    #[error("Failed to build identity provider client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The journal web server
pub struct JournalServer {
    pub config: JournalConfig,
    pub clock: Arc<dyn Clock>,
    pub verifier: Arc<dyn IdentityVerifier>,
    pub trade_repo: Arc<InMemoryTradeRepository>,
    pub portfolio_repo: Arc<InMemoryPortfolioRepository>,
    cookie: SessionCookie,
}

impl JournalServer {
    /// Validate the configuration and build the server on the wall clock
    pub fn from_config(config: JournalConfig) -> Result<Self, ServerError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Validate the configuration and build the server with the given clock
    pub fn with_clock(config: JournalConfig, clock: Arc<dyn Clock>) -> Result<Self, ServerError> {
        config.validate()?;
        let verifier = build_verifier(&config.identity, Arc::clone(&clock))?;
        Self::with_verifier(config, clock, verifier)
    }

    /// Build the server around an already constructed identity verifier
    pub fn with_verifier(
        config: JournalConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Result<Self, ServerError> {
        let cookie = SessionCookie::new(
            config.session.cookie_name.clone(),
            config.session.max_age_days,
            config.secure_cookies(),
        )?;

        Ok(JournalServer {
            trade_repo: Arc::new(InMemoryTradeRepository::with_seed(config.seed_demo_data)),
            portfolio_repo: Arc::new(InMemoryPortfolioRepository::with_seed(
                config.seed_demo_data,
            )),
            config,
            clock,
            verifier,
            cookie,
        })
    }

    /// Create the web router
    pub fn router(&self) -> Router {
        let state = AppState::new(
            Arc::clone(&self.clock),
            Arc::clone(&self.verifier),
            Arc::clone(&self.trade_repo),
            Arc::clone(&self.portfolio_repo),
            self.cookie.clone(),
        )
        .with_name(self.config.name.clone())
        .with_policy(
            RoutePolicy::from_config(&self.config.guard),
            self.config.guard.mode,
        );

        create_router(Arc::new(state))
    }

    /// Run the server
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = format!("{}:{}", self.config.server.host, self.config.server.port);
        let router = self.router();

        tracing::info!(
            environment = ?self.config.environment,
            cookie = %self.cookie.name(),
            secure = self.config.secure_cookies(),
            guard = ?self.config.guard.mode,
            "{} listening on {}",
            self.config.name,
            addr
        );

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

/// Identity verifier selected by configuration
pub fn build_verifier(
    config: &IdentityConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn IdentityVerifier>, ServerError> {
    match config {
        IdentityConfig::Firebase {
            api_key,
            endpoint,
            timeout_secs,
        } => {
            tracing::info!(%endpoint, "Verifying sessions with the hosted identity provider");
            let verifier = FirebaseTokenVerifier::new(
                endpoint.clone(),
                api_key.clone(),
                Duration::from_secs(*timeout_secs),
            )?;
            Ok(Arc::new(verifier))
        }
        IdentityConfig::Static { tokens } => {
            tracing::warn!(
                tokens = tokens.len(),
                "Verifying sessions against a static token table"
            );
            let verifier = StaticTokenVerifier::new(clock);
            for entry in tokens {
                let mut user = DecodedToken::new(entry.uid.clone());
                if let Some(email) = &entry.email {
                    user = user.with_email(email.clone());
                }
                if let Some(name) = &entry.name {
                    user = user.with_name(name.clone());
                }
                verifier.insert_expiring(entry.token.clone(), user, entry.expires_at);
            }
            Ok(Arc::new(verifier))
        }
    }
}
