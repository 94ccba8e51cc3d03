use std::sync::Arc;
use thiserror::Error;

use crate::application::ports::{IdentityVerifier, VerifyError};
use crate::domain::DecodedToken;

#[derive(Debug, Clone, Default)]
pub struct CreateSessionCommand {
    pub token: Option<String>,
}

/// A verified token ready to be stored in the session cookie
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: DecodedToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Token is required")]
    MissingToken,
    #[error("No session")]
    NoSession,
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

impl From<VerifyError> for SessionError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::Rejected(reason) => SessionError::InvalidToken(reason),
            VerifyError::Unavailable(reason) => SessionError::ProviderUnavailable(reason),
        }
    }
}

/// Session issuance and verification against the identity provider
pub struct SessionUseCase<V>
where
    V: IdentityVerifier + ?Sized,
{
    verifier: Arc<V>,
}

impl<V> SessionUseCase<V>
where
    V: IdentityVerifier + ?Sized,
{
    pub fn new(verifier: Arc<V>) -> Self {
        Self { verifier }
    }

    /// Verify a freshly issued client token before it becomes a session
    pub async fn create(&self, command: CreateSessionCommand) -> Result<Session, SessionError> {
        let token = command
            .token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::MissingToken)?;

        tracing::debug!("Token received, verifying with identity provider");

        match self.verifier.verify_id_token(&token).await {
            Ok(user) => {
                tracing::info!(uid = %user.uid, "Session created");
                Ok(Session { token, user })
            }
            Err(VerifyError::Rejected(reason)) => {
                tracing::warn!(%reason, "Session token rejected");
                Err(SessionError::InvalidToken(reason))
            }
            Err(VerifyError::Unavailable(reason)) => {
                tracing::error!(%reason, "Identity provider unavailable while creating session");
                Err(SessionError::ProviderUnavailable(reason))
            }
        }
    }

    /// Re-verify the token carried by a session cookie
    pub async fn verify(&self, cookie: Option<&str>) -> Result<DecodedToken, SessionError> {
        let token = cookie
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(SessionError::NoSession)?;

        self.verifier.verify_id_token(token).await.map_err(|e| {
            tracing::debug!(error = %e, "Session cookie failed verification");
            SessionError::from(e)
        })
    }
}
