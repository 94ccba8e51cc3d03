use crate::domain::DecodedToken;
use async_trait::async_trait;
use thiserror::Error;

/// Why a token could not be turned into an identity
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The provider looked at the token and refused it (bad signature, expired, unknown user)
    #[error("Token rejected: {0}")]
    Rejected(String),
    /// The provider could not be asked (network, 5xx, undecodable reply)
    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// External identity provider
///
/// All trust decisions are delegated here; the server never inspects token
/// contents itself.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an opaque identity token and return the identity it asserts
    async fn verify_id_token(&self, token: &str) -> Result<DecodedToken, VerifyError>;
}
