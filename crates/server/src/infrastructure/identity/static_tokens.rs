use crate::application::ports::{IdentityVerifier, VerifyError};
use crate::domain::{Clock, DecodedToken};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
struct IssuedToken {
    user: DecodedToken,
    expires_at: Option<DateTime<Utc>>,
}

/// Identity provider backed by a fixed token table
///
/// Stands in for the hosted provider in local development and tests.
pub struct StaticTokenVerifier {
    tokens: DashMap<String, IssuedToken>,
    clock: Arc<dyn Clock>,
}

impl StaticTokenVerifier {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens: DashMap::new(),
            clock,
        }
    }

    /// Register a token that never expires
    pub fn insert(&self, token: impl Into<String>, user: DecodedToken) {
        self.insert_expiring(token, user, None);
    }

    pub fn insert_expiring(
        &self,
        token: impl Into<String>,
        user: DecodedToken,
        expires_at: Option<DateTime<Utc>>,
    ) {
        self.tokens
            .insert(token.into(), IssuedToken { user, expires_at });
    }

    /// Builder-style `insert`
    pub fn with_token(self, token: impl Into<String>, user: DecodedToken) -> Self {
        self.insert(token, user);
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityVerifier for StaticTokenVerifier {
    async fn verify_id_token(&self, token: &str) -> Result<DecodedToken, VerifyError> {
        let issued = self
            .tokens
            .get(token)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| VerifyError::Rejected("INVALID_ID_TOKEN".to_string()))?;

        if let Some(expires_at) = issued.expires_at {
            if self.clock.now() >= expires_at {
                return Err(VerifyError::Rejected("TOKEN_EXPIRED".to_string()));
            }
        }

        Ok(issued.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::FixedClock;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_known_and_unknown_tokens() {
        let clock = Arc::new(FixedClock::at(Utc::now()));
        let verifier = StaticTokenVerifier::new(clock)
            .with_token("tok-1", DecodedToken::new("alice").with_email("alice@example.com"));

        let user = verifier.verify_id_token("tok-1").await.unwrap();
        assert_eq!(user.uid, "alice");
        assert!(user.email_verified);

        assert_eq!(
            verifier.verify_id_token("tok-2").await,
            Err(VerifyError::Rejected("INVALID_ID_TOKEN".to_string()))
        );
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
        let clock = Arc::new(FixedClock::at(start));
        let verifier = StaticTokenVerifier::new(clock.clone());
        verifier.insert_expiring(
            "short-lived",
            DecodedToken::new("bob"),
            Some(start + Duration::hours(1)),
        );

        assert!(verifier.verify_id_token("short-lived").await.is_ok());

        clock.advance(Duration::hours(1));
        assert_eq!(
            verifier.verify_id_token("short-lived").await,
            Err(VerifyError::Rejected("TOKEN_EXPIRED".to_string()))
        );
    }
}
