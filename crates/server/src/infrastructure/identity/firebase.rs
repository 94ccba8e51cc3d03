use crate::application::ports::{IdentityVerifier, VerifyError};
use crate::domain::DecodedToken;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hosted identity toolkit API
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com";

/// Verifies ID tokens with the provider's server-side account lookup
///
/// The provider checks signature, expiry and revocation; a token it cannot
/// resolve to a user is rejected.
#[derive(Clone)]
pub struct FirebaseTokenVerifier {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl FirebaseTokenVerifier {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(FirebaseTokenVerifier {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn lookup_url(&self) -> String {
        format!("{}/v1/accounts:lookup", self.endpoint)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: bool,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    provider_user_info: Vec<ProviderInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderInfo {
    provider_id: String,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl From<LookupUser> for DecodedToken {
    fn from(user: LookupUser) -> Self {
        DecodedToken {
            uid: user.local_id,
            email: user.email,
            email_verified: user.email_verified,
            name: user.display_name,
            picture: user.photo_url,
            sign_in_provider: user
                .provider_user_info
                .into_iter()
                .next()
                .map(|p| p.provider_id),
        }
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseTokenVerifier {
    async fn verify_id_token(&self, token: &str) -> Result<DecodedToken, VerifyError> {
        let resp = self
            .client
            .post(self.lookup_url())
            .query(&[("key", self.api_key.as_str())])
            .json(&LookupRequest { id_token: token })
            .send()
            .await
            .map_err(|e| VerifyError::Unavailable(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| VerifyError::Unavailable(e.to_string()))?;

        if status.is_client_error() {
            let reason = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(VerifyError::Rejected(reason));
        }
        if !status.is_success() {
            return Err(VerifyError::Unavailable(format!("HTTP {}: {}", status, text)));
        }

        let lookup: LookupResponse = serde_json::from_str(&text)
            .map_err(|e| VerifyError::Unavailable(format!("Undecodable lookup reply: {}", e)))?;

        lookup
            .users
            .into_iter()
            .next()
            .map(DecodedToken::from)
            .ok_or_else(|| VerifyError::Rejected("USER_NOT_FOUND".to_string()))
    }
}
