//! Session cookie codec
//!
//! Reads the session cookie from `Cookie` request headers and renders the
//! `Set-Cookie` values that issue or clear it. Attributes are always written
//! in the same order: `Path`, `Max-Age`, `HttpOnly`, `SameSite`, `Secure`.

use axum::http::{
    HeaderMap, HeaderValue,
    header::{COOKIE, InvalidHeaderValue},
};
use thiserror::Error;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("Cookie value contains characters outside the cookie-octet set")]
    InvalidValue,
    #[error("Cookie header is not valid: {0}")]
    InvalidHeader(String),
}

impl From<InvalidHeaderValue> for CookieError {
    fn from(err: InvalidHeaderValue) -> Self {
        CookieError::InvalidHeader(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    max_age_secs: u64,
    secure: bool,
    cleared: HeaderValue,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, max_age_days: u32, secure: bool) -> Result<Self, CookieError> {
        let name = name.into();
        let cleared = HeaderValue::from_str(&format!(
            "{}=; Path=/; Max-Age=0; Expires={}; HttpOnly; SameSite=Lax{}",
            name,
            EPOCH,
            if secure { "; Secure" } else { "" }
        ))?;

        Ok(SessionCookie {
            name,
            max_age_secs: u64::from(max_age_days) * SECONDS_PER_DAY,
            secure,
            cleared,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_age_secs(&self) -> u64 {
        self.max_age_secs
    }

    /// Value of the session cookie, if the request carries a non-empty one
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| key.trim() == self.name)
            .map(|(_, value)| value.trim().trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }

    /// `Set-Cookie` value storing `token` for the full session lifetime
    pub fn issue(&self, token: &str) -> Result<HeaderValue, CookieError> {
        if token.is_empty() || !token.bytes().all(is_cookie_octet) {
            return Err(CookieError::InvalidValue);
        }

        let value = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
            self.name,
            token,
            self.max_age_secs,
            if self.secure { "; Secure" } else { "" }
        );
        Ok(HeaderValue::from_str(&value)?)
    }

    /// `Set-Cookie` value that expires the session cookie immediately
    pub fn clear(&self) -> HeaderValue {
        self.cleared.clone()
    }
}

/// RFC 6265 cookie-octet
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
