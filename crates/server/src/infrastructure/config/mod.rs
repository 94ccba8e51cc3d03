//! Configuration loading for the journal server
//!
//! Supports JSON configuration files for:
//! - Server binding and runtime environment
//! - Session cookie attributes
//! - Route guard policy (protected prefixes, login path)
//! - Identity provider selection (hosted lookup or a static token table)
//!
//! Every field has a default, so `{}` is a valid file. Environment variables
//! override the file (see [`JournalConfig::apply_env`]).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::infrastructure::identity::DEFAULT_IDENTITY_ENDPOINT;

/// Cookie name used by the server-verified session
pub const SESSION_COOKIE_NAME: &str = "__session";
/// Cookie name of the earlier client-token variant
pub const LEGACY_COOKIE_NAME: &str = "firebaseIdToken";
pub const SESSION_DURATION_DAYS: u32 = 14;

/// Root configuration for the journal server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub guard: GuardConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    /// Pre-fill every new journal with the demo trades, accounts and positions
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

fn default_app_name() -> String {
    "Ikigai Journal".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            environment: Environment::default(),
            server: ServerConfig::default(),
            session: SessionConfig::default(),
            guard: GuardConfig::default(),
            identity: IdentityConfig::default(),
            seed_demo_data: true,
        }
    }
}

impl JournalConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply `HOST`, `PORT`, `APP_ENV`, `SESSION_COOKIE_NAME` and `IDENTITY_API_KEY`
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key/value source
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a port number: {}", port)))?;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.environment = Environment::try_from(env.as_str())
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if let Some(name) = lookup("SESSION_COOKIE_NAME") {
            self.session.cookie_name = name;
        }
        if let Some(key) = lookup("IDENTITY_API_KEY") {
            if let IdentityConfig::Firebase { api_key, .. } = &mut self.identity {
                *api_key = key;
            }
        }
        Ok(())
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cookie = &self.session.cookie_name;
        if cookie.is_empty() || !cookie.chars().all(is_cookie_name_char) {
            return Err(ConfigError::Invalid(format!(
                "session.cookie_name is not a valid cookie name: '{}'",
                cookie
            )));
        }
        if self.session.max_age_days == 0 {
            return Err(ConfigError::Invalid(
                "session.max_age_days must be at least 1".to_string(),
            ));
        }

        let paths = std::iter::once(&self.guard.login_path)
            .chain(std::iter::once(&self.guard.home_path))
            .chain(self.guard.protected_prefixes.iter());
        for path in paths {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "guard paths must start with '/': '{}'",
                    path
                )));
            }
        }

        if let IdentityConfig::Firebase { api_key, .. } = &self.identity {
            if api_key.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "identity.api_key is required (or set IDENTITY_API_KEY)".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Whether the session cookie carries the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.session
            .secure
            .unwrap_or(self.environment == Environment::Production)
    }
}

/// RFC 6265 token characters
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl TryFrom<&str> for Environment {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err("APP_ENV must be development or production"),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Session cookie attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,
    /// `Secure` attribute; defaults to on in production
    #[serde(default)]
    pub secure: Option<bool>,
}

fn default_cookie_name() -> String {
    SESSION_COOKIE_NAME.to_string()
}

fn default_max_age_days() -> u32 {
    SESSION_DURATION_DAYS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
            secure: None,
        }
    }
}

/// How the route guard decides a request is authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// The cookie must verify with the identity provider
    #[default]
    Verified,
    /// Any non-empty cookie counts
    Presence,
}

/// Route guard policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardConfig {
    #[serde(default)]
    pub mode: GuardMode,
    #[serde(default = "default_protected_prefixes")]
    pub protected_prefixes: Vec<String>,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Where authenticated visitors of the login page are sent
    #[serde(default = "default_home_path")]
    pub home_path: String,
}

fn default_protected_prefixes() -> Vec<String> {
    ["/dashboard", "/portfolio", "/trades", "/analytics"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_home_path() -> String {
    "/dashboard".to_string()
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            mode: GuardMode::default(),
            protected_prefixes: default_protected_prefixes(),
            login_path: default_login_path(),
            home_path: default_home_path(),
        }
    }
}

/// Identity provider selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum IdentityConfig {
    /// Hosted provider, verified through its account lookup API
    Firebase {
        #[serde(default)]
        api_key: String,
        #[serde(default = "default_identity_endpoint")]
        endpoint: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// Fixed token table (development and tests)
    Static {
        #[serde(default)]
        tokens: Vec<StaticTokenConfig>,
    },
}

fn default_identity_endpoint() -> String {
    DEFAULT_IDENTITY_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig::Firebase {
            api_key: String::new(),
            endpoint: default_identity_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// One entry of the static token table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticTokenConfig {
    pub token: String,
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
