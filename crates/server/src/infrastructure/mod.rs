pub mod clock;
pub mod config;
pub mod identity;
pub mod repositories;
pub mod seed;

pub use clock::FixedClock;
pub use config::{
    ConfigError, Environment, GuardConfig, GuardMode, IdentityConfig, JournalConfig,
    SessionConfig,
};
pub use identity::{DEFAULT_IDENTITY_ENDPOINT, FirebaseTokenVerifier, StaticTokenVerifier};
pub use repositories::{InMemoryPortfolioRepository, InMemoryTradeRepository};
