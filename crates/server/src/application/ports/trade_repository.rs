use async_trait::async_trait;
use ikigai_core::{Trade, TradeId};

/// Per-user trade journal storage
///
/// Trades keep their insertion order; `save` replaces a trade with the same id.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// All trades of an owner
    async fn list(&self, owner: &str) -> Vec<Trade>;

    /// Get a trade by ID
    async fn get(&self, owner: &str, id: &str) -> Option<Trade>;

    /// Save a trade (insert or update)
    async fn save(&self, owner: &str, trade: Trade);

    /// Remove a trade, returning it if it existed
    async fn remove(&self, owner: &str, id: &TradeId) -> Option<Trade>;
}
