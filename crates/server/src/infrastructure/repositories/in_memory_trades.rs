use crate::application::ports::TradeRepository;
use crate::infrastructure::seed;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use ikigai_core::{Trade, TradeId};
use std::sync::Arc;

/// In-memory trade journals
///
/// Thread-safe storage keyed by owner (provider uid) using DashMap.
/// Nothing is persisted; a journal is created on first access, optionally
/// pre-filled with the demo trades.
pub struct InMemoryTradeRepository {
    journals: Arc<DashMap<String, Vec<Trade>>>,
    seed_demo_data: bool,
}

impl InMemoryTradeRepository {
    /// Empty journals
    pub fn new() -> Self {
        Self::with_seed(false)
    }

    /// Journals start with the demo trades
    pub fn seeded() -> Self {
        Self::with_seed(true)
    }

    pub fn with_seed(seed_demo_data: bool) -> Self {
        Self {
            journals: Arc::new(DashMap::new()),
            seed_demo_data,
        }
    }

    fn journal(&self, owner: &str) -> RefMut<'_, String, Vec<Trade>> {
        self.journals.entry(owner.to_string()).or_insert_with(|| {
            if self.seed_demo_data {
                seed::demo_trades()
            } else {
                Vec::new()
            }
        })
    }
}

impl Default for InMemoryTradeRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryTradeRepository {
    fn clone(&self) -> Self {
        Self {
            journals: Arc::clone(&self.journals),
            seed_demo_data: self.seed_demo_data,
        }
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn list(&self, owner: &str) -> Vec<Trade> {
        self.journal(owner).value().clone()
    }

    async fn get(&self, owner: &str, id: &str) -> Option<Trade> {
        self.journal(owner).iter().find(|t| t.id == id).cloned()
    }

    async fn save(&self, owner: &str, trade: Trade) {
        let mut journal = self.journal(owner);
        match journal.iter_mut().find(|t| t.id == trade.id) {
            Some(existing) => *existing = trade,
            None => journal.push(trade),
        }
    }

    async fn remove(&self, owner: &str, id: &TradeId) -> Option<Trade> {
        let mut journal = self.journal(owner);
        let index = journal.iter().position(|t| &t.id == id)?;
        Some(journal.remove(index))
    }
}
