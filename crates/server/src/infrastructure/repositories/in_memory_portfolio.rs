use crate::application::ports::PortfolioRepository;
use crate::infrastructure::seed;
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use ikigai_core::{Account, Portfolio, Position};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct PortfolioBook {
    accounts: Vec<Account>,
    portfolios: Vec<Portfolio>,
    positions: Vec<Position>,
}

impl PortfolioBook {
    fn demo() -> Self {
        PortfolioBook {
            accounts: seed::demo_accounts(),
            portfolios: seed::demo_portfolios(),
            positions: seed::demo_positions(),
        }
    }
}

/// In-memory accounts, portfolios and positions, keyed by owner
pub struct InMemoryPortfolioRepository {
    books: Arc<DashMap<String, PortfolioBook>>,
    seed_demo_data: bool,
}

impl InMemoryPortfolioRepository {
    pub fn new() -> Self {
        Self::with_seed(false)
    }

    pub fn seeded() -> Self {
        Self::with_seed(true)
    }

    pub fn with_seed(seed_demo_data: bool) -> Self {
        Self {
            books: Arc::new(DashMap::new()),
            seed_demo_data,
        }
    }

    fn book(&self, owner: &str) -> RefMut<'_, String, PortfolioBook> {
        self.books.entry(owner.to_string()).or_insert_with(|| {
            if self.seed_demo_data {
                PortfolioBook::demo()
            } else {
                PortfolioBook::default()
            }
        })
    }
}

impl Default for InMemoryPortfolioRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryPortfolioRepository {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
            seed_demo_data: self.seed_demo_data,
        }
    }
}

#[async_trait]
impl PortfolioRepository for InMemoryPortfolioRepository {
    async fn accounts(&self, owner: &str) -> Vec<Account> {
        self.book(owner).accounts.clone()
    }

    async fn account(&self, owner: &str, id: &str) -> Option<Account> {
        self.book(owner).accounts.iter().find(|a| a.id == id).cloned()
    }

    async fn save_account(&self, owner: &str, account: Account) {
        let mut book = self.book(owner);
        match book.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => book.accounts.push(account),
        }
    }

    async fn portfolios(&self, owner: &str) -> Vec<Portfolio> {
        self.book(owner).portfolios.clone()
    }

    async fn save_portfolio(&self, owner: &str, portfolio: Portfolio) {
        let mut book = self.book(owner);
        match book.portfolios.iter_mut().find(|p| p.id == portfolio.id) {
            Some(existing) => *existing = portfolio,
            None => book.portfolios.push(portfolio),
        }
    }

    async fn positions(&self, owner: &str) -> Vec<Position> {
        self.book(owner).positions.clone()
    }
}
