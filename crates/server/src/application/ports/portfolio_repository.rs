use async_trait::async_trait;
use ikigai_core::{Account, Portfolio, Position};

/// Per-user accounts, portfolios and positions
#[async_trait]
pub trait PortfolioRepository: Send + Sync {
    async fn accounts(&self, owner: &str) -> Vec<Account>;

    async fn account(&self, owner: &str, id: &str) -> Option<Account>;

    async fn save_account(&self, owner: &str, account: Account);

    async fn portfolios(&self, owner: &str) -> Vec<Portfolio>;

    async fn save_portfolio(&self, owner: &str, portfolio: Portfolio);

    async fn positions(&self, owner: &str) -> Vec<Position>;
}
