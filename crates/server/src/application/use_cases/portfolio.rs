use ikigai_core::analytics::summarize_portfolio;
use ikigai_core::{
    Account, AccountDraft, Portfolio, PortfolioDraft, PortfolioSummary, Position,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::JournalError;
use crate::application::ports::PortfolioRepository;
use crate::domain::Clock;

#[derive(Debug, Clone)]
pub struct PortfolioOverview {
    pub accounts: Vec<Account>,
    pub portfolios: Vec<Portfolio>,
    pub positions: Vec<Position>,
    pub summary: PortfolioSummary,
}

/// Accounts, portfolios and the portfolio page summary
pub struct ManagePortfolioUseCase<R>
where
    R: PortfolioRepository + ?Sized,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> ManagePortfolioUseCase<R>
where
    R: PortfolioRepository + ?Sized,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn overview(&self, owner: &str) -> PortfolioOverview {
        let accounts = self.repo.accounts(owner).await;
        let portfolios = self.repo.portfolios(owner).await;
        let positions = self.repo.positions(owner).await;
        let summary = summarize_portfolio(&accounts, &positions);

        PortfolioOverview {
            accounts,
            portfolios,
            positions,
            summary,
        }
    }

    pub async fn open_account(
        &self,
        owner: &str,
        draft: AccountDraft,
    ) -> Result<Account, JournalError> {
        let account = Account::open(Uuid::new_v4().to_string(), draft, self.clock.today())?;
        self.repo.save_account(owner, account.clone()).await;

        tracing::info!(owner, account_id = %account.id, broker = %account.broker, "Account added");
        Ok(account)
    }

    /// Create a portfolio; a linked account must already exist
    pub async fn create_portfolio(
        &self,
        owner: &str,
        draft: PortfolioDraft,
    ) -> Result<Portfolio, JournalError> {
        let portfolio =
            Portfolio::create(Uuid::new_v4().to_string(), draft, self.clock.today())?;

        if let Some(account_id) = &portfolio.account_id {
            if self.repo.account(owner, account_id).await.is_none() {
                return Err(JournalError::AccountNotFound(account_id.clone()));
            }
        }

        self.repo.save_portfolio(owner, portfolio.clone()).await;

        tracing::info!(owner, portfolio_id = %portfolio.id, "Portfolio added");
        Ok(portfolio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{FixedClock, InMemoryPortfolioRepository};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn use_case() -> ManagePortfolioUseCase<InMemoryPortfolioRepository> {
        ManagePortfolioUseCase::new(
            Arc::new(InMemoryPortfolioRepository::seeded()),
            Arc::new(FixedClock::on(today())),
        )
    }

    #[tokio::test]
    async fn test_seeded_overview() {
        let overview = use_case().overview("u1").await;

        assert_eq!(overview.accounts.len(), 2);
        assert_eq!(overview.portfolios.len(), 2);
        assert_eq!(overview.positions.len(), 4);
        assert_eq!(overview.summary.total_value, dec!(156681.25));
        assert_eq!(overview.summary.total_unrealized_pnl, dec!(3850));
    }

    #[tokio::test]
    async fn test_open_account_uses_clock_date() {
        let uc = use_case();
        let account = uc
            .open_account(
                "u1",
                AccountDraft {
                    name: "Options".to_string(),
                    broker: "Tastytrade".to_string(),
                    account_type: "margin".to_string(),
                    currency: "usd".to_string(),
                    initial_balance: dec!(10000),
                },
            )
            .await
            .unwrap();

        assert_eq!(account.created_at, today());
        assert_eq!(account.currency, "USD");
        assert_eq!(uc.overview("u1").await.accounts.len(), 3);
    }

    #[tokio::test]
    async fn test_portfolio_requires_known_account() {
        let uc = use_case();
        let draft = PortfolioDraft {
            name: "Income".to_string(),
            initial_value: dec!(20000),
            account_id: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(
            uc.create_portfolio("u1", draft).await,
            Err(JournalError::AccountNotFound("nope".to_string()))
        );

        let draft = PortfolioDraft {
            name: "Income".to_string(),
            initial_value: dec!(20000),
            account_id: Some("1".to_string()),
            ..Default::default()
        };
        let portfolio = uc.create_portfolio("u1", draft).await.unwrap();
        assert_eq!(portfolio.created_at, today());
        assert_eq!(uc.overview("u1").await.portfolios.len(), 3);
    }
}
