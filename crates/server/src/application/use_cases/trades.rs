use ikigai_core::{Trade, TradeDraft, TradeStatus};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::JournalError;
use crate::application::ports::TradeRepository;

/// Status filter of the trades page (`all` or one status)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TradeStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: TradeStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl TryFrom<&str> for StatusFilter {
    type Error = &'static str;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "" => Ok(StatusFilter::All),
            v if v.eq_ignore_ascii_case("all") => Ok(StatusFilter::All),
            v => TradeStatus::try_from(v).map(StatusFilter::Only),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TradeQuery {
    pub search: Option<String>,
    pub status: StatusFilter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub open: usize,
    pub closed: usize,
    pub partial: usize,
}

#[derive(Debug, Clone)]
pub struct TradeListing {
    pub trades: Vec<Trade>,
    /// Size of the journal before filtering
    pub total: usize,
    /// Counts over the whole journal
    pub counts: StatusCounts,
}

/// Trade journal CRUD
pub struct ManageTradesUseCase<R>
where
    R: TradeRepository + ?Sized,
{
    repo: Arc<R>,
}

impl<R> ManageTradesUseCase<R>
where
    R: TradeRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner: &str, query: TradeQuery) -> TradeListing {
        let all = self.repo.list(owner).await;

        let mut counts = StatusCounts::default();
        for trade in &all {
            match trade.status {
                TradeStatus::Open => counts.open += 1,
                TradeStatus::Closed => counts.closed += 1,
                TradeStatus::Partial => counts.partial += 1,
            }
        }

        let total = all.len();
        let search = query.search.unwrap_or_default();
        let trades = all
            .into_iter()
            .filter(|t| t.matches_search(&search) && query.status.accepts(t.status))
            .collect();

        TradeListing {
            trades,
            total,
            counts,
        }
    }

    pub async fn get(&self, owner: &str, id: &str) -> Result<Trade, JournalError> {
        self.repo
            .get(owner, id)
            .await
            .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))
    }

    pub async fn record(&self, owner: &str, draft: TradeDraft) -> Result<Trade, JournalError> {
        let trade = Trade::from_draft(Uuid::new_v4().to_string(), draft)?;
        self.repo.save(owner, trade.clone()).await;

        tracing::info!(owner, trade_id = %trade.id, symbol = %trade.symbol, "Trade recorded");
        Ok(trade)
    }

    /// Replace every field of an existing trade; the id is kept
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        draft: TradeDraft,
    ) -> Result<Trade, JournalError> {
        let existing = self.get(owner, id).await?;
        let trade = Trade::from_draft(existing.id, draft)?;
        self.repo.save(owner, trade.clone()).await;

        tracing::info!(owner, trade_id = %trade.id, "Trade updated");
        Ok(trade)
    }

    pub async fn delete(&self, owner: &str, id: &str) -> Result<Trade, JournalError> {
        let removed = self
            .repo
            .remove(owner, &id.to_string())
            .await
            .ok_or_else(|| JournalError::TradeNotFound(id.to_string()))?;

        tracing::info!(owner, trade_id = %removed.id, "Trade deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryTradeRepository;
    use chrono::NaiveDate;
    use ikigai_core::{Direction, ValidationError};
    use rust_decimal_macros::dec;

    fn use_case() -> ManageTradesUseCase<InMemoryTradeRepository> {
        ManageTradesUseCase::new(Arc::new(InMemoryTradeRepository::seeded()))
    }

    fn draft(symbol: &str) -> TradeDraft {
        TradeDraft {
            symbol: symbol.to_string(),
            asset_class: "stock".to_string(),
            direction: Direction::Buy,
            quantity: dec!(10),
            entry_price: dec!(100),
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
            entry_reason: "technical".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::try_from("all"), Ok(StatusFilter::All));
        assert_eq!(StatusFilter::try_from(""), Ok(StatusFilter::All));
        assert_eq!(
            StatusFilter::try_from("Closed"),
            Ok(StatusFilter::Only(TradeStatus::Closed))
        );
        assert!(StatusFilter::try_from("pending").is_err());
    }

    #[tokio::test]
    async fn test_list_seeded_journal() {
        let listing = use_case().list("u1", TradeQuery::default()).await;
        assert_eq!(listing.total, 3);
        assert_eq!(
            listing.counts,
            StatusCounts {
                open: 1,
                closed: 2,
                partial: 0
            }
        );
    }

    #[tokio::test]
    async fn test_list_filters() {
        let uc = use_case();

        let listing = uc
            .list(
                "u1",
                TradeQuery {
                    search: Some("mean rev".to_string()),
                    status: StatusFilter::All,
                },
            )
            .await;
        assert_eq!(listing.trades.len(), 1);
        assert_eq!(listing.trades[0].symbol, "TSLA");

        let listing = uc
            .list(
                "u1",
                TradeQuery {
                    search: None,
                    status: StatusFilter::Only(TradeStatus::Open),
                },
            )
            .await;
        assert_eq!(listing.trades.len(), 1);
        assert_eq!(listing.trades[0].symbol, "NVDA");
    }

    #[tokio::test]
    async fn test_record_update_delete() {
        let uc = use_case();

        let trade = uc.record("u1", draft("MSFT")).await.unwrap();
        assert_eq!(uc.list("u1", TradeQuery::default()).await.total, 4);

        let mut edit = draft("MSFT");
        edit.exit_price = Some(dec!(110));
        edit.status = TradeStatus::Closed;
        let updated = uc.update("u1", &trade.id, edit).await.unwrap();
        assert_eq!(updated.id, trade.id);
        assert_eq!(updated.realized_pnl, Some(dec!(100)));

        uc.delete("u1", &trade.id).await.unwrap();
        assert_eq!(
            uc.get("u1", &trade.id).await,
            Err(JournalError::TradeNotFound(trade.id.clone()))
        );
    }

    #[tokio::test]
    async fn test_journals_are_per_owner() {
        let uc = use_case();
        uc.record("u1", draft("AMD")).await.unwrap();

        assert_eq!(uc.list("u1", TradeQuery::default()).await.total, 4);
        assert_eq!(uc.list("u2", TradeQuery::default()).await.total, 3);
    }

    #[tokio::test]
    async fn test_record_rejects_invalid_draft() {
        let err = use_case().record("u1", draft("")).await.unwrap_err();
        assert_eq!(
            err,
            JournalError::Validation(ValidationError::Required("symbol"))
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_trade() {
        assert!(matches!(
            use_case().delete("u1", "missing").await,
            Err(JournalError::TradeNotFound(_))
        ));
    }
}
