use serde::{Deserialize, Serialize};

use super::AccountId;
use crate::error::{
    ValidationError, optional_text, require_non_negative, require_text, require_within,
};
use crate::values::{Money, TradeDate, percent_of, round2};

/// Unique identifier for a portfolio
pub type PortfolioId = String;

/// A named allocation with its own performance targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: PortfolioId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub initial_value: Money,
    pub current_value: Money,
    /// Target return, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_return: Option<Money>,
    /// Tolerated drawdown, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_drawdown: Option<Money>,
    pub is_active: bool,
    pub created_at: TradeDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
}

impl Portfolio {
    pub fn create(
        id: impl Into<PortfolioId>,
        draft: PortfolioDraft,
        today: TradeDate,
    ) -> Result<Self, ValidationError> {
        let name = require_text("name", &draft.name)?;
        let initial_value = require_non_negative("initialValue", draft.initial_value)?;
        let max_drawdown = draft
            .max_drawdown
            .map(|d| require_non_negative("maxDrawdown", d))
            .transpose()?;
        let target_return = draft
            .target_return
            .map(|t| require_within("targetReturn", t))
            .transpose()?;

        Ok(Portfolio {
            id: id.into(),
            name,
            description: optional_text(draft.description),
            initial_value,
            current_value: initial_value,
            target_return,
            max_drawdown,
            is_active: true,
            created_at: today,
            account_id: optional_text(draft.account_id),
        })
    }

    pub fn return_percent(&self) -> Money {
        round2(percent_of(
            self.current_value - self.initial_value,
            self.initial_value,
        ))
    }

    /// Progress towards the target return, percent (None without a target)
    pub fn target_progress(&self) -> Option<Money> {
        self.target_return
            .map(|target| round2(percent_of(self.return_percent(), target)))
    }
}

/// Form input for creating a portfolio
#[derive(Debug, Clone, Default)]
pub struct PortfolioDraft {
    pub name: String,
    pub description: Option<String>,
    pub initial_value: Money,
    pub target_return: Option<Money>,
    pub max_drawdown: Option<Money>,
    pub account_id: Option<AccountId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_portfolio() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let draft = PortfolioDraft {
            name: "Growth".to_string(),
            description: Some(" ".to_string()),
            initial_value: dec!(75000),
            target_return: Some(dec!(25)),
            max_drawdown: Some(dec!(15)),
            account_id: Some("1".to_string()),
        };
        let portfolio = Portfolio::create("p1", draft, today).unwrap();

        assert_eq!(portfolio.current_value, dec!(75000));
        assert_eq!(portfolio.description, None);
        assert_eq!(portfolio.account_id.as_deref(), Some("1"));
        assert_eq!(portfolio.return_percent(), dec!(0));
    }

    #[test]
    fn test_create_portfolio_rejects_oversized_values() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let draft = PortfolioDraft {
            name: "Growth".to_string(),
            initial_value: rust_decimal::Decimal::MAX,
            ..Default::default()
        };
        assert_eq!(
            Portfolio::create("p1", draft, today).unwrap_err(),
            ValidationError::OutOfRange { field: "initialValue" }
        );

        let draft = PortfolioDraft {
            name: "Growth".to_string(),
            initial_value: dec!(1000),
            target_return: Some(rust_decimal::Decimal::MIN),
            ..Default::default()
        };
        assert_eq!(
            Portfolio::create("p1", draft, today).unwrap_err(),
            ValidationError::OutOfRange { field: "targetReturn" }
        );
    }

    #[test]
    fn test_target_progress() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut portfolio = Portfolio::create(
            "p1",
            PortfolioDraft {
                name: "Growth".to_string(),
                initial_value: dec!(75000),
                target_return: Some(dec!(25)),
                ..Default::default()
            },
            today,
        )
        .unwrap();
        portfolio.current_value = dec!(95420.25);

        assert_eq!(portfolio.return_percent(), dec!(27.23));
        assert_eq!(portfolio.target_progress(), Some(dec!(108.92)));
    }
}
