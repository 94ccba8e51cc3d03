use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, require_non_negative, require_text};
use crate::values::{Money, TradeDate, percent_of, round2};

/// Unique identifier for a brokerage account
pub type AccountId = String;

/// A brokerage account tracked in the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub broker: String,
    /// cash, margin, ...
    pub account_type: String,
    pub currency: String,
    pub initial_balance: Money,
    pub current_balance: Money,
    pub is_active: bool,
    pub created_at: TradeDate,
}

impl Account {
    /// Open a new account; the current balance starts at the initial deposit
    pub fn open(
        id: impl Into<AccountId>,
        draft: AccountDraft,
        today: TradeDate,
    ) -> Result<Self, ValidationError> {
        let name = require_text("name", &draft.name)?;
        let initial_balance = require_non_negative("initialBalance", draft.initial_balance)?;
        let currency = match draft.currency.trim() {
            "" => DEFAULT_CURRENCY.to_string(),
            c => c.to_uppercase(),
        };

        Ok(Account {
            id: id.into(),
            name,
            broker: draft.broker.trim().to_string(),
            account_type: draft.account_type.trim().to_string(),
            currency,
            initial_balance,
            current_balance: initial_balance,
            is_active: true,
            created_at: today,
        })
    }

    /// Balance change since opening
    pub fn pnl(&self) -> Money {
        self.current_balance - self.initial_balance
    }

    /// Return since opening, in percent
    pub fn return_percent(&self) -> Money {
        round2(percent_of(self.pnl(), self.initial_balance))
    }
}

pub const DEFAULT_CURRENCY: &str = "USD";

/// Form input for opening an account
#[derive(Debug, Clone, Default)]
pub struct AccountDraft {
    pub name: String,
    pub broker: String,
    pub account_type: String,
    pub currency: String,
    pub initial_balance: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn today() -> TradeDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_open_account() {
        let draft = AccountDraft {
            name: "Swing".to_string(),
            broker: "Interactive Brokers".to_string(),
            account_type: "margin".to_string(),
            currency: String::new(),
            initial_balance: dec!(5000),
        };
        let account = Account::open("a1", draft, today()).unwrap();

        assert_eq!(account.current_balance, dec!(5000));
        assert_eq!(account.currency, "USD");
        assert!(account.is_active);
        assert_eq!(account.created_at, today());
    }

    #[test]
    fn test_open_account_requires_name() {
        let draft = AccountDraft {
            initial_balance: dec!(10),
            ..Default::default()
        };
        assert_eq!(
            Account::open("a1", draft, today()).unwrap_err(),
            ValidationError::Required("name")
        );
    }

    #[test]
    fn test_open_account_rejects_oversized_balance() {
        let draft = AccountDraft {
            name: "Main".to_string(),
            initial_balance: rust_decimal::Decimal::MAX,
            ..Default::default()
        };
        assert_eq!(
            Account::open("a1", draft, today()).unwrap_err(),
            ValidationError::OutOfRange { field: "initialBalance" }
        );
    }

    #[test]
    fn test_return_percent() {
        let mut account = Account::open(
            "a1",
            AccountDraft {
                name: "Main".to_string(),
                initial_balance: dec!(100000),
                ..Default::default()
            },
            today(),
        )
        .unwrap();
        account.current_balance = dec!(125430.50);

        assert_eq!(account.pnl(), dec!(25430.50));
        assert_eq!(account.return_percent(), dec!(25.43));
    }
}
