use chrono::NaiveDate;
use ikigai_core::{
    Account, AccountDraft, Direction, Money, PerformanceReport, Portfolio, PortfolioDraft,
    PortfolioSummary, Position, SegmentStats, TimeRange, Trade, TradeDraft, TradeStatus,
    ValidationError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::str::FromStr;

use crate::application::{
    AnalyticsReport, DashboardOverview, DashboardStats, PortfolioOverview, StatusCounts,
    TradeListing,
};
use crate::domain::DecodedToken;

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        StatusResponse { status: "success" }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {}

// ============================================================================
// Session
// ============================================================================

/// Body of `POST /api/auth/session`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub is_authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<DecodedToken>,
}

impl SessionStatusResponse {
    pub fn authenticated(user: DecodedToken) -> Self {
        SessionStatusResponse {
            is_authenticated: true,
            user: Some(user),
        }
    }

    pub fn anonymous() -> Self {
        SessionStatusResponse {
            is_authenticated: false,
            user: None,
        }
    }
}

// ============================================================================
// Form field helpers
// ============================================================================

/// Number or numeric string; blank and null are absent
fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(de::Error::custom(format!("expected a number, got {}", other)));
        }
    };
    if text.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid number: {}", text)))
}

/// `YYYY-MM-DD`; blank and null are absent
fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid date (expected YYYY-MM-DD): {}", s))),
        _ => Ok(None),
    }
}

fn parse_choice<T>(field: &'static str, value: Option<&str>) -> Result<T, ValidationError>
where
    T: Default + for<'a> TryFrom<&'a str>,
{
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(T::default()),
        Some(v) => T::try_from(v).map_err(|_| ValidationError::InvalidValue {
            field,
            value: v.to_string(),
        }),
    }
}

// ============================================================================
// Trades
// ============================================================================

/// Add/edit trade form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeForm {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub asset_class: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub quantity: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub entry_price: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub exit_price: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_date")]
    pub entry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "optional_date")]
    pub exit_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub entry_reason: Option<String>,
    #[serde(default)]
    pub exit_reason: Option<String>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub commission: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub slippage: Option<Decimal>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub unrealized_pnl: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub realized_pnl: Option<Decimal>,
}

impl TradeForm {
    /// Form defaults: stock, buy, open, zero costs
    pub fn into_draft(self) -> Result<TradeDraft, ValidationError> {
        let direction: Direction = parse_choice("direction", self.direction.as_deref())?;
        let status: TradeStatus = parse_choice("status", self.status.as_deref())?;
        let entry_date = self.entry_date.ok_or(ValidationError::Required("entryDate"))?;

        Ok(TradeDraft {
            symbol: self.symbol.trim().to_uppercase(),
            asset_class: self
                .asset_class
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "stock".to_string()),
            direction,
            quantity: self.quantity.unwrap_or_default(),
            entry_price: self.entry_price.unwrap_or_default(),
            exit_price: self.exit_price,
            entry_date,
            exit_date: self.exit_date,
            status,
            entry_reason: self.entry_reason.unwrap_or_default(),
            exit_reason: self.exit_reason,
            strategy: self.strategy,
            notes: self.notes,
            commission: self.commission.unwrap_or_default(),
            slippage: self.slippage.unwrap_or_default(),
            tags: self.tags,
            unrealized_pnl: self.unrealized_pnl,
            realized_pnl: self.realized_pnl,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TradeListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Trade with its headline P&L
#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    #[serde(flatten)]
    pub trade: Trade,
    pub pnl: Money,
}

impl From<Trade> for TradeView {
    fn from(trade: Trade) -> Self {
        TradeView {
            pnl: trade.pnl(),
            trade,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCountsResponse {
    pub open: usize,
    pub closed: usize,
    pub partial: usize,
}

impl From<StatusCounts> for StatusCountsResponse {
    fn from(counts: StatusCounts) -> Self {
        StatusCountsResponse {
            open: counts.open,
            closed: counts.closed,
            partial: counts.partial,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TradeListResponse {
    pub trades: Vec<TradeView>,
    pub total: usize,
    pub counts: StatusCountsResponse,
}

impl From<TradeListing> for TradeListResponse {
    fn from(listing: TradeListing) -> Self {
        TradeListResponse {
            trades: listing.trades.into_iter().map(TradeView::from).collect(),
            total: listing.total,
            counts: listing.counts.into(),
        }
    }
}

// ============================================================================
// Portfolio
// ============================================================================

/// Add account form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub broker: String,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub currency: String,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub initial_balance: Option<Decimal>,
}

impl From<AccountForm> for AccountDraft {
    fn from(form: AccountForm) -> Self {
        AccountDraft {
            name: form.name,
            broker: form.broker,
            account_type: form
                .account_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "cash".to_string()),
            currency: form.currency,
            initial_balance: form.initial_balance.unwrap_or_default(),
        }
    }
}

/// Create portfolio form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub initial_value: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub target_return: Option<Decimal>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub max_drawdown: Option<Decimal>,
    #[serde(default)]
    pub account_id: Option<String>,
}

impl From<PortfolioForm> for PortfolioDraft {
    fn from(form: PortfolioForm) -> Self {
        PortfolioDraft {
            name: form.name,
            description: form.description,
            initial_value: form.initial_value.unwrap_or_default(),
            target_return: form.target_return,
            max_drawdown: form.max_drawdown,
            account_id: form.account_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    #[serde(flatten)]
    pub account: Account,
    pub pnl: Money,
    pub return_percent: Decimal,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        AccountView {
            pnl: account.pnl(),
            return_percent: account.return_percent(),
            account,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    #[serde(flatten)]
    pub portfolio: Portfolio,
    pub return_percent: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_progress: Option<Decimal>,
}

impl From<Portfolio> for PortfolioView {
    fn from(portfolio: Portfolio) -> Self {
        PortfolioView {
            return_percent: portfolio.return_percent(),
            target_progress: portfolio.target_progress(),
            portfolio,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionView {
    #[serde(flatten)]
    pub position: Position,
    pub market_value: Money,
    pub unrealized_pnl: Money,
    pub unrealized_pnl_percent: Decimal,
}

impl From<Position> for PositionView {
    fn from(position: Position) -> Self {
        PositionView {
            market_value: position.market_value(),
            unrealized_pnl: position.unrealized_pnl(),
            unrealized_pnl_percent: position.unrealized_pnl_percent(),
            position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioResponse {
    pub accounts: Vec<AccountView>,
    pub portfolios: Vec<PortfolioView>,
    pub positions: Vec<PositionView>,
    pub summary: PortfolioSummary,
}

impl From<PortfolioOverview> for PortfolioResponse {
    fn from(overview: PortfolioOverview) -> Self {
        PortfolioResponse {
            accounts: overview.accounts.into_iter().map(AccountView::from).collect(),
            portfolios: overview
                .portfolios
                .into_iter()
                .map(PortfolioView::from)
                .collect(),
            positions: overview
                .positions
                .into_iter()
                .map(PositionView::from)
                .collect(),
            summary: overview.summary,
        }
    }
}

// ============================================================================
// Analytics
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub range: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub range: TimeRange,
    pub performance: PerformanceReport,
    pub by_asset_class: Vec<SegmentStats>,
    pub by_strategy: Vec<SegmentStats>,
}

impl From<AnalyticsReport> for AnalyticsResponse {
    fn from(report: AnalyticsReport) -> Self {
        AnalyticsResponse {
            range: report.range,
            performance: report.performance,
            by_asset_class: report.by_asset_class,
            by_strategy: report.by_strategy,
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub uid: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl From<&DecodedToken> for UserView {
    fn from(user: &DecodedToken) -> Self {
        UserView {
            uid: user.uid.clone(),
            display_name: user.display_name().to_string(),
            email: user.email.clone(),
            picture: user.picture.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub total_value: Money,
    pub daily_pnl: Money,
    pub daily_pnl_percent: Decimal,
    pub total_trades: usize,
    pub win_rate: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<Decimal>,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(stats: DashboardStats) -> Self {
        DashboardStatsResponse {
            total_value: stats.total_value,
            daily_pnl: stats.daily_pnl,
            daily_pnl_percent: stats.daily_pnl_percent,
            total_trades: stats.total_trades,
            win_rate: stats.win_rate,
            sharpe_ratio: stats.sharpe_ratio,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: UserView,
    pub stats: DashboardStatsResponse,
    pub recent_trades: Vec<TradeView>,
}

impl From<DashboardOverview> for DashboardResponse {
    fn from(overview: DashboardOverview) -> Self {
        DashboardResponse {
            user: UserView::from(&overview.user),
            stats: overview.stats.into(),
            recent_trades: overview
                .recent_trades
                .into_iter()
                .map(TradeView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageResponse {
    pub title: &'static str,
    pub sign_in_methods: Vec<&'static str>,
    pub session_endpoint: &'static str,
    /// Where to go once the session cookie is set
    pub redirect_to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageResponse {
    pub name: String,
    pub tagline: &'static str,
    pub features: Vec<Feature>,
    pub login_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_form_accepts_strings_and_numbers() {
        let form: TradeForm = serde_json::from_str(
            r#"{
                "symbol": " msft ",
                "quantity": "10",
                "entryPrice": 412.5,
                "exitPrice": "",
                "entryDate": "2024-02-01",
                "exitDate": "",
                "direction": "sell",
                "commission": "1.25",
                "strategy": ""
            }"#,
        )
        .unwrap();
        assert_eq!(form.quantity, Some(dec!(10)));
        assert_eq!(form.entry_price, Some(dec!(412.5)));
        assert_eq!(form.exit_price, None);
        assert_eq!(form.exit_date, None);

        let draft = form.into_draft().unwrap();
        assert_eq!(draft.symbol, "MSFT");
        assert_eq!(draft.asset_class, "stock");
        assert_eq!(draft.direction, Direction::Sell);
        assert_eq!(draft.status, TradeStatus::Open);
        assert_eq!(draft.commission, dec!(1.25));
        assert_eq!(draft.slippage, Decimal::ZERO);
    }

    #[test]
    fn test_trade_form_rejects_bad_values() {
        let result: Result<TradeForm, _> = serde_json::from_str(r#"{ "quantity": "ten" }"#);
        assert!(result.is_err());

        let result: Result<TradeForm, _> = serde_json::from_str(r#"{ "entryDate": "01/02/2024" }"#);
        assert!(result.is_err());

        let form = TradeForm {
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            direction: Some("sideways".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            form.into_draft(),
            Err(ValidationError::InvalidValue { field: "direction", .. })
        ));

        assert_eq!(
            TradeForm::default().into_draft().unwrap_err(),
            ValidationError::Required("entryDate")
        );
    }

    #[test]
    fn test_session_status_shape() {
        let json = serde_json::to_value(SessionStatusResponse::anonymous()).unwrap();
        assert_eq!(json, serde_json::json!({ "isAuthenticated": false }));

        let json =
            serde_json::to_value(SessionStatusResponse::authenticated(DecodedToken::new("u1")))
                .unwrap();
        assert_eq!(json["isAuthenticated"], true);
        assert_eq!(json["user"]["uid"], "u1");
    }
}
