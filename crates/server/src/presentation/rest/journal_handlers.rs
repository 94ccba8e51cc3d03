//! Trades, portfolio and analytics pages
//!
//! Every handler here takes [`CurrentUser`]; the journal is keyed by the
//! provider uid.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use ikigai_core::TimeRange;
use std::sync::Arc;

use crate::application::{
    AnalyticsUseCase, ManagePortfolioUseCase, ManageTradesUseCase, StatusFilter, TradeQuery,
};
use crate::infrastructure::{InMemoryPortfolioRepository, InMemoryTradeRepository};
use crate::presentation::rest::{ApiError, CurrentUser, dto::*};

use super::AppState;

fn trades(state: &AppState) -> ManageTradesUseCase<InMemoryTradeRepository> {
    ManageTradesUseCase::new(Arc::clone(&state.trade_repo))
}

fn portfolio(state: &AppState) -> ManagePortfolioUseCase<InMemoryPortfolioRepository> {
    ManagePortfolioUseCase::new(Arc::clone(&state.portfolio_repo), Arc::clone(&state.clock))
}

// ============================================================================
// Trades
// ============================================================================

/// GET /trades
pub async fn list_trades(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<TradeListQuery>,
) -> Result<Json<TradeListResponse>, ApiError> {
    let status = match query.status.as_deref() {
        Some(s) => StatusFilter::try_from(s).map_err(|e| ApiError::invalid_parameter("status", e))?,
        None => StatusFilter::All,
    };

    let listing = trades(&state)
        .list(
            &user.uid,
            TradeQuery {
                search: query.search,
                status,
            },
        )
        .await;

    Ok(Json(listing.into()))
}

/// GET /trades/{id}
pub async fn get_trade(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<TradeView>, ApiError> {
    let trade = trades(&state).get(&user.uid, &id).await?;
    Ok(Json(trade.into()))
}

/// POST /trades
pub async fn create_trade(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<TradeForm>, JsonRejection>,
) -> Result<(StatusCode, Json<TradeView>), ApiError> {
    let Json(form) = payload?;
    let draft = form
        .into_draft()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let trade = trades(&state).record(&user.uid, draft).await?;
    Ok((StatusCode::CREATED, Json(trade.into())))
}

/// PUT /trades/{id}
pub async fn update_trade(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    payload: Result<Json<TradeForm>, JsonRejection>,
) -> Result<Json<TradeView>, ApiError> {
    let Json(form) = payload?;
    let draft = form
        .into_draft()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let trade = trades(&state).update(&user.uid, &id, draft).await?;
    Ok(Json(trade.into()))
}

/// DELETE /trades/{id}
pub async fn delete_trade(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    trades(&state).delete(&user.uid, &id).await?;
    Ok(Json(StatusResponse::success()))
}

// ============================================================================
// Portfolio
// ============================================================================

/// GET /portfolio
pub async fn portfolio_overview(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Json<PortfolioResponse> {
    Json(portfolio(&state).overview(&user.uid).await.into())
}

/// POST /portfolio/accounts
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<AccountForm>, JsonRejection>,
) -> Result<(StatusCode, Json<AccountView>), ApiError> {
    let Json(form) = payload?;
    let account = portfolio(&state)
        .open_account(&user.uid, form.into())
        .await?;
    Ok((StatusCode::CREATED, Json(account.into())))
}

/// POST /portfolio/portfolios
pub async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<PortfolioForm>, JsonRejection>,
) -> Result<(StatusCode, Json<PortfolioView>), ApiError> {
    let Json(form) = payload?;
    let created = portfolio(&state)
        .create_portfolio(&user.uid, form.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

// ============================================================================
// Analytics
// ============================================================================

/// GET /analytics
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, ApiError> {
    let range = match query.range.as_deref() {
        Some(r) => TimeRange::try_from(r).map_err(|e| ApiError::invalid_parameter("range", e))?,
        None => TimeRange::All,
    };

    let use_case = AnalyticsUseCase::new(Arc::clone(&state.trade_repo), Arc::clone(&state.clock));
    let report = use_case.report(&user.uid, range).await;

    Ok(Json(report.into()))
}
