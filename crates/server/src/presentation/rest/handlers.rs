use axum::{
    Json,
    extract::{Query, State},
    http::Uri,
};
use std::sync::Arc;
use url::Url;

use crate::application::DashboardUseCase;
use crate::presentation::rest::{ApiError, CurrentUser, dto::*};

use super::AppState;

const SESSION_ENDPOINT: &str = "/api/auth/session";

/// Stand-in origin used to resolve post-login targets
const LOCAL_ORIGIN: &str = "http://journal.invalid/";

/// True for a path that stays on this site once a browser resolves it.
/// Browsers read `\` as `/`, so `/\host` is as off-site as `//host`.
fn same_site_path(target: &str) -> bool {
    if !target.starts_with('/') || target.contains('\\') {
        return false;
    }
    Url::parse(LOCAL_ORIGIN)
        .and_then(|base| Ok(base.join(target)?.origin() == base.origin()))
        .unwrap_or(false)
}

/// GET /api/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {})
}

/// GET /
pub async fn landing(State(state): State<Arc<AppState>>) -> Json<LandingPageResponse> {
    let features = vec![
        Feature {
            title: "Advanced Analytics",
            description: "Comprehensive performance metrics and insights to optimize your trading strategy",
        },
        Feature {
            title: "Portfolio Management",
            description: "Track multiple accounts and portfolios with real-time valuation and P&L",
        },
        Feature {
            title: "Risk Management",
            description: "Position sizing calculators and risk monitoring tools to protect your capital",
        },
        Feature {
            title: "Trade Journal",
            description: "Record entries, exits, costs and reasoning for every trade",
        },
    ];

    Json(LandingPageResponse {
        name: state.app_name.clone(),
        tagline: "Master your trading journey with a professional journal and analytics",
        features,
        login_path: state.policy.login_path().to_string(),
    })
}

/// GET /login
///
/// Reached only without a valid session; the route guard sends signed-in
/// users to the dashboard.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginQuery>,
) -> Json<LoginPageResponse> {
    let redirect_to = query
        .redirect_to
        .filter(|target| same_site_path(target))
        .unwrap_or_else(|| state.policy.home_path().to_string());

    Json(LoginPageResponse {
        title: "Sign in to your journal",
        sign_in_methods: vec!["password", "google.com"],
        session_endpoint: SESSION_ENDPOINT,
        redirect_to,
    })
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Json<DashboardResponse> {
    let use_case = DashboardUseCase::new(
        Arc::clone(&state.trade_repo),
        Arc::clone(&state.portfolio_repo),
        Arc::clone(&state.clock),
    );

    Json(use_case.overview(user).await.into())
}

/// Any unrouted path
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_site_path() {
        assert!(same_site_path("/trades"));
        assert!(same_site_path("/trades?status=open#top"));
        assert!(same_site_path("/"));
    }

    #[test]
    fn test_off_site_targets_rejected() {
        assert!(!same_site_path("//evil.example"));
        assert!(!same_site_path("/\\evil.example"));
        assert!(!same_site_path("/\\/evil.example"));
        assert!(!same_site_path("/\t/evil.example"));
        assert!(!same_site_path("https://evil.example/trades"));
        assert!(!same_site_path("trades"));
        assert!(!same_site_path(""));
    }
}
