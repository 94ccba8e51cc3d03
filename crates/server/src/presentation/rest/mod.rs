mod auth_handlers;
mod cookie;
mod dto;
mod error;
mod extract;
mod guard;
mod handlers;
mod journal_handlers;
mod router;

pub use cookie::{CookieError, SessionCookie};
pub use dto::*;
pub use error::ApiError;
pub use extract::CurrentUser;
pub use guard::{GuardDecision, RoutePolicy, route_guard};
pub use router::{AppState, create_router};
