use crate::application::{JournalError, SessionError};
use crate::presentation::rest::dto::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(param: &str, reason: &str) -> Self {
        Self::bad_request(format!("Illegal parameter '{}': {}", param, reason))
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::MissingToken => ApiError::bad_request("Token is required"),
            SessionError::NoSession | SessionError::InvalidToken(_) => {
                ApiError::unauthorized("Invalid token")
            }
            // Provider detail stays in the logs
            SessionError::ProviderUnavailable(_) => ApiError::internal("Internal Server Error"),
        }
    }
}

impl From<JournalError> for ApiError {
    fn from(err: JournalError) -> Self {
        match err {
            JournalError::Validation(e) => ApiError::bad_request(e.to_string()),
            JournalError::TradeNotFound(_) | JournalError::AccountNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikigai_core::ValidationError;

    #[test]
    fn test_session_error_mapping() {
        let err = ApiError::from(SessionError::MissingToken);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Token is required");

        let err = ApiError::from(SessionError::InvalidToken("TOKEN_EXPIRED".to_string()));
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "Invalid token");

        let err = ApiError::from(SessionError::ProviderUnavailable("timeout".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal Server Error");
    }

    #[test]
    fn test_journal_error_mapping() {
        let err = ApiError::from(JournalError::TradeNotFound("42".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = ApiError::from(JournalError::Validation(ValidationError::Required("symbol")));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Field 'symbol' is required");
    }
}
