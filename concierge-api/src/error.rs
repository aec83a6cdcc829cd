use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use concierge_accounts::AccountError;
use concierge_booking::BookingError;
use concierge_catalog::ListingError;
use concierge_core::CoreError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => {
                tracing::debug!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PermissionDenied { .. } => AppError::AuthorizationError(err.to_string()),
            CoreError::ValidationError(_) => AppError::ValidationError(err.to_string()),
            CoreError::UnknownRole(_) => AppError::AuthenticationError(err.to_string()),
        }
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Core(core) => core.into(),
            BookingError::NotFound(_) | BookingError::ItemNotFound { .. } => {
                AppError::NotFoundError(err.to_string())
            }
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Core(core) => core.into(),
            ListingError::NotFound(_) | ListingError::CatalogEntryNotFound(_) => {
                AppError::NotFoundError(err.to_string())
            }
            ListingError::Invalid(_) | ListingError::InvalidRange { .. } => {
                AppError::ValidationError(err.to_string())
            }
            ListingError::SourceLocked { .. } | ListingError::AlreadyImported(_) => {
                AppError::ConflictError(err.to_string())
            }
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Core(core) => core.into(),
            AccountError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            AccountError::InvalidTransition { .. } => AppError::ConflictError(err.to_string()),
        }
    }
}
