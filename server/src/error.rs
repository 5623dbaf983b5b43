//! Client-facing errors for the todo handlers.
//!
//! Every failure leaves the server as `{"detail": "..."}` with the status code
//! as the machine-readable signal. Not-found and validation problems are the
//! client's; store failures are logged and reported as a bare 500.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::models::ValidationError;
use crate::store::StoreError;

pub const NOT_FOUND_DETAIL: &str = "Todo item not found";
pub const INTERNAL_DETAIL: &str = "Internal server error";

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", NOT_FOUND_DETAIL)]
    NotFound,

    /// No route matches the request path.
    #[error("Not Found")]
    UnknownRoute,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An extractor refused the request before the handler ran.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            ApiError::Store(err) => {
                error!(error = %err, "todo store failure");
                INTERNAL_DETAIL.to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Rejected {
            status: client_status(rejection.status()),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected {
            status: client_status(rejection.status()),
            detail: rejection.body_text(),
        }
    }
}

/// Unparseable path and query values are reported as 422, like body fields.
fn client_status(status: StatusCode) -> StatusCode {
    if status.is_client_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_uses_fixed_detail() {
        let err = ApiError::NotFound;
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), NOT_FOUND_DETAIL);
    }

    #[test]
    fn routing_errors_keep_their_status() {
        assert_eq!(ApiError::UnknownRoute.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::UnknownRoute.to_string(), "Not Found");
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn validation_maps_to_422() {
        let err = ApiError::from(ValidationError::EmptyTitle);
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn store_errors_hide_driver_details() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_status_only_rewrites_4xx() {
        assert_eq!(
            client_status(StatusCode::BAD_REQUEST),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            client_status(StatusCode::INTERNAL_SERVER_ERROR),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
