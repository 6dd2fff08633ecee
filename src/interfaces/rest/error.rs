use crate::error::PaymentError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// Boundary wrapper translating domain errors into HTTP responses.
///
/// This is the only place in the crate that maps error kinds to status
/// codes.
#[derive(Debug)]
pub struct ApiError(pub PaymentError);

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::DuplicateReference(_)
            | PaymentError::InvalidTransition { .. }
            | PaymentError::StaleVersion(_) => StatusCode::CONFLICT,
            PaymentError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorResponse {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown")
                .to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;

    #[test]
    fn test_error_kinds_map_to_expected_codes() {
        let cases = [
            (
                PaymentError::Validation("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (PaymentError::NotFound(1), StatusCode::NOT_FOUND),
            (
                PaymentError::DuplicateReference("PAY-1".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                PaymentError::InvalidTransition {
                    from: PaymentStatus::Approved,
                    to: PaymentStatus::Rejected,
                },
                StatusCode::CONFLICT,
            ),
            (PaymentError::StaleVersion(1), StatusCode::CONFLICT),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status_code(), expected);
        }
    }
}
