//! Engine error to HTTP response mapping

use axum::{http::StatusCode, Json};
use review_engine::{ErrorCode, ReviewError, ValidationError};
use tracing::{error, warn};

use crate::models::ErrorResponse;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// HTTP status for a domain error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::TeamExists | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::PrExists
        | ErrorCode::PrMerged
        | ErrorCode::NotAssigned
        | ErrorCode::NoCandidate
        | ErrorCode::UserInOtherTeam => StatusCode::CONFLICT,
    }
}

/// Render an engine error. Storage failures are logged and answered with a
/// generic 500 so no driver detail reaches the client.
pub fn review_error(err: ReviewError) -> ApiError {
    match err.code() {
        Some(code) => {
            warn!(code = %code, "Request rejected: {}", err);
            (
                status_for(code),
                Json(ErrorResponse::new(code.as_str(), err.to_string())),
            )
        }
        None => {
            error!("Internal error: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("INTERNAL", "internal error")),
            )
        }
    }
}

pub fn validation_error(err: ValidationError) -> ApiError {
    review_error(ReviewError::Validation(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ReviewError::TeamExists, StatusCode::BAD_REQUEST),
            (ReviewError::PrExists, StatusCode::CONFLICT),
            (ReviewError::PrMerged, StatusCode::CONFLICT),
            (ReviewError::NotAssigned, StatusCode::CONFLICT),
            (ReviewError::NoCandidate, StatusCode::CONFLICT),
            (ReviewError::NotFound("team"), StatusCode::NOT_FOUND),
            (
                ReviewError::Validation(ValidationError::required("user_id")),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (err, expected) in cases {
            let (status, Json(body)) = review_error(err);
            assert_eq!(status, expected, "code {}", body.error.code);
        }
    }

    #[test]
    fn test_database_error_is_opaque() {
        let err = ReviewError::Database(sea_orm_err());
        let (status, Json(body)) = review_error(err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.code, "INTERNAL");
        assert_eq!(body.error.message, "internal error");
    }

    fn sea_orm_err() -> sea_orm::DbErr {
        sea_orm::DbErr::Custom("password authentication failed for user".to_string())
    }
}
