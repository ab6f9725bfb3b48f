use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;

pub mod leave_policy;
pub mod review;

/// Everything the leave endpoints can refuse with, mapped straight onto the
/// HTTP surface. Rule failures are permanent rejections of the input; only
/// `Db` represents a transient fault worth a caller-side retry.
#[derive(Debug, Display)]
pub enum LeaveError {
    #[display(fmt = "{}", _0)]
    Forbidden(&'static str),
    #[display(fmt = "{}", _0)]
    Invalid(String),
    #[display(fmt = "{}", _0)]
    Ineligible(&'static str),
    #[display(fmt = "Leave blocked: {}", _0)]
    PeriodLocked(String),
    #[display(fmt = "Leave request not found")]
    NotFound,
    #[display(fmt = "Internal Server Error")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for LeaveError {
    fn from(e: sqlx::Error) -> Self {
        LeaveError::Db(e)
    }
}

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeaveError::Forbidden(_) => StatusCode::FORBIDDEN,
            LeaveError::Invalid(_) | LeaveError::Ineligible(_) | LeaveError::PeriodLocked(_) => {
                StatusCode::BAD_REQUEST
            }
            LeaveError::NotFound => StatusCode::NOT_FOUND,
            LeaveError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let LeaveError::Db(e) = self {
            tracing::error!(error = %e, "Leave store failure");
        }
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            LeaveError::Forbidden("Access denied").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            LeaveError::PeriodLocked("exam week".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(LeaveError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            LeaveError::Db(sqlx::Error::PoolClosed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn locked_message_carries_the_block_reason() {
        let err = LeaveError::PeriodLocked("exam week".into());
        assert_eq!(err.to_string(), "Leave blocked: exam week");
    }
}
