use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::postgres::{ConstraintViolation, DbErr, constraint_violation};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Missing or malformed input, including unknown sort fields.
    #[error("{0}")]
    Validation(String),

    #[error("{resource} not found")]
    NotFound { resource: &'static str, id: i32 },

    /// Overlapping lease, rows still referencing the target, or a rejected
    /// foreign-key/unique constraint.
    #[error("{0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type PortfolioResult<T> = Result<T, PortfolioError>;

impl PortfolioError {
    pub fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    /// `Missing required fields: leaseStart, paymentStatusId`
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("Missing required fields: {}", fields.join(", ")))
    }

    /// A create or update pointed at a row that does not exist.
    pub fn missing_reference(label: &str, id: i32) -> Self {
        Self::Conflict(format!("Referenced {} {} does not exist", label, id))
    }
}

impl From<ConstraintViolation> for PortfolioError {
    fn from(violation: ConstraintViolation) -> Self {
        let reason = match violation {
            ConstraintViolation::Unique(_) => "Duplicate value rejected",
            ConstraintViolation::ForeignKey(_) => "Row is referenced or references a missing row",
        };
        Self::Conflict(format!("{}: {}", reason, violation.detail()))
    }
}

impl From<DbErr> for PortfolioError {
    fn from(err: DbErr) -> Self {
        match constraint_violation(&err) {
            Some(violation) => violation.into(),
            None => Self::Store(err.to_string()),
        }
    }
}

/// Convert PortfolioError to AppError for standardized error responses
impl From<PortfolioError> for AppError {
    fn from(err: PortfolioError) -> Self {
        match err {
            PortfolioError::Validation(msg) => AppError::BadRequest(msg),
            PortfolioError::NotFound { resource, id } => {
                tracing::debug!(resource, id, "Row not found");
                AppError::NotFound(format!("{} not found", resource))
            }
            PortfolioError::Conflict(msg) => AppError::Conflict(msg),
            PortfolioError::Store(msg) => {
                tracing::error!(error = %msg, "Store operation failed");
                AppError::BadRequest(format!("Store error: {}", msg))
            }
        }
    }
}

impl IntoResponse for PortfolioError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (PortfolioError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (PortfolioError::not_found("Lease", 3), StatusCode::NOT_FOUND),
            (PortfolioError::Conflict("busy".into()), StatusCode::CONFLICT),
            (PortfolioError::Store("down".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_not_found_message_names_resource() {
        assert_eq!(
            PortfolioError::not_found("Lease", 3).to_string(),
            "Lease not found"
        );
    }

    #[test]
    fn test_missing_fields_message() {
        let err = PortfolioError::missing_fields(&["leaseStart", "paymentStatusId"]);
        assert_eq!(
            err.to_string(),
            "Missing required fields: leaseStart, paymentStatusId"
        );
    }

    #[test]
    fn test_constraint_violations_are_conflicts_carrying_driver_detail() {
        let err: PortfolioError =
            ConstraintViolation::Unique("payment_statuses_description_key".into()).into();
        assert!(matches!(err, PortfolioError::Conflict(_)));
        assert_eq!(
            err.to_string(),
            "Duplicate value rejected: payment_statuses_description_key"
        );

        let err: PortfolioError = ConstraintViolation::ForeignKey("fk_leases_tenant".into()).into();
        assert_eq!(
            err.to_string(),
            "Row is referenced or references a missing row: fk_leases_tenant"
        );
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_plain_db_error_is_store_error() {
        let err: PortfolioError = DbErr::Custom("connection reset".into()).into();
        assert!(matches!(err, PortfolioError::Store(_)));
    }
}
