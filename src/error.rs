use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

/// Expected request outcomes as values. Handlers return these with `?`;
/// the `ResponseError` impl maps each variant to its status code at the
/// boundary.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Login identifier/password mismatch. Deliberately carries no detail
    /// about which check failed.
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,

    /// Any token failure: malformed, bad signature, expired, wrong class,
    /// or a subject that no longer resolves to a live user. Never
    /// differentiated to the caller.
    #[display(fmt = "Invalid or expired token")]
    InvalidToken,

    /// Authenticated but insufficient role. The reason is safe to show.
    #[display(fmt = "{}", _0)]
    Forbidden(String),

    #[display(fmt = "{} not found", _0)]
    NotFound(&'static str),

    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Unhandled internal error. Logged with context where it arose;
    /// opaque to the caller.
    #[display(fmt = "Internal Server Error")]
    Fault,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Bad login credentials surface as 403, not 401.
            ApiError::InvalidCredentials => StatusCode::FORBIDDEN,
            ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Fault => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        ApiError::Fault
    }
}

/// True when the error is a MySQL duplicate-key violation (SQLSTATE 23000).
pub fn is_duplicate_key(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23000"))
}

/// Conflicts worth retrying in a fresh transaction: duplicate key
/// (SQLSTATE 23000) and deadlock victim (SQLSTATE 40001). Two first-of-year
/// invoice creations hold compatible gap locks over the empty number range,
/// so under REPEATABLE READ the loser surfaces as a deadlock rather than a
/// duplicate key.
pub fn is_retryable_conflict(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db_err)
            if matches!(db_err.code().as_deref(), Some("23000") | Some("40001"))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::Forbidden("nope".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::NotFound("Invoice").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Validation("bad email".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Fault.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn fault_message_is_opaque() {
        assert_eq!(ApiError::Fault.to_string(), "Internal Server Error");
    }

    #[test]
    fn credential_and_token_errors_carry_no_detail() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(ApiError::InvalidToken.to_string(), "Invalid or expired token");
    }

    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct SqlStateError(&'static str);

    impl fmt::Display for SqlStateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "sqlstate {}", self.0)
        }
    }

    impl StdError for SqlStateError {}

    impl sqlx::error::DatabaseError for SqlStateError {
        fn message(&self) -> &str {
            "conflict"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlStateError(code)))
    }

    #[test]
    fn duplicate_key_and_deadlock_are_retryable() {
        assert!(is_retryable_conflict(&db_error("23000")));
        assert!(is_retryable_conflict(&db_error("40001")));
        assert!(is_duplicate_key(&db_error("23000")));
        assert!(!is_duplicate_key(&db_error("40001")));
    }

    #[test]
    fn other_errors_are_not_retryable() {
        assert!(!is_retryable_conflict(&db_error("42S02")));
        assert!(!is_retryable_conflict(&sqlx::Error::RowNotFound));
    }
}
