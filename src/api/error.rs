use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Bad Request: {0}")]
    BadRequest(Cow<'static, str>),
    #[error("Not Found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(Cow<'static, str>),
    #[error("Internal Server Error: {0}")]
    InternalServer(Cow<'static, str>),
}

#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub message: Cow<'static, str>,
}

impl Error {
    pub fn bad_request(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    pub fn message(&self) -> &Cow<'static, str> {
        match self {
            Error::BadRequest(msg)
            | Error::NotFound(msg)
            | Error::ServiceUnavailable(msg)
            | Error::InternalServer(msg) => msg,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match *self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::InternalServer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody { message: self.message().clone() })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SystemError {
    // validation
    #[error("UserID doesn't exist: {0}")]
    UserNotFound(String),
    #[error("Can't build a relationship with the same UserID")]
    SameUserId,
    #[error("A relationship with these two users already exists")]
    RelationshipExists,
    #[error("Invalid RelationshipType: {0}")]
    InvalidRelationshipType(String),
    // lookups
    #[error("Relationship not found")]
    RelationshipNotFound,
    #[error("Failed to fetch details for user {user_id}: {reason}")]
    UserLookupFailed { user_id: String, reason: Cow<'static, str> },
    // availability
    #[error("Store unavailable: {0}")]
    StoreUnavailable(Cow<'static, str>),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(Cow<'static, str>),
    // sqlx errors
    #[error("Database Error: {0}")]
    DatabaseError(Cow<'static, str>),
    // reqwest errors
    #[error("HTTP client error: {0}")]
    HttpClientError(Cow<'static, str>),
    #[error("Internal System Error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl From<SystemError> for Error {
    fn from(value: SystemError) -> Self {
        match value {
            SystemError::UserNotFound(_)
            | SystemError::SameUserId
            | SystemError::RelationshipExists
            | SystemError::InvalidRelationshipType(_) => {
                log::warn!("Rejected relationship: {}", value);
                Error::BadRequest(value.to_string().into())
            }
            SystemError::RelationshipNotFound => {
                log::warn!("{}", value);
                Error::NotFound(value.to_string().into())
            }
            SystemError::StoreUnavailable(_) | SystemError::UpstreamUnavailable(_) => {
                log::error!("{}", value);
                Error::ServiceUnavailable(value.to_string().into())
            }
            _ => {
                log::error!("Internal Server Error: {:?}", value);
                Error::InternalServer(value.to_string().into())
            }
        }
    }
}

impl From<sqlx::Error> for SystemError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // unique_violation on the unordered pair index
                Some("23505") => SystemError::RelationshipExists,
                // invalid_text_representation for the relationship_type enum
                Some("22P02") => SystemError::InvalidRelationshipType(db_err.message().to_string()),
                _ => {
                    log::error!("Unhandled DB error: {:?}", db_err);
                    SystemError::DatabaseError(db_err.message().to_string().into())
                }
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => SystemError::StoreUnavailable(err.to_string().into()),
            sqlx::Error::RowNotFound => SystemError::RelationshipNotFound,
            _ => SystemError::InternalError(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for SystemError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            SystemError::UpstreamUnavailable(err.to_string().into())
        } else if err.is_decode() {
            SystemError::HttpClientError(format!("Invalid response body: {err}").into())
        } else {
            match err.status() {
                Some(status) if status.is_server_error() => {
                    SystemError::UpstreamUnavailable(format!("Server error (HTTP {status})").into())
                }
                _ => SystemError::HttpClientError(err.to_string().into()),
            }
        }
    }
}

impl SystemError {
    pub fn user_lookup_failed(
        user_id: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::UserLookupFailed { user_id: user_id.into(), reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        let cases = vec![
            SystemError::UserNotFound("a".into()),
            SystemError::SameUserId,
            SystemError::RelationshipExists,
            SystemError::InvalidRelationshipType("Deleted".into()),
        ];
        for case in cases {
            let err = Error::from(case);
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_not_found_is_404() {
        let err = Error::from(SystemError::RelationshipNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "Relationship not found");
    }

    #[test]
    fn test_unavailable_is_503() {
        let store = Error::from(SystemError::StoreUnavailable("pool timed out".into()));
        let upstream = Error::from(SystemError::UpstreamUnavailable("connection refused".into()));
        assert_eq!(store.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(upstream.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_unclassified_keeps_message() {
        let err = Error::from(SystemError::user_lookup_failed("b", "HTTP 500"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message().contains("Failed to fetch details for user b"));
    }

    #[test]
    fn test_pool_timeout_is_store_unavailable() {
        let err = SystemError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, SystemError::StoreUnavailable(_)));
    }
}
