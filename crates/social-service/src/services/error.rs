//! Service layer errors
//!
//! Everything a service returns is either a domain rule violation or an
//! application error from `social-common`.

use social_common::{domain_status_code, AppError};
use social_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Auth, hashing and validation failures
    #[error(transparent)]
    App(AppError),
}

impl ServiceError {
    /// The wrapped domain error, if any
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) | Self::App(AppError::Domain(e)) => Some(e),
            _ => None,
        }
    }

    /// True when the caller may simply send the same request again
    pub fn is_retryable(&self) -> bool {
        self.as_domain().is_some_and(DomainError::is_retryable)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status_code(e),
            Self::App(e) => e.status_code(),
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::Domain(e),
            other => Self::App(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::PostId;

    #[test]
    fn test_domain_errors_keep_their_status() {
        let err = ServiceError::from(DomainError::PostNotFound(PostId::new()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "UNKNOWN_POST");

        assert_eq!(ServiceError::from(DomainError::Unauthorized).status_code(), 401);
        assert_eq!(ServiceError::from(DomainError::NotAuthor).status_code(), 403);
        assert_eq!(ServiceError::from(DomainError::ReactionConflict).status_code(), 409);
        assert_eq!(
            ServiceError::from(DomainError::StoreBusy("lock timeout".into())).status_code(),
            503
        );
    }

    #[test]
    fn test_app_domain_error_is_unwrapped() {
        let err = ServiceError::from(AppError::Domain(DomainError::EmailAlreadyExists));
        assert!(matches!(err, ServiceError::Domain(DomainError::EmailAlreadyExists)));
        assert_eq!(err.status_code(), 409);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ServiceError::from(DomainError::ReactionConflict).is_retryable());
        assert!(ServiceError::from(DomainError::StoreBusy("timeout".into())).is_retryable());
        assert!(!ServiceError::from(DomainError::NotAuthor).is_retryable());
        assert!(!ServiceError::from(AppError::InvalidCredentials).is_retryable());
    }
}
