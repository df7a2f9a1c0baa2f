//! Port for profile persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Profile, ProfileId};

/// Errors raised by profile repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileRepositoryError {
    /// Backend connection could not be established.
    #[error("profile repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("profile repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// No profile exists with the given identifier.
    #[error("profile not found: {id}")]
    NotFound {
        /// The missing identifier.
        id: String,
    },
}

impl ProfileRepositoryError {
    /// Connection failure with the adapter's detail message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query failure with the adapter's detail message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Missing-row failure for the given identifier.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}

/// Port for account profile storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// One profile by identifier, or `None` when it does not exist.
    async fn find_by_id(&self, id: &ProfileId)
    -> Result<Option<Profile>, ProfileRepositoryError>;

    /// Persist a new profile created at signup.
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;

    /// Replace the stored profile with `profile`.
    ///
    /// Fails with [`ProfileRepositoryError::NotFound`] when no row exists.
    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_formats_its_message() {
        let err = ProfileRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "profile repository connection failed: refused"
        );
    }
}
