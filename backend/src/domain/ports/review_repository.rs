//! Port for review persistence.
//!
//! Uniqueness of (property, user) is enforced by the reviews service through
//! a lookup-before-write; the port only offers the primitive operations.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{ProfileId, PropertyId, Review};

/// Errors raised by review repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewRepositoryError {
    /// Backend connection could not be established.
    #[error("review repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("review repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// No review exists with the given identifier.
    #[error("review not found: {id}")]
    NotFound {
        /// The missing identifier.
        id: Uuid,
    },
}

impl ReviewRepositoryError {
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
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }
}

/// Port for review storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All reviews for a property, newest first.
    async fn list_by_property(
        &self,
        property_id: &PropertyId,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// The author's existing review of a property, if any.
    async fn find_by_property_and_user(
        &self,
        property_id: &PropertyId,
        user_id: &ProfileId,
    ) -> Result<Option<Review>, ReviewRepositoryError>;

    /// Persist a new review.
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Replace the stored review with `review`.
    ///
    /// Fails with [`ReviewRepositoryError::NotFound`] when no row exists.
    async fn update(&self, review: &Review) -> Result<(), ReviewRepositoryError>;

    /// Remove a review.
    ///
    /// Fails with [`ReviewRepositoryError::NotFound`] when no row exists.
    async fn delete(&self, id: Uuid) -> Result<(), ReviewRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_error_carries_the_identifier() {
        let id = Uuid::new_v4();
        let err = ReviewRepositoryError::not_found(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
