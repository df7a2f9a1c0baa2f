//! Port for property persistence.
//!
//! Adapters provide durable storage for listings. Listing queries return
//! rows newest-first; the filter engine preserves that order, so adapters
//! must not re-sort behind the port's back.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ProfileId, Property, PropertyId, PropertyStatus};

/// Errors raised by property repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyRepositoryError {
    /// Backend connection could not be established.
    #[error("property repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("property repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure detail.
        message: String,
    },
    /// No property exists with the given identifier.
    #[error("property not found: {id}")]
    NotFound {
        /// The missing identifier.
        id: String,
    },
}

impl PropertyRepositoryError {
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

/// Port for listing storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// All listings with the given status, newest first.
    async fn list_by_status(
        &self,
        status: PropertyStatus,
    ) -> Result<Vec<Property>, PropertyRepositoryError>;

    /// One listing by identifier, or `None` when it does not exist.
    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError>;

    /// Every listing owned by `landlord_id` regardless of status, newest
    /// first.
    async fn list_by_landlord(
        &self,
        landlord_id: &ProfileId,
    ) -> Result<Vec<Property>, PropertyRepositoryError>;

    /// Persist a new listing.
    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError>;

    /// Replace the stored listing with `property`.
    ///
    /// Fails with [`PropertyRepositoryError::NotFound`] when no row exists.
    async fn update(&self, property: &Property) -> Result<(), PropertyRepositoryError>;

    /// Remove a listing.
    ///
    /// Fails with [`PropertyRepositoryError::NotFound`] when no row exists.
    async fn delete(&self, id: &PropertyId) -> Result<(), PropertyRepositoryError>;
}
