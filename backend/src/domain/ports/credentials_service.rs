//! Port for the external identity provider.
//!
//! Accounts (email + password) live with an external provider; profiles are
//! our own rows keyed by the principal's id. Adapters map provider failures
//! into the typed variants here so handlers can distinguish a bad password
//! from an unreachable provider.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Credentials, Principal};

/// Errors raised by credentials service adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsServiceError {
    /// Email or password did not match an account.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// An account already exists for this email.
    #[error("an account already exists for {email}")]
    EmailTaken {
        /// The conflicting email.
        email: String,
    },
    /// The provider could not be reached or answered abnormally.
    #[error("identity provider unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied failure detail.
        message: String,
    },
}

impl CredentialsServiceError {
    /// Rejected email/password pair.
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    /// Duplicate-signup failure for the given email.
    pub fn email_taken(email: impl Into<String>) -> Self {
        Self::EmailTaken {
            email: email.into(),
        }
    }

    /// Provider outage with the adapter's detail message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Port for account registration and authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialsService: Send + Sync {
    /// Register a new account and return its principal.
    async fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError>;

    /// Authenticate an existing account and return its principal.
    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError>;
}
