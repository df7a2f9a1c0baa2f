//! HTTP inbound adapter exposing REST endpoints.

pub mod assistant;
pub mod auth;
pub mod error;
pub mod health;
pub mod listings;
pub mod profile;
pub mod reviews;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
