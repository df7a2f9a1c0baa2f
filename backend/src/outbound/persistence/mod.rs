//! Persistence adapters implementing the repository ports.
//!
//! `RestPersistence` backs production deployments against the hosted data
//! API; `InMemoryPersistence` and `InMemoryCredentials` serve tests and local
//! development without external services.

mod memory;
mod rest;
mod rows;

pub use memory::{InMemoryCredentials, InMemoryPersistence};
pub use rest::RestPersistence;
