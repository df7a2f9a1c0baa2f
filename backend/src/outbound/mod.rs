//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic:
//!
//! - **persistence**: REST data-API repositories, plus in-memory stand-ins
//!   for tests and local development
//! - **identity**: REST auth-API credentials service

pub mod identity;
pub mod persistence;
