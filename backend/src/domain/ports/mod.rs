//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the persistence service and the identity provider). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

mod credentials_service;
mod profile_repository;
mod property_repository;
mod review_repository;

#[cfg(test)]
pub use credentials_service::MockCredentialsService;
pub use credentials_service::{CredentialsService, CredentialsServiceError};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use property_repository::MockPropertyRepository;
pub use property_repository::{PropertyRepository, PropertyRepositoryError};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
