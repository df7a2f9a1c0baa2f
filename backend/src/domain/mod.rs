//! Core domain model for the rental marketplace.
//!
//! Everything in here is transport-agnostic: handlers translate HTTP into
//! these types, services enforce the business rules, and the ports describe
//! what the domain needs from the outside world.

mod access;
pub mod assistant;
mod auth;
mod error;
mod listing_filter;
mod listings;
mod notice;
pub mod ports;
mod profile;
mod profiles;
mod property;
mod review;
mod reviews;

pub use access::{EditRedirect, ListingAccess, Principal, Viewer, guard_edit};
pub use auth::{Credentials, CredentialsValidationError};
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use listing_filter::{BedroomsFilter, ListingQuery, RawListingQuery, filter_listings};
pub use listings::{ListingDraft, ListingsService};
pub use notice::{Notice, NoticeLevel};
pub use profile::{ParseRoleError, Profile, ProfileId, ProfileValidationError, Role};
pub use profiles::ProfilesService;
pub use property::{
    ParsePropertyStatusError, Property, PropertyBuilder, PropertyId, PropertyStatus,
    PropertyValidationError, Transportation,
};
pub use review::{Rating, RatingOutOfRange, Review, average_rating};
pub use reviews::{ReviewBoard, ReviewsService, SubmittedReview};
