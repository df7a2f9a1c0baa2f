//! Rental property listings.
//!
//! A property belongs to the landlord profile that created it. Landlord
//! contact fields are a denormalised snapshot taken at creation time: they
//! deliberately go stale when the owning profile is edited, trading
//! consistency for join-free reads.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::profile::{Profile, ProfileId};

/// Validation errors returned when constructing property values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValidationError {
    /// Identifier was empty.
    EmptyId,
    /// Identifier was not a valid UUID.
    InvalidId,
}

impl fmt::Display for PropertyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "property id must not be empty"),
            Self::InvalidId => write!(f, "property id must be a valid UUID"),
        }
    }
}

impl std::error::Error for PropertyValidationError {}

/// Stable property identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropertyId(Uuid, String);

impl PropertyId {
    /// Validate and construct a [`PropertyId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, PropertyValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`PropertyId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, PropertyValidationError> {
        if id.is_empty() {
            return Err(PropertyValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(PropertyValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| PropertyValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for PropertyId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PropertyId> for String {
    fn from(value: PropertyId) -> Self {
        let PropertyId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for PropertyId {
    type Error = PropertyValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Lifecycle status gating public visibility: only `Available` listings are
/// shown to browsing users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    /// Publicly listed and open to applications.
    #[default]
    Available,
    /// Let to a tenant; hidden from the public listing.
    Rented,
    /// Temporarily withdrawn for maintenance.
    Maintenance,
}

impl PropertyStatus {
    /// Returns the persisted string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePropertyStatusError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParsePropertyStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown property status: {}", self.input)
    }
}

impl std::error::Error for ParsePropertyStatusError {}

impl std::str::FromStr for PropertyStatus {
    type Err = ParsePropertyStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParsePropertyStatusError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Nearby transport notes, keyed by a fixed mode set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct Transportation {
    /// Metro/underground access.
    pub metro: String,
    /// Bus connections.
    pub bus: String,
    /// Cycling options.
    pub bike: String,
    /// Parking arrangements.
    pub parking: String,
}

/// A rental listing record.
///
/// ## Invariants
/// - `landlord_id` references a profile with [`super::Role::Landlord`].
/// - Mutated only by the owning landlord.
/// - `images` is ordered; the first entry is the cover image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Property {
    /// Stable identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: PropertyId,
    /// Listing headline.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Street address.
    pub address: String,
    /// Neighbourhood or area name used for search.
    pub location: String,
    /// Monthly rent in whole currency units.
    pub price: u32,
    /// Bedroom count; 0 denotes a studio.
    pub bedrooms: u32,
    /// Bathroom count; half-steps allowed.
    pub bathrooms: f64,
    /// Interior floor area.
    pub square_feet: u32,
    /// Whether the unit is let furnished.
    pub is_furnished: bool,
    /// Ordered free-text amenity tags.
    pub amenities: Vec<String>,
    /// Ordered free-text highlight tags.
    pub highlights: Vec<String>,
    /// Ordered image URLs; first is the cover.
    pub images: Vec<String>,
    /// Transport notes.
    pub transportation: Transportation,
    /// Owning landlord profile key.
    #[schema(value_type = String)]
    pub landlord_id: ProfileId,
    /// Landlord name snapshot taken at creation.
    pub landlord_name: String,
    /// Landlord email snapshot taken at creation.
    pub landlord_email: String,
    /// Landlord phone snapshot taken at creation.
    pub landlord_phone: String,
    /// Lifecycle status.
    pub status: PropertyStatus,
    /// Creation timestamp; public listings are ordered by this, descending.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Create a builder for a new listing owned by `landlord`.
    ///
    /// The landlord's name and phone are copied into the listing as a
    /// snapshot; `landlord_email` comes from the session principal because
    /// profiles do not store the email.
    pub fn builder(landlord: &Profile, landlord_email: impl Into<String>) -> PropertyBuilder {
        PropertyBuilder::new(landlord, landlord_email)
    }

    /// URL of the cover image, when any image was provided.
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Builder for constructing [`Property`] incrementally.
///
/// Defaults mirror the listing form: one bedroom, one bathroom,
/// unfurnished, empty tag lists, status `Available`.
#[derive(Debug, Clone)]
pub struct PropertyBuilder {
    id: PropertyId,
    title: String,
    description: String,
    address: String,
    location: String,
    price: u32,
    bedrooms: u32,
    bathrooms: f64,
    square_feet: u32,
    is_furnished: bool,
    amenities: Vec<String>,
    highlights: Vec<String>,
    images: Vec<String>,
    transportation: Transportation,
    landlord_id: ProfileId,
    landlord_name: String,
    landlord_email: String,
    landlord_phone: String,
    status: PropertyStatus,
    created_at: Option<DateTime<Utc>>,
}

impl PropertyBuilder {
    /// Create a new builder capturing the landlord snapshot.
    pub fn new(landlord: &Profile, landlord_email: impl Into<String>) -> Self {
        Self {
            id: PropertyId::random(),
            title: String::new(),
            description: String::new(),
            address: String::new(),
            location: String::new(),
            price: 0,
            bedrooms: 1,
            bathrooms: 1.0,
            square_feet: 0,
            is_furnished: false,
            amenities: Vec::new(),
            highlights: Vec::new(),
            images: Vec::new(),
            transportation: Transportation::default(),
            landlord_id: landlord.id.clone(),
            landlord_name: landlord.full_name.clone(),
            landlord_email: landlord_email.into(),
            landlord_phone: landlord.phone.clone(),
            status: PropertyStatus::Available,
            created_at: None,
        }
    }

    /// Set the listing headline.
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = value.into();
        self
    }

    /// Set the long-form description.
    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = value.into();
        self
    }

    /// Set the street address.
    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = value.into();
        self
    }

    /// Set the search location.
    pub fn location(mut self, value: impl Into<String>) -> Self {
        self.location = value.into();
        self
    }

    /// Set the monthly rent.
    pub fn price(mut self, value: u32) -> Self {
        self.price = value;
        self
    }

    /// Set the bedroom count.
    pub fn bedrooms(mut self, value: u32) -> Self {
        self.bedrooms = value;
        self
    }

    /// Set the bathroom count.
    pub fn bathrooms(mut self, value: f64) -> Self {
        self.bathrooms = value;
        self
    }

    /// Set the floor area.
    pub fn square_feet(mut self, value: u32) -> Self {
        self.square_feet = value;
        self
    }

    /// Set whether the unit is furnished.
    pub fn furnished(mut self, value: bool) -> Self {
        self.is_furnished = value;
        self
    }

    /// Set the amenity tags.
    pub fn amenities(mut self, values: Vec<String>) -> Self {
        self.amenities = values;
        self
    }

    /// Set the highlight tags.
    pub fn highlights(mut self, values: Vec<String>) -> Self {
        self.highlights = values;
        self
    }

    /// Set the image URLs.
    pub fn images(mut self, values: Vec<String>) -> Self {
        self.images = values;
        self
    }

    /// Set the transport notes.
    pub fn transportation(mut self, value: Transportation) -> Self {
        self.transportation = value;
        self
    }

    /// Set the lifecycle status.
    pub fn status(mut self, value: PropertyStatus) -> Self {
        self.status = value;
        self
    }

    /// Set the creation timestamp.
    pub fn created_at(mut self, ts: DateTime<Utc>) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Build the final [`Property`].
    pub fn build(self) -> Property {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Property {
            id: self.id,
            title: self.title,
            description: self.description,
            address: self.address,
            location: self.location,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            square_feet: self.square_feet,
            is_furnished: self.is_furnished,
            amenities: self.amenities,
            highlights: self.highlights,
            images: self.images,
            transportation: self.transportation,
            landlord_id: self.landlord_id,
            landlord_name: self.landlord_name,
            landlord_email: self.landlord_email,
            landlord_phone: self.landlord_phone,
            status: self.status,
            created_at,
            updated_at: created_at,
        }
    }
}
