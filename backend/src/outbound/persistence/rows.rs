//! Row DTOs for the persistence API.
//!
//! The adapter decodes table rows into these transport DTOs first, then maps
//! into domain records in one pass. Columns use snake_case names; mapping
//! failures surface as plain strings for the adapter to wrap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Profile, ProfileId, Property, PropertyId, Rating, Review, Transportation,
};

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct TransportationRow {
    #[serde(default)]
    pub(super) metro: String,
    #[serde(default)]
    pub(super) bus: String,
    #[serde(default)]
    pub(super) bike: String,
    #[serde(default)]
    pub(super) parking: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PropertyRow {
    pub(super) id: String,
    pub(super) title: String,
    pub(super) description: String,
    pub(super) address: String,
    pub(super) location: String,
    pub(super) price: u32,
    pub(super) bedrooms: u32,
    pub(super) bathrooms: f64,
    pub(super) square_feet: u32,
    pub(super) is_furnished: bool,
    #[serde(default)]
    pub(super) amenities: Vec<String>,
    #[serde(default)]
    pub(super) highlights: Vec<String>,
    #[serde(default)]
    pub(super) images: Vec<String>,
    pub(super) transportation: TransportationRow,
    pub(super) landlord_id: String,
    pub(super) landlord_name: String,
    pub(super) landlord_email: String,
    pub(super) landlord_phone: String,
    pub(super) status: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ReviewRow {
    pub(super) id: Uuid,
    pub(super) property_id: String,
    pub(super) user_id: String,
    pub(super) rating: u8,
    #[serde(default)]
    pub(super) comment: String,
    pub(super) reviewer_name: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct ProfileRow {
    pub(super) id: String,
    pub(super) role: String,
    pub(super) full_name: String,
    #[serde(default)]
    pub(super) phone: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl From<&Transportation> for TransportationRow {
    fn from(value: &Transportation) -> Self {
        Self {
            metro: value.metro.clone(),
            bus: value.bus.clone(),
            bike: value.bike.clone(),
            parking: value.parking.clone(),
        }
    }
}

impl From<TransportationRow> for Transportation {
    fn from(value: TransportationRow) -> Self {
        Self {
            metro: value.metro,
            bus: value.bus,
            bike: value.bike,
            parking: value.parking,
        }
    }
}

impl From<&Property> for PropertyRow {
    fn from(value: &Property) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title.clone(),
            description: value.description.clone(),
            address: value.address.clone(),
            location: value.location.clone(),
            price: value.price,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            square_feet: value.square_feet,
            is_furnished: value.is_furnished,
            amenities: value.amenities.clone(),
            highlights: value.highlights.clone(),
            images: value.images.clone(),
            transportation: TransportationRow::from(&value.transportation),
            landlord_id: value.landlord_id.to_string(),
            landlord_name: value.landlord_name.clone(),
            landlord_email: value.landlord_email.clone(),
            landlord_phone: value.landlord_phone.clone(),
            status: value.status.to_string(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl PropertyRow {
    pub(super) fn into_domain(self) -> Result<Property, String> {
        let id = PropertyId::new(&self.id)
            .map_err(|error| format!("property row {}: {error}", self.id))?;
        let landlord_id = ProfileId::new(&self.landlord_id)
            .map_err(|error| format!("property row {}: {error}", self.id))?;
        let status = self
            .status
            .parse()
            .map_err(|error| format!("property row {}: {error}", self.id))?;

        Ok(Property {
            id,
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
            transportation: self.transportation.into(),
            landlord_id,
            landlord_name: self.landlord_name,
            landlord_email: self.landlord_email,
            landlord_phone: self.landlord_phone,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&Review> for ReviewRow {
    fn from(value: &Review) -> Self {
        Self {
            id: value.id,
            property_id: value.property_id.to_string(),
            user_id: value.user_id.to_string(),
            rating: value.rating.value(),
            comment: value.comment.clone(),
            reviewer_name: value.reviewer_name.clone(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl ReviewRow {
    pub(super) fn into_domain(self) -> Result<Review, String> {
        let property_id = PropertyId::new(&self.property_id)
            .map_err(|error| format!("review row {}: {error}", self.id))?;
        let user_id = ProfileId::new(&self.user_id)
            .map_err(|error| format!("review row {}: {error}", self.id))?;
        let rating = Rating::try_new(self.rating)
            .map_err(|error| format!("review row {}: {error}", self.id))?;

        Ok(Review {
            id: self.id,
            property_id,
            user_id,
            rating,
            comment: self.comment,
            reviewer_name: self.reviewer_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&Profile> for ProfileRow {
    fn from(value: &Profile) -> Self {
        Self {
            id: value.id.to_string(),
            role: value.role.to_string(),
            full_name: value.full_name.clone(),
            phone: value.phone.clone(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl ProfileRow {
    pub(super) fn into_domain(self) -> Result<Profile, String> {
        let id = ProfileId::new(&self.id)
            .map_err(|error| format!("profile row {}: {error}", self.id))?;
        let role = self
            .role
            .parse()
            .map_err(|error| format!("profile row {}: {error}", self.id))?;
        if self.full_name.trim().is_empty() {
            return Err(format!("profile row {}: full name is blank", self.id));
        }

        Ok(Profile {
            id,
            role,
            full_name: self.full_name,
            phone: self.phone,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
