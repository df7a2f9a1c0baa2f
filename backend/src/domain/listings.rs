//! Listing use-cases: browse, fetch, create, edit, status, delete.
//!
//! The service owns the authorisation decisions around listings. Reads are
//! open to everyone; every mutation re-evaluates the edit guard so a stale
//! session cannot slip a write through, and guard rejections carry the safe
//! redirect in the error details.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::access::{EditRedirect, Viewer, guard_edit};
use crate::domain::listing_filter::{ListingQuery, filter_listings};
use crate::domain::ports::{PropertyRepository, PropertyRepositoryError};
use crate::domain::{Error, Profile, Property, PropertyId, PropertyStatus, Transportation};

/// Inbound listing payload shared by create and edit.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields, default)]
pub struct ListingDraft {
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
}

/// Listing use-cases over a property repository.
pub struct ListingsService<P: ?Sized> {
    properties: Arc<P>,
}

impl<P: ?Sized> Clone for ListingsService<P> {
    fn clone(&self) -> Self {
        Self {
            properties: Arc::clone(&self.properties),
        }
    }
}

impl<P: ?Sized> ListingsService<P> {
    /// Create a new service over the given repository.
    pub fn new(properties: Arc<P>) -> Self {
        Self { properties }
    }
}

/// Forbidden error carrying the guard's safe redirect.
pub(crate) fn guard_rejection(redirect: EditRedirect) -> Error {
    Error::forbidden("you may not manage this listing")
        .with_details(json!({ "redirect": redirect.path() }))
}

impl<P> ListingsService<P>
where
    P: PropertyRepository + ?Sized,
{
    fn map_repository_error(error: PropertyRepositoryError) -> Error {
        match error {
            PropertyRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("property repository unavailable: {message}"))
            }
            PropertyRepositoryError::Query { message } => {
                Error::internal(format!("property repository error: {message}"))
            }
            PropertyRepositoryError::NotFound { id } => {
                Error::not_found(format!("property not found: {id}"))
            }
        }
    }

    /// Available listings matching `query`, newest first.
    ///
    /// Only `Available` rows reach the filter; rented and withdrawn units
    /// never appear in public results no matter what the query says.
    pub async fn browse(&self, query: &ListingQuery) -> Result<Vec<Property>, Error> {
        let available = self
            .properties
            .list_by_status(PropertyStatus::Available)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(filter_listings(&available, query)
            .into_iter()
            .cloned()
            .collect())
    }

    /// One listing by identifier.
    pub async fn fetch(&self, id: &PropertyId) -> Result<Property, Error> {
        self.try_fetch(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("property not found: {id}")))
    }

    /// One listing by identifier, or `None` when it does not exist.
    pub async fn try_fetch(&self, id: &PropertyId) -> Result<Option<Property>, Error> {
        self.properties
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Every listing owned by the landlord, all statuses, newest first.
    pub async fn portfolio(&self, landlord: &Profile) -> Result<Vec<Property>, Error> {
        self.properties
            .list_by_landlord(&landlord.id)
            .await
            .map_err(Self::map_repository_error)
    }

    /// Create a listing owned by the viewer.
    ///
    /// Only landlords may create. The landlord's contact details are copied
    /// into the listing as a snapshot and the status starts `Available`.
    pub async fn create(&self, viewer: Viewer<'_>, draft: ListingDraft) -> Result<Property, Error> {
        let Viewer::SignedIn { principal, profile } = viewer else {
            return Err(Error::unauthorized("sign in to create a listing"));
        };
        if !viewer.can_create_listing() {
            return Err(guard_rejection(EditRedirect::Home));
        }

        let property = Property::builder(profile, principal.email.clone())
            .title(draft.title)
            .description(draft.description)
            .address(draft.address)
            .location(draft.location)
            .price(draft.price)
            .bedrooms(draft.bedrooms)
            .bathrooms(draft.bathrooms)
            .square_feet(draft.square_feet)
            .furnished(draft.is_furnished)
            .amenities(draft.amenities)
            .highlights(draft.highlights)
            .images(draft.images)
            .transportation(draft.transportation)
            .build();

        self.properties
            .insert(&property)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(property)
    }

    /// Fetch a listing for the edit form, applying the guard first.
    ///
    /// Rejections surface as forbidden errors whose details name the safe
    /// redirect, so clients can route the viewer without inspecting state.
    pub async fn fetch_for_edit(
        &self,
        viewer: Viewer<'_>,
        id: &PropertyId,
    ) -> Result<Property, Error> {
        let existing = self.guarded_fetch(viewer, id).await?;
        Ok(existing)
    }

    /// Replace the editable fields of a listing.
    ///
    /// Identity, ownership snapshot, status and `created_at` are preserved;
    /// `updated_at` moves to now. The guard runs again here even though the
    /// edit form already passed it.
    pub async fn update(
        &self,
        viewer: Viewer<'_>,
        id: &PropertyId,
        draft: ListingDraft,
    ) -> Result<Property, Error> {
        let mut existing = self.guarded_fetch(viewer, id).await?;

        existing.title = draft.title;
        existing.description = draft.description;
        existing.address = draft.address;
        existing.location = draft.location;
        existing.price = draft.price;
        existing.bedrooms = draft.bedrooms;
        existing.bathrooms = draft.bathrooms;
        existing.square_feet = draft.square_feet;
        existing.is_furnished = draft.is_furnished;
        existing.amenities = draft.amenities;
        existing.highlights = draft.highlights;
        existing.images = draft.images;
        existing.transportation = draft.transportation;
        existing.updated_at = chrono::Utc::now();

        self.properties
            .update(&existing)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(existing)
    }

    /// Move a listing to a new lifecycle status.
    pub async fn change_status(
        &self,
        viewer: Viewer<'_>,
        id: &PropertyId,
        status: PropertyStatus,
    ) -> Result<Property, Error> {
        let mut existing = self.guarded_fetch(viewer, id).await?;
        existing.status = status;
        existing.updated_at = chrono::Utc::now();

        self.properties
            .update(&existing)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(existing)
    }

    /// Remove a listing.
    pub async fn delete(&self, viewer: Viewer<'_>, id: &PropertyId) -> Result<(), Error> {
        let existing = self.guarded_fetch(viewer, id).await?;
        self.properties
            .delete(&existing.id)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn guarded_fetch(&self, viewer: Viewer<'_>, id: &PropertyId) -> Result<Property, Error> {
        let existing = self.try_fetch(id).await?;
        guard_edit(viewer, existing.as_ref()).map_err(guard_rejection)?;
        // The guard admits only when the row exists.
        existing.ok_or_else(|| Error::internal("guard admitted a missing listing"))
    }
}
