//! Listing HTTP handlers.
//!
//! ```text
//! GET    /api/v1/properties             Browse available listings
//! GET    /api/v1/properties/{id}        Listing detail with capabilities
//! POST   /api/v1/properties             Create a listing (landlords)
//! GET    /api/v1/properties/{id}/edit   Guarded loader for the edit form
//! PUT    /api/v1/properties/{id}        Replace editable fields (owner)
//! PUT    /api/v1/properties/{id}/status Change lifecycle status (owner)
//! DELETE /api/v1/properties/{id}        Remove a listing (owner)
//! ```
//!
//! Filter parameters arrive as loose query strings and are normalised by the
//! filter engine; malformed numeric text never rejects a request, it merely
//! leaves that constraint off.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ListingAccess, ListingDraft, ListingQuery, Notice, Property, RawListingQuery,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, viewer_from};
use crate::inbound::http::validation::{parse_property_id, parse_status};

/// Browse response: filtered listings plus the viewer's global capabilities.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub properties: Vec<Property>,
    pub total: usize,
    /// `true` when no filter constraint was active.
    pub unconstrained: bool,
    pub can_create_listing: bool,
}

/// Detail response: the listing plus per-listing capabilities.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetailResponse {
    pub property: Property,
    pub access: ListingAccess,
    pub can_edit: bool,
    pub can_change_status: bool,
    pub can_review: bool,
}

/// Mutation response: the listing after the write plus a notice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingMutationResponse {
    pub property: Property,
    pub notice: Notice,
}

/// Deletion response carrying only the notice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingDeletedResponse {
    pub notice: Notice,
}

/// Status change request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusRequest {
    /// `available`, `rented` or `maintenance`.
    pub status: String,
}

/// Browse available listings.
#[utoipa::path(
    get,
    path = "/api/v1/properties",
    params(
        ("search" = Option<String>, Query, description = "Substring matched against title, location and description"),
        ("minPrice" = Option<String>, Query, description = "Lower rent bound; malformed text is ignored"),
        ("maxPrice" = Option<String>, Query, description = "Upper rent bound; malformed text is ignored"),
        ("bedrooms" = Option<String>, Query, description = "Exact count, or 'N+' for at least N"),
        ("furnished" = Option<bool>, Query, description = "true restricts to furnished units"),
        ("amenities" = Option<String>, Query, description = "Comma-separated tags; all must be present")
    ),
    responses(
        (status = 200, description = "Filtered listings", body = BrowseResponse),
        (status = 503, description = "Persistence unavailable", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "browseListings"
)]
#[get("/properties")]
pub async fn browse(
    state: web::Data<HttpState>,
    session: SessionContext,
    raw: web::Query<RawListingQuery>,
) -> ApiResult<HttpResponse> {
    let query = ListingQuery::from_raw(raw.into_inner());
    let properties = state.listings.browse(&query).await?;
    let parts = state.viewer_parts(&session).await?;

    Ok(HttpResponse::Ok().json(BrowseResponse {
        total: properties.len(),
        unconstrained: query.is_unconstrained(),
        can_create_listing: viewer_from(&parts).can_create_listing(),
        properties,
    }))
}

/// Listing detail with the viewer's capabilities.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing detail", body = ListingDetailResponse),
        (status = 404, description = "Listing not found", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "getListing"
)]
#[get("/properties/{id}")]
pub async fn detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let property = state.listings.fetch(&id).await?;
    let parts = state.viewer_parts(&session).await?;
    let viewer = viewer_from(&parts);
    let access = ListingAccess::classify(viewer, &property);

    Ok(HttpResponse::Ok().json(ListingDetailResponse {
        access,
        can_edit: access.can_edit(),
        can_change_status: access.can_change_status(),
        can_review: viewer.can_review(),
        property,
    }))
}

/// Create a listing.
#[utoipa::path(
    post,
    path = "/api/v1/properties",
    request_body = ListingDraft,
    responses(
        (status = 201, description = "Listing created", body = ListingMutationResponse),
        (status = 401, description = "No session", body = crate::domain::Error),
        (status = 403, description = "Viewer is not a landlord", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/properties")]
pub async fn create(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingDraft>,
) -> ApiResult<HttpResponse> {
    let parts = state.viewer_parts(&session).await?;
    let property = state
        .listings
        .create(viewer_from(&parts), payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(ListingMutationResponse {
        notice: Notice::success("Property listed successfully"),
        property,
    }))
}

/// Guarded loader for the edit form.
///
/// Runs the same guard as the mutations so a viewer who should not see the
/// form learns the safe redirect before any form data is served.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/edit",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Editable listing", body = Property),
        (status = 403, description = "Guard rejection; details.redirect names the safe route", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "getListingForEdit"
)]
#[get("/properties/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let parts = state.viewer_parts(&session).await?;
    let property = state
        .listings
        .fetch_for_edit(viewer_from(&parts), &id)
        .await?;
    Ok(HttpResponse::Ok().json(property))
}

/// Replace the editable fields of a listing.
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ListingDraft,
    responses(
        (status = 200, description = "Listing updated", body = ListingMutationResponse),
        (status = 403, description = "Guard rejection", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/properties/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ListingDraft>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let parts = state.viewer_parts(&session).await?;
    let property = state
        .listings
        .update(viewer_from(&parts), &id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ListingMutationResponse {
        notice: Notice::success("Property updated successfully"),
        property,
    }))
}

/// Change a listing's lifecycle status.
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}/status",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = StatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ListingMutationResponse),
        (status = 400, description = "Unknown status", body = crate::domain::Error),
        (status = 403, description = "Guard rejection", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "changeListingStatus"
)]
#[put("/properties/{id}/status")]
pub async fn change_status(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<StatusRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let status = parse_status(&payload.status)?;
    let parts = state.viewer_parts(&session).await?;
    let property = state
        .listings
        .change_status(viewer_from(&parts), &id, status)
        .await?;

    Ok(HttpResponse::Ok().json(ListingMutationResponse {
        notice: Notice::success(format!("Property marked as {status}")),
        property,
    }))
}

/// Remove a listing.
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Listing removed", body = ListingDeletedResponse),
        (status = 403, description = "Guard rejection", body = crate::domain::Error)
    ),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/properties/{id}")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let parts = state.viewer_parts(&session).await?;
    state.listings.delete(viewer_from(&parts), &id).await?;

    Ok(HttpResponse::Ok().json(ListingDeletedResponse {
        notice: Notice::success("Property deleted"),
    }))
}
