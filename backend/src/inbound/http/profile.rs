//! Profile HTTP handlers.
//!
//! ```text
//! GET /api/v1/profile  Own profile; landlords also get their portfolio
//! PUT /api/v1/profile  Update contact details
//! ```

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Notice, Profile, Property};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};

/// Profile page response.
///
/// `portfolio` lists the landlord's own properties across every status,
/// newest first; tenants get an empty list.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub profile: Profile,
    pub email: String,
    pub portfolio: Vec<Property>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Contact-details update body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Fetch the viewer's profile and portfolio.
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "Profile and portfolio", body = ProfileResponse),
        (status = 401, description = "No session", body = crate::domain::Error)
    ),
    tags = ["profile"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn fetch(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let profile = state.profiles.fetch(&principal).await?;
    let portfolio = if profile.is_landlord() {
        state.listings.portfolio(&profile).await?
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile,
        email: principal.email,
        portfolio,
        notice: None,
    }))
}

/// Update the viewer's contact details.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = crate::domain::Error),
        (status = 401, description = "No session", body = crate::domain::Error)
    ),
    tags = ["profile"],
    operation_id = "updateProfile"
)]
#[put("/profile")]
pub async fn update(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_principal()?;
    let payload = payload.into_inner();
    let full_name = payload
        .full_name
        .ok_or_else(|| missing_field_error(FieldName::new("fullName")))?;
    let phone = payload.phone.unwrap_or_default();

    let profile = state
        .profiles
        .update_contact(&principal, &full_name, &phone)
        .await?;
    let portfolio = if profile.is_landlord() {
        state.listings.portfolio(&profile).await?
    } else {
        Vec::new()
    };

    Ok(HttpResponse::Ok().json(ProfileResponse {
        profile,
        email: principal.email,
        portfolio,
        notice: Some(Notice::success("Profile updated successfully")),
    }))
}
