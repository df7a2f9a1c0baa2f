//! Review HTTP handlers.
//!
//! ```text
//! GET    /api/v1/properties/{id}/reviews  Review board for a listing
//! PUT    /api/v1/properties/{id}/reviews  Submit (insert or update) own review
//! DELETE /api/v1/properties/{id}/reviews  Remove own review
//! ```
//!
//! PUT is deliberately idempotent per (property, viewer): resubmitting
//! replaces the viewer's earlier review instead of growing the board.

use actix_web::{HttpResponse, delete, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Notice, Review, ReviewBoard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, viewer_from};
use crate::inbound::http::validation::{parse_property_id, parse_rating};

/// Review submission body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    /// Stars, 1 to 5 inclusive.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// Submission response: the stored review plus a notice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub review: Review,
    /// `true` when a new review was inserted rather than updated.
    pub created: bool,
    pub notice: Notice,
}

/// Deletion response carrying only the notice.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDeletedResponse {
    pub notice: Notice,
}

/// The review board for a listing.
#[utoipa::path(
    get,
    path = "/api/v1/properties/{id}/reviews",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Review board", body = ReviewBoard),
        (status = 404, description = "Listing not found", body = crate::domain::Error)
    ),
    tags = ["reviews"],
    operation_id = "getReviews"
)]
#[get("/properties/{id}/reviews")]
pub async fn board(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let parts = state.viewer_parts(&session).await?;
    let board = state.reviews.board(viewer_from(&parts), &id).await?;
    Ok(HttpResponse::Ok().json(board))
}

/// Submit the viewer's review of a listing.
#[utoipa::path(
    put,
    path = "/api/v1/properties/{id}/reviews",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = SubmitReviewRequest,
    responses(
        (status = 200, description = "Existing review updated", body = SubmitReviewResponse),
        (status = 201, description = "Review created", body = SubmitReviewResponse),
        (status = 400, description = "Rating out of range", body = crate::domain::Error),
        (status = 401, description = "No session", body = crate::domain::Error),
        (status = 404, description = "Listing not found", body = crate::domain::Error)
    ),
    tags = ["reviews"],
    operation_id = "submitReview"
)]
#[put("/properties/{id}/reviews")]
pub async fn submit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SubmitReviewRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let rating = parse_rating(payload.rating)?;
    let parts = state.viewer_parts(&session).await?;
    let outcome = state
        .reviews
        .submit(viewer_from(&parts), &id, rating, payload.comment.clone())
        .await?;

    let mut response = if outcome.created {
        HttpResponse::Created()
    } else {
        HttpResponse::Ok()
    };
    let notice = if outcome.created {
        Notice::success("Review submitted")
    } else {
        Notice::success("Review updated")
    };
    Ok(response.json(SubmitReviewResponse {
        review: outcome.review,
        created: outcome.created,
        notice,
    }))
}

/// Remove the viewer's review of a listing.
#[utoipa::path(
    delete,
    path = "/api/v1/properties/{id}/reviews",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 200, description = "Review removed", body = ReviewDeletedResponse),
        (status = 401, description = "No session", body = crate::domain::Error),
        (status = 404, description = "No review to remove", body = crate::domain::Error)
    ),
    tags = ["reviews"],
    operation_id = "deleteReview"
)]
#[delete("/properties/{id}/reviews")]
pub async fn remove(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_property_id(&path.into_inner())?;
    let parts = state.viewer_parts(&session).await?;
    state.reviews.remove(viewer_from(&parts), &id).await?;

    Ok(HttpResponse::Ok().json(ReviewDeletedResponse {
        notice: Notice::success("Review removed"),
    }))
}
