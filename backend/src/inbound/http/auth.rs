//! Authentication HTTP handlers.
//!
//! ```text
//! POST /api/v1/auth/signup  Register an account and open a session
//! POST /api/v1/auth/login   Authenticate and open a session
//! POST /api/v1/auth/logout  Drop the session
//! GET  /api/v1/auth/me      Describe the current session
//! ```
//!
//! Accounts live with the external identity provider; the profile row is
//! created here at signup so the two are keyed by the same id.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CredentialsServiceError;
use crate::domain::{Credentials, Error, Notice, Profile, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, viewer_from};
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_role};

/// Signup request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    /// `tenant` or `landlord`; fixed for the lifetime of the account.
    pub role: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session snapshot returned by signup, login and `me`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub can_create_listing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl SessionResponse {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            email: None,
            profile: None,
            can_create_listing: false,
            notice: None,
        }
    }

    fn signed_in(email: String, profile: Profile, notice: Option<Notice>) -> Self {
        Self {
            authenticated: true,
            can_create_listing: profile.is_landlord(),
            email: Some(email),
            profile: Some(profile),
            notice,
        }
    }
}

fn map_credentials_error(error: CredentialsServiceError) -> Error {
    match error {
        CredentialsServiceError::InvalidCredentials => Error::unauthorized("invalid credentials"),
        CredentialsServiceError::EmailTaken { email } => {
            Error::conflict(format!("an account already exists for {email}"))
        }
        CredentialsServiceError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

fn parse_credentials(email: &str, password: &str) -> Result<Credentials, Error> {
    Credentials::try_from_parts(email, password)
        .map_err(|err| Error::invalid_request(err.to_string()))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and session opened", body = SessionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "signup"
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let role = payload
        .role
        .ok_or_else(|| missing_field_error(FieldName::new("role")))
        .and_then(|raw| parse_role(&raw))?;
    let full_name = payload
        .full_name
        .ok_or_else(|| missing_field_error(FieldName::new("fullName")))?;
    let phone = payload.phone.unwrap_or_default();

    let credentials = parse_credentials(&payload.email, &payload.password)?;
    let principal = state
        .credentials
        .sign_up(&credentials)
        .await
        .map_err(map_credentials_error)?;
    let profile = state
        .profiles
        .register(&principal, role, &full_name, &phone)
        .await?;
    session.persist_principal(&principal)?;

    let notice = match role {
        Role::Landlord => Notice::success("Welcome! You can now list properties."),
        Role::Tenant => Notice::success("Welcome! Start browsing properties."),
    };
    Ok(HttpResponse::Created().json(SessionResponse::signed_in(
        principal.email,
        profile,
        Some(notice),
    )))
}

/// Authenticate an existing account.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session opened", body = SessionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login"
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = parse_credentials(&payload.email, &payload.password)?;
    let principal = state
        .credentials
        .sign_in(&credentials)
        .await
        .map_err(map_credentials_error)?;
    let profile = state.profiles.fetch(&principal).await?;
    session.persist_principal(&principal)?;

    Ok(HttpResponse::Ok().json(SessionResponse::signed_in(principal.email, profile, None)))
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Session cleared", body = SessionResponse)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> ApiResult<HttpResponse> {
    session.clear();
    Ok(HttpResponse::Ok().json(SessionResponse::anonymous()))
}

/// Describe the current session.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Session snapshot", body = SessionResponse)
    ),
    tags = ["auth"],
    operation_id = "whoAmI"
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let parts = state.viewer_parts(&session).await?;
    let can_create = viewer_from(&parts).can_create_listing();
    let response = match parts {
        Some((principal, profile)) => SessionResponse {
            authenticated: true,
            email: Some(principal.email),
            profile: Some(profile),
            can_create_listing: can_create,
            notice: None,
        },
        None => SessionResponse::anonymous(),
    };
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn invalid_credentials_map_to_unauthorised() {
        let err = map_credentials_error(CredentialsServiceError::InvalidCredentials);
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn duplicate_emails_map_to_conflict() {
        let err = map_credentials_error(CredentialsServiceError::email_taken("dana@example.com"));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    fn provider_outages_map_to_service_unavailable() {
        let err = map_credentials_error(CredentialsServiceError::unavailable("timeout"));
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[case("", "pw")]
    #[case("not-an-email", "pw")]
    #[case("dana@example.com", "")]
    fn malformed_credentials_are_invalid_requests(#[case] email: &str, #[case] password: &str) {
        let err = parse_credentials(email, password).expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
