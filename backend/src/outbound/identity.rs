//! Reqwest-backed identity provider adapter.
//!
//! Accounts live with an external auth API (GoTrue-style): signup posts the
//! email/password pair, sign-in exchanges it for a session whose user record
//! carries the stable account id. Only the user id and email are consumed;
//! provider tokens are not stored because sessions are minted locally.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::domain::ports::{CredentialsService, CredentialsServiceError};
use crate::domain::{Credentials, Principal, ProfileId};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Identity adapter performing HTTP requests against one auth API.
pub struct RestIdentity {
    client: Client,
    base_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct AuthUserDto {
    id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponseDto {
    user: AuthUserDto,
}

impl RestIdentity {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(
            base_url,
            api_key,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        )
    }

    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_timeout(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
        signup: bool,
    ) -> Result<Principal, CredentialsServiceError> {
        let url = self.base_url.join(path).map_err(|error| {
            CredentialsServiceError::unavailable(format!("invalid auth url for {path}: {error}"))
        })?;
        let response = self
            .client
            .post(url)
            .header("apikey", self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&serde_json::json!({
                "email": credentials.email(),
                "password": credentials.password(),
            }))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, signup, credentials.email()));
        }

        parse_principal(body.as_ref())
    }
}

fn parse_principal(body: &[u8]) -> Result<Principal, CredentialsServiceError> {
    let decoded: AuthResponseDto = serde_json::from_slice(body).map_err(|error| {
        CredentialsServiceError::unavailable(format!("invalid auth payload: {error}"))
    })?;
    let id = ProfileId::new(&decoded.user.id).map_err(|error| {
        CredentialsServiceError::unavailable(format!("malformed account id: {error}"))
    })?;
    Ok(Principal {
        id,
        email: decoded.user.email,
    })
}

fn map_transport_error(error: reqwest::Error) -> CredentialsServiceError {
    CredentialsServiceError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, signup: bool, email: &str) -> CredentialsServiceError {
    match status {
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY if signup => {
            CredentialsServiceError::email_taken(email)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CredentialsServiceError::invalid_credentials()
        }
        _ => CredentialsServiceError::unavailable(format!("status {}", status.as_u16())),
    }
}

#[async_trait]
impl CredentialsService for RestIdentity {
    async fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError> {
        self.post_credentials("signup", credentials, true).await
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError> {
        self.post_credentials("token?grant_type=password", credentials, false)
            .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network auth mapping helpers.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    #[case::signup_conflict(StatusCode::CONFLICT, true, "EmailTaken")]
    #[case::signup_unprocessable(StatusCode::UNPROCESSABLE_ENTITY, true, "EmailTaken")]
    #[case::login_bad_request(StatusCode::BAD_REQUEST, false, "InvalidCredentials")]
    #[case::login_unauthorised(StatusCode::UNAUTHORIZED, false, "InvalidCredentials")]
    #[case::login_conflict(StatusCode::CONFLICT, false, "Unavailable")]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, true, "Unavailable")]
    fn maps_provider_statuses(
        #[case] status: StatusCode,
        #[case] signup: bool,
        #[case] expected: &str,
    ) {
        let error = map_status_error(status, signup, "dana@example.com");
        match expected {
            "EmailTaken" => assert!(matches!(
                error,
                CredentialsServiceError::EmailTaken { .. }
            )),
            "InvalidCredentials" => assert!(matches!(
                error,
                CredentialsServiceError::InvalidCredentials
            )),
            "Unavailable" => assert!(matches!(
                error,
                CredentialsServiceError::Unavailable { .. }
            )),
            _ => panic!("unsupported test expectation: {expected}"),
        }
    }

    #[test]
    fn parses_the_provider_user_record() {
        let id = Uuid::new_v4();
        let body = format!(
            r#"{{ "user": {{ "id": "{id}", "email": "dana@example.com" }}, "access_token": "ignored" }}"#
        );
        let principal = parse_principal(body.as_bytes()).expect("valid payload");
        assert_eq!(principal.id.to_string(), id.to_string());
        assert_eq!(principal.email, "dana@example.com");
    }

    #[test]
    fn rejects_malformed_account_ids() {
        let body = br#"{ "user": { "id": "not-a-uuid", "email": "dana@example.com" } }"#;
        let error = parse_principal(body).expect_err("malformed id");
        assert!(matches!(error, CredentialsServiceError::Unavailable { .. }));
    }
}
