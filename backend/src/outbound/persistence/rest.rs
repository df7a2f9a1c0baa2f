//! Reqwest-backed persistence adapter.
//!
//! Talks to a PostgREST-style data API: one resource per table, filters
//! passed as `column=eq.value` query parameters, mutations acknowledged with
//! `Prefer: return=representation` so missing rows are detectable. The
//! adapter owns transport details only: request serialisation, timeout and
//! HTTP error mapping, and JSON decoding into domain records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::rows::{ProfileRow, PropertyRow, ReviewRow};
use crate::domain::ports::{
    ProfileRepository, ProfileRepositoryError, PropertyRepository, PropertyRepositoryError,
    ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{Profile, ProfileId, Property, PropertyId, PropertyStatus, Review};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

const PROPERTIES_TABLE: &str = "properties";
const REVIEWS_TABLE: &str = "reviews";
const PROFILES_TABLE: &str = "profiles";

/// Transport-level failures, mapped into each port's error type at the seam.
#[derive(Debug)]
enum RestError {
    Connection(String),
    Query(String),
    Decode(String),
}

/// Persistence adapter performing HTTP requests against one data API.
///
/// Implements all three repository ports so one shared instance can back the
/// whole service layer.
pub struct RestPersistence {
    client: Client,
    base_url: Url,
    service_key: String,
}

impl RestPersistence {
    /// Build an adapter with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, service_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(
            base_url,
            service_key,
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
        service_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            service_key: service_key.into(),
        })
    }

    fn table_url(&self, table: &str, filters: &[(&str, String)]) -> Result<Url, RestError> {
        let mut url = self
            .base_url
            .join(table)
            .map_err(|error| RestError::Query(format!("invalid table url for {table}: {error}")))?;
        if !filters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in filters {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    fn authorised(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", self.service_key.as_str())
            .bearer_auth(self.service_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn fetch_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, RestError> {
        let url = self.table_url(table, filters)?;
        let response = self
            .authorised(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = read_success_body(response).await?;
        serde_json::from_slice(&body)
            .map_err(|error| RestError::Decode(format!("invalid {table} payload: {error}")))
    }

    async fn insert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<(), RestError> {
        let url = self.table_url(table, &[])?;
        let response = self
            .authorised(self.client.post(url))
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;
        read_success_body(response).await?;
        Ok(())
    }

    /// Patch rows matching `filters`; returns the number of rows affected.
    async fn patch_rows<T: Serialize>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        row: &T,
    ) -> Result<usize, RestError> {
        let url = self.table_url(table, filters)?;
        let response = self
            .authorised(self.client.patch(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = read_success_body(response).await?;
        affected_rows(table, &body)
    }

    /// Delete rows matching `filters`; returns the number of rows affected.
    async fn delete_rows(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<usize, RestError> {
        let url = self.table_url(table, filters)?;
        let response = self
            .authorised(self.client.delete(url))
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(map_transport_error)?;
        let body = read_success_body(response).await?;
        affected_rows(table, &body)
    }
}

async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, RestError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn affected_rows(table: &str, body: &[u8]) -> Result<usize, RestError> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|error| RestError::Decode(format!("invalid {table} payload: {error}")))?;
    Ok(rows.len())
}

fn map_transport_error(error: reqwest::Error) -> RestError {
    if error.is_connect() || error.is_timeout() {
        RestError::Connection(error.to_string())
    } else {
        RestError::Query(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RestError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    match status {
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY | StatusCode::GATEWAY_TIMEOUT => {
            RestError::Connection(message)
        }
        _ => RestError::Query(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

impl From<RestError> for PropertyRepositoryError {
    fn from(value: RestError) -> Self {
        match value {
            RestError::Connection(message) => Self::connection(message),
            RestError::Query(message) | RestError::Decode(message) => Self::query(message),
        }
    }
}

impl From<RestError> for ReviewRepositoryError {
    fn from(value: RestError) -> Self {
        match value {
            RestError::Connection(message) => Self::connection(message),
            RestError::Query(message) | RestError::Decode(message) => Self::query(message),
        }
    }
}

impl From<RestError> for ProfileRepositoryError {
    fn from(value: RestError) -> Self {
        match value {
            RestError::Connection(message) => Self::connection(message),
            RestError::Query(message) | RestError::Decode(message) => Self::query(message),
        }
    }
}

#[async_trait]
impl PropertyRepository for RestPersistence {
    async fn list_by_status(
        &self,
        status: PropertyStatus,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let rows: Vec<PropertyRow> = self
            .fetch_rows(
                PROPERTIES_TABLE,
                &[
                    ("status", eq(status)),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(PropertyRepositoryError::query))
            .collect()
    }

    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let mut rows: Vec<PropertyRow> = self
            .fetch_rows(
                PROPERTIES_TABLE,
                &[("id", eq(id)), ("limit", "1".to_owned())],
            )
            .await?;
        rows.pop()
            .map(|row| row.into_domain().map_err(PropertyRepositoryError::query))
            .transpose()
    }

    async fn list_by_landlord(
        &self,
        landlord_id: &ProfileId,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let rows: Vec<PropertyRow> = self
            .fetch_rows(
                PROPERTIES_TABLE,
                &[
                    ("landlord_id", eq(landlord_id)),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(PropertyRepositoryError::query))
            .collect()
    }

    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        self.insert_row(PROPERTIES_TABLE, &PropertyRow::from(property))
            .await?;
        Ok(())
    }

    async fn update(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        let affected = self
            .patch_rows(
                PROPERTIES_TABLE,
                &[("id", eq(&property.id))],
                &PropertyRow::from(property),
            )
            .await?;
        if affected == 0 {
            return Err(PropertyRepositoryError::not_found(property.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), PropertyRepositoryError> {
        let affected = self
            .delete_rows(PROPERTIES_TABLE, &[("id", eq(id))])
            .await?;
        if affected == 0 {
            return Err(PropertyRepositoryError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for RestPersistence {
    async fn list_by_property(
        &self,
        property_id: &PropertyId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let rows: Vec<ReviewRow> = self
            .fetch_rows(
                REVIEWS_TABLE,
                &[
                    ("property_id", eq(property_id)),
                    ("order", "created_at.desc".to_owned()),
                ],
            )
            .await?;
        rows.into_iter()
            .map(|row| row.into_domain().map_err(ReviewRepositoryError::query))
            .collect()
    }

    async fn find_by_property_and_user(
        &self,
        property_id: &PropertyId,
        user_id: &ProfileId,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let mut rows: Vec<ReviewRow> = self
            .fetch_rows(
                REVIEWS_TABLE,
                &[
                    ("property_id", eq(property_id)),
                    ("user_id", eq(user_id)),
                    ("limit", "1".to_owned()),
                ],
            )
            .await?;
        rows.pop()
            .map(|row| row.into_domain().map_err(ReviewRepositoryError::query))
            .transpose()
    }

    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        self.insert_row(REVIEWS_TABLE, &ReviewRow::from(review))
            .await?;
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let affected = self
            .patch_rows(
                REVIEWS_TABLE,
                &[("id", eq(review.id))],
                &ReviewRow::from(review),
            )
            .await?;
        if affected == 0 {
            return Err(ReviewRepositoryError::not_found(review.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ReviewRepositoryError> {
        let affected = self.delete_rows(REVIEWS_TABLE, &[("id", eq(id))]).await?;
        if affected == 0 {
            return Err(ReviewRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for RestPersistence {
    async fn find_by_id(&self, id: &ProfileId)
    -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut rows: Vec<ProfileRow> = self
            .fetch_rows(PROFILES_TABLE, &[("id", eq(id)), ("limit", "1".to_owned())])
            .await?;
        rows.pop()
            .map(|row| row.into_domain().map_err(ProfileRepositoryError::query))
            .transpose()
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        self.insert_row(PROFILES_TABLE, &ProfileRow::from(profile))
            .await?;
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let affected = self
            .patch_rows(
                PROFILES_TABLE,
                &[("id", eq(&profile.id))],
                &ProfileRow::from(profile),
            )
            .await?;
        if affected == 0 {
            return Err(ProfileRepositoryError::not_found(profile.id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::unavailable(StatusCode::SERVICE_UNAVAILABLE, true)]
    #[case::bad_gateway(StatusCode::BAD_GATEWAY, true)]
    #[case::gateway_timeout(StatusCode::GATEWAY_TIMEOUT, true)]
    #[case::bad_request(StatusCode::BAD_REQUEST, false)]
    #[case::server_error(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_http_statuses_to_connection_or_query(
        #[case] status: StatusCode,
        #[case] expect_connection: bool,
    ) {
        let error = map_status_error(status, b"{\"message\":\"schema cache reload\"}");
        match error {
            RestError::Connection(message) => {
                assert!(expect_connection, "{status} should map to Query");
                assert!(message.contains(&status.as_u16().to_string()));
            }
            RestError::Query(message) => {
                assert!(!expect_connection, "{status} should map to Connection");
                assert!(message.contains("schema cache reload"));
            }
            RestError::Decode(_) => panic!("status mapping never yields Decode"),
        }
    }

    #[test]
    fn body_preview_truncates_long_payloads() {
        let body = "x".repeat(400);
        let preview = body_preview(body.as_bytes());
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
    }

    #[test]
    fn decode_failures_become_query_errors_at_the_port() {
        let error: PropertyRepositoryError =
            RestError::Decode("invalid properties payload".to_owned()).into();
        assert!(matches!(error, PropertyRepositoryError::Query { .. }));
    }

    #[test]
    fn affected_rows_counts_representation_entries() {
        let count = affected_rows(PROPERTIES_TABLE, br#"[{"id": "a"}, {"id": "b"}]"#)
            .expect("valid body");
        assert_eq!(count, 2);
        let none = affected_rows(PROPERTIES_TABLE, b"[]").expect("valid body");
        assert_eq!(none, 0);
    }

    #[test]
    fn eq_filter_formats_postgrest_operator() {
        assert_eq!(eq("available"), "eq.available");
    }
}
