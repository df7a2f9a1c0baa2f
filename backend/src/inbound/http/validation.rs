//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, PropertyId, PropertyStatus, Rating, Role};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

pub(crate) fn parse_rating(value: u8) -> Result<Rating, Error> {
    Rating::try_new(value).map_err(|err| {
        field_error(
            FieldName::new("rating"),
            err.to_string(),
            ErrorCode::InvalidValue,
        )
    })
}

pub(crate) fn parse_role(value: &str) -> Result<Role, Error> {
    Role::from_str(value).map_err(|_| {
        field_error(
            FieldName::new("role"),
            "role must be tenant or landlord".to_owned(),
            ErrorCode::InvalidValue,
        )
    })
}

pub(crate) fn parse_status(value: &str) -> Result<PropertyStatus, Error> {
    PropertyStatus::from_str(value).map_err(|_| {
        field_error(
            FieldName::new("status"),
            "status must be available, rented or maintenance".to_owned(),
            ErrorCode::InvalidValue,
        )
    })
}

/// Parse the `{id}` path segment into a [`PropertyId`].
pub(crate) fn parse_property_id(raw: &str) -> Result<PropertyId, Error> {
    PropertyId::new(raw).map_err(|_| Error::not_found(format!("property not found: {raw}")))
}
