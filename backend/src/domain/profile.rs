//! Account profiles and roles.
//!
//! A profile is the per-principal account record carrying the role and
//! contact details. It is created at signup and mutated only by its owner;
//! the role is fixed for the lifetime of the account.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned when constructing profile values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    /// Identifier was empty.
    EmptyId,
    /// Identifier was not a valid UUID.
    InvalidId,
    /// Full name was missing or blank once trimmed.
    EmptyFullName,
}

impl fmt::Display for ProfileValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "profile id must not be empty"),
            Self::InvalidId => write!(f, "profile id must be a valid UUID"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
        }
    }
}

impl std::error::Error for ProfileValidationError {}

/// Stable profile identifier, 1:1 with the session principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileId(Uuid, String);

impl ProfileId {
    /// Validate and construct a [`ProfileId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ProfileValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`ProfileId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, ProfileValidationError> {
        if id.is_empty() {
            return Err(ProfileValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(ProfileValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| ProfileValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for ProfileId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ProfileId> for String {
    fn from(value: ProfileId) -> Self {
        let ProfileId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for ProfileId {
    type Error = ProfileValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Account role. Landlords may list properties; tenants only browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses and reviews listings.
    Tenant,
    /// Owns and manages listings.
    Landlord,
}

impl Role {
    /// Returns the persisted string representation.
    ///
    /// # Examples
    ///
    /// ```
    /// # use hearth::domain::Role;
    /// assert_eq!(Role::Tenant.as_str(), "tenant");
    /// assert_eq!(Role::Landlord.as_str(), "landlord");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "tenant",
            Self::Landlord => "landlord",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// The unrecognised input value.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role: {}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tenant" => Ok(Self::Tenant),
            "landlord" => Ok(Self::Landlord),
            _ => Err(ParseRoleError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Per-principal account record.
///
/// ## Invariants
/// - `full_name` is non-empty once trimmed.
/// - `role` never changes after signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Identity key shared with the session principal.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: ProfileId,
    /// Account role.
    pub role: Role,
    /// Display and contact name.
    pub full_name: String,
    /// Contact phone number; free text, may be empty.
    pub phone: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Construct a profile, validating the full name.
    pub fn new(
        id: ProfileId,
        role: Role,
        full_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ProfileValidationError> {
        let full_name = full_name.into();
        if full_name.trim().is_empty() {
            return Err(ProfileValidationError::EmptyFullName);
        }
        let now = Utc::now();
        Ok(Self {
            id,
            role,
            full_name,
            phone: phone.into(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether this account may create and manage listings.
    pub fn is_landlord(&self) -> bool {
        self.role == Role::Landlord
    }
}
