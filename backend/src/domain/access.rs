//! Authorisation and view-state derivation.
//!
//! Rather than scattering boolean role checks through handlers, the viewer's
//! relationship to a listing is classified once into a small state type and
//! capabilities are read off it. The edit-route guard lives here too: it
//! runs before any mutating form data is served, and again inside mutation
//! handlers in case the session changed between load and submit.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::profile::{Profile, ProfileId, Role};
use super::property::Property;

/// The authenticated identity issuing a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Identity key, shared with the profile.
    pub id: ProfileId,
    /// Email address held by the identity provider.
    pub email: String,
}

/// The current viewer: anonymous, or a principal with its profile.
#[derive(Debug, Clone, Copy)]
pub enum Viewer<'a> {
    /// No session.
    Anonymous,
    /// Authenticated principal and the matching profile row.
    SignedIn {
        /// Session identity.
        principal: &'a Principal,
        /// Account record for the principal.
        profile: &'a Profile,
    },
}

impl<'a> Viewer<'a> {
    /// Build a viewer from optional session parts.
    pub fn from_parts(parts: Option<(&'a Principal, &'a Profile)>) -> Self {
        match parts {
            Some((principal, profile)) => Self::SignedIn { principal, profile },
            None => Self::Anonymous,
        }
    }

    /// The viewer's profile id, when signed in.
    pub fn profile_id(&self) -> Option<&ProfileId> {
        match self {
            Self::Anonymous => None,
            Self::SignedIn { principal, .. } => Some(&principal.id),
        }
    }

    /// Landlords gain the global capability to create listings; tenants and
    /// anonymous viewers never do.
    pub fn can_create_listing(&self) -> bool {
        matches!(
            self,
            Self::SignedIn { profile, .. } if profile.role == Role::Landlord
        )
    }

    /// Any signed-in viewer may review; anonymous viewers are directed to
    /// log in first.
    pub fn can_review(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }
}

/// Per-listing view state from the current viewer's standpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ListingAccess {
    /// Anonymous viewer: read-only.
    Public,
    /// Authenticated tenant: read-only, may review.
    TenantBrowsing,
    /// Authenticated landlord who does not own this listing.
    LandlordBrowsing,
    /// The owning landlord: may edit fields and change status.
    OwnerManaging,
}

impl ListingAccess {
    /// Classify the viewer's relationship to `property`.
    ///
    /// # Examples
    /// ```
    /// use hearth::domain::{ListingAccess, Principal, Profile, ProfileId, Property, Role, Viewer};
    ///
    /// let owner = Profile::new(ProfileId::random(), Role::Landlord, "Dana Hart", "").unwrap();
    /// let principal = Principal { id: owner.id.clone(), email: "dana@example.com".into() };
    /// let property = Property::builder(&owner, &principal.email).build();
    ///
    /// let viewer = Viewer::SignedIn { principal: &principal, profile: &owner };
    /// assert_eq!(
    ///     ListingAccess::classify(viewer, &property),
    ///     ListingAccess::OwnerManaging
    /// );
    /// ```
    pub fn classify(viewer: Viewer<'_>, property: &Property) -> Self {
        match viewer {
            Viewer::Anonymous => Self::Public,
            Viewer::SignedIn { principal, profile } => match profile.role {
                Role::Tenant => Self::TenantBrowsing,
                Role::Landlord if property.landlord_id == principal.id => Self::OwnerManaging,
                Role::Landlord => Self::LandlordBrowsing,
            },
        }
    }

    /// Whether the viewer may edit the listing's fields.
    pub fn can_edit(self) -> bool {
        self == Self::OwnerManaging
    }

    /// Whether the viewer may change the listing's lifecycle status.
    pub fn can_change_status(self) -> bool {
        self == Self::OwnerManaging
    }
}

/// Safe route a rejected viewer is sent to instead of the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditRedirect {
    /// Viewer is anonymous or not a landlord.
    Home,
    /// Listing is missing or owned by someone else.
    Profile,
}

impl EditRedirect {
    /// Client-side path for the redirect.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Profile => "/profile",
        }
    }
}

/// Evaluate the edit-route guard.
///
/// Role is checked before the listing is even considered, mirroring the
/// route guard that runs before the fetch; a missing or foreign listing
/// sends the viewer back to their profile. The guard never mutates records.
pub fn guard_edit(viewer: Viewer<'_>, property: Option<&Property>) -> Result<(), EditRedirect> {
    let Viewer::SignedIn { principal, profile } = viewer else {
        return Err(EditRedirect::Home);
    };
    if profile.role != Role::Landlord {
        return Err(EditRedirect::Home);
    }
    match property {
        Some(p) if p.landlord_id == principal.id => Ok(()),
        _ => Err(EditRedirect::Profile),
    }
}
