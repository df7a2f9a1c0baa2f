//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CredentialsService, ProfileRepository, PropertyRepository, ReviewRepository,
};
use crate::domain::{
    Error, ListingsService, Principal, Profile, ProfilesService, ReviewsService, Viewer,
};
use crate::inbound::http::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// External identity provider.
    pub credentials: Arc<dyn CredentialsService>,
    /// Listing use-cases.
    pub listings: ListingsService<dyn PropertyRepository>,
    /// Review use-cases.
    pub reviews: ReviewsService<dyn ReviewRepository, dyn PropertyRepository>,
    /// Profile use-cases.
    pub profiles: ProfilesService<dyn ProfileRepository>,
}

impl HttpState {
    /// Wire the services over the given adapters.
    pub fn new(
        credentials: Arc<dyn CredentialsService>,
        properties: Arc<dyn PropertyRepository>,
        reviews: Arc<dyn ReviewRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            credentials,
            listings: ListingsService::new(Arc::clone(&properties)),
            reviews: ReviewsService::new(reviews, properties),
            profiles: ProfilesService::new(profiles),
        }
    }

    /// Resolve the session into viewer parts for [`Viewer::from_parts`].
    ///
    /// A session whose principal has no profile row is treated as anonymous
    /// rather than failing the request; the mismatch is logged because it
    /// points at an interrupted signup.
    pub async fn viewer_parts(
        &self,
        session: &SessionContext,
    ) -> Result<Option<(Principal, Profile)>, Error> {
        let Some(principal) = session.principal()? else {
            return Ok(None);
        };
        match self.profiles.fetch(&principal).await {
            Ok(profile) => Ok(Some((principal, profile))),
            Err(err) if err.code() == crate::domain::ErrorCode::NotFound => {
                tracing::warn!(principal = %principal.id, "session principal has no profile");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

/// Borrow owned viewer parts into a [`Viewer`].
pub fn viewer_from(parts: &Option<(Principal, Profile)>) -> Viewer<'_> {
    Viewer::from_parts(parts.as_ref().map(|(principal, profile)| (principal, profile)))
}
