//! Profile use-cases: register at signup, fetch, update contact details.

use std::sync::Arc;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Error, Principal, Profile, Role};

/// Profile use-cases over a profile repository.
pub struct ProfilesService<P: ?Sized> {
    profiles: Arc<P>,
}

impl<P: ?Sized> Clone for ProfilesService<P> {
    fn clone(&self) -> Self {
        Self {
            profiles: Arc::clone(&self.profiles),
        }
    }
}

impl<P: ?Sized> ProfilesService<P> {
    /// Create a new service over the given repository.
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

impl<P> ProfilesService<P>
where
    P: ProfileRepository + ?Sized,
{
    fn map_repository_error(error: ProfileRepositoryError) -> Error {
        match error {
            ProfileRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("profile repository unavailable: {message}"))
            }
            ProfileRepositoryError::Query { message } => {
                Error::internal(format!("profile repository error: {message}"))
            }
            ProfileRepositoryError::NotFound { id } => {
                Error::not_found(format!("profile not found: {id}"))
            }
        }
    }

    /// Create the profile row for a freshly registered principal.
    ///
    /// The role is fixed here for the lifetime of the account.
    pub async fn register(
        &self,
        principal: &Principal,
        role: Role,
        full_name: &str,
        phone: &str,
    ) -> Result<Profile, Error> {
        let profile = Profile::new(principal.id.clone(), role, full_name, phone)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.profiles
            .insert(&profile)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(profile)
    }

    /// The profile belonging to `principal`.
    pub async fn fetch(&self, principal: &Principal) -> Result<Profile, Error> {
        self.profiles
            .find_by_id(&principal.id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("profile not found: {}", principal.id)))
    }

    /// Update the contact details on the principal's own profile.
    ///
    /// Only `full_name` and `phone` are writable; the role never changes.
    pub async fn update_contact(
        &self,
        principal: &Principal,
        full_name: &str,
        phone: &str,
    ) -> Result<Profile, Error> {
        if full_name.trim().is_empty() {
            return Err(Error::invalid_request("full name must not be empty"));
        }

        let mut profile = self.fetch(principal).await?;
        profile.full_name = full_name.to_owned();
        profile.phone = phone.to_owned();
        profile.updated_at = chrono::Utc::now();

        self.profiles
            .update(&profile)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(profile)
    }
}
