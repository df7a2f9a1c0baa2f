//! In-memory adapters for development and integration tests.
//!
//! Backed by `tokio::sync::RwLock`ed collections; rows survive only for the
//! process lifetime. Listing queries honour the newest-first ordering the
//! repository ports require.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::ports::{
    CredentialsService, CredentialsServiceError, ProfileRepository, ProfileRepositoryError,
    PropertyRepository, PropertyRepositoryError, ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{
    Credentials, Principal, Profile, ProfileId, Property, PropertyId, PropertyStatus, Review,
};

/// Volatile storage implementing all three repository ports.
#[derive(Default)]
pub struct InMemoryPersistence {
    properties: RwLock<Vec<Property>>,
    reviews: RwLock<Vec<Review>>,
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryPersistence {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut rows: Vec<Property>) -> Vec<Property> {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}

#[async_trait]
impl PropertyRepository for InMemoryPersistence {
    async fn list_by_status(
        &self,
        status: PropertyStatus,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let rows = self.properties.read().await;
        Ok(newest_first(
            rows.iter()
                .filter(|property| property.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_id(
        &self,
        id: &PropertyId,
    ) -> Result<Option<Property>, PropertyRepositoryError> {
        let rows = self.properties.read().await;
        Ok(rows.iter().find(|property| &property.id == id).cloned())
    }

    async fn list_by_landlord(
        &self,
        landlord_id: &ProfileId,
    ) -> Result<Vec<Property>, PropertyRepositoryError> {
        let rows = self.properties.read().await;
        Ok(newest_first(
            rows.iter()
                .filter(|property| &property.landlord_id == landlord_id)
                .cloned()
                .collect(),
        ))
    }

    async fn insert(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        let mut rows = self.properties.write().await;
        rows.push(property.clone());
        Ok(())
    }

    async fn update(&self, property: &Property) -> Result<(), PropertyRepositoryError> {
        let mut rows = self.properties.write().await;
        match rows.iter_mut().find(|row| row.id == property.id) {
            Some(row) => {
                *row = property.clone();
                Ok(())
            }
            None => Err(PropertyRepositoryError::not_found(property.id.to_string())),
        }
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), PropertyRepositoryError> {
        let mut rows = self.properties.write().await;
        let before = rows.len();
        rows.retain(|row| &row.id != id);
        if rows.len() == before {
            return Err(PropertyRepositoryError::not_found(id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryPersistence {
    async fn list_by_property(
        &self,
        property_id: &PropertyId,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let rows = self.reviews.read().await;
        let mut matched: Vec<Review> = rows
            .iter()
            .filter(|review| &review.property_id == property_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched)
    }

    async fn find_by_property_and_user(
        &self,
        property_id: &PropertyId,
        user_id: &ProfileId,
    ) -> Result<Option<Review>, ReviewRepositoryError> {
        let rows = self.reviews.read().await;
        Ok(rows
            .iter()
            .find(|review| &review.property_id == property_id && &review.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut rows = self.reviews.write().await;
        rows.push(review.clone());
        Ok(())
    }

    async fn update(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let mut rows = self.reviews.write().await;
        match rows.iter_mut().find(|row| row.id == review.id) {
            Some(row) => {
                *row = review.clone();
                Ok(())
            }
            None => Err(ReviewRepositoryError::not_found(review.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ReviewRepositoryError> {
        let mut rows = self.reviews.write().await;
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(ReviewRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryPersistence {
    async fn find_by_id(&self, id: &ProfileId)
    -> Result<Option<Profile>, ProfileRepositoryError> {
        let rows = self.profiles.read().await;
        Ok(rows.get(id.as_ref()).cloned())
    }

    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut rows = self.profiles.write().await;
        rows.insert(profile.id.to_string(), profile.clone());
        Ok(())
    }

    async fn update(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut rows = self.profiles.write().await;
        match rows.get_mut(profile.id.as_ref()) {
            Some(row) => {
                *row = profile.clone();
                Ok(())
            }
            None => Err(ProfileRepositoryError::not_found(profile.id.to_string())),
        }
    }
}

struct StoredAccount {
    password: String,
    principal: Principal,
}

/// Volatile identity provider keyed by normalised email.
///
/// Passwords are compared in plain text; this adapter exists for tests and
/// local development only.
#[derive(Default)]
pub struct InMemoryCredentials {
    accounts: RwLock<HashMap<String, StoredAccount>>,
}

impl InMemoryCredentials {
    /// Create an empty account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialsService for InMemoryCredentials {
    async fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(credentials.email()) {
            return Err(CredentialsServiceError::email_taken(credentials.email()));
        }

        let principal = Principal {
            id: ProfileId::random(),
            email: credentials.email().to_owned(),
        };
        accounts.insert(
            credentials.email().to_owned(),
            StoredAccount {
                password: credentials.password().to_owned(),
                principal: principal.clone(),
            },
        );
        Ok(principal)
    }

    async fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> Result<Principal, CredentialsServiceError> {
        let accounts = self.accounts.read().await;
        match accounts.get(credentials.email()) {
            Some(account) if account.password == credentials.password() => {
                Ok(account.principal.clone())
            }
            _ => Err(CredentialsServiceError::invalid_credentials()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Rating, Role};
    use chrono::Duration;

    fn landlord() -> Profile {
        Profile::new(ProfileId::random(), Role::Landlord, "Dana Hart", "555-0100")
            .expect("valid profile")
    }

    fn listing(owner: &Profile, title: &str) -> Property {
        Property::builder(owner, "dana@example.com")
            .title(title)
            .price(1500)
            .build()
    }

    #[tokio::test]
    async fn listings_come_back_newest_first() {
        let store = InMemoryPersistence::new();
        let owner = landlord();
        let mut older = listing(&owner, "older");
        older.created_at = older.created_at - Duration::hours(1);
        let newer = listing(&owner, "newer");
        PropertyRepository::insert(&store, &older)
            .await
            .expect("insert");
        PropertyRepository::insert(&store, &newer)
            .await
            .expect("insert");

        let rows = store
            .list_by_status(PropertyStatus::Available)
            .await
            .expect("list");
        let titles: Vec<&str> = rows.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);

        let portfolio = store.list_by_landlord(&owner.id).await.expect("list");
        assert_eq!(portfolio.len(), 2);
    }

    #[tokio::test]
    async fn updating_a_missing_listing_fails() {
        let store = InMemoryPersistence::new();
        let property = listing(&landlord(), "ghost");
        let error = PropertyRepository::update(&store, &property)
            .await
            .expect_err("missing row");
        assert!(matches!(error, PropertyRepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deleting_removes_the_listing() {
        let store = InMemoryPersistence::new();
        let property = listing(&landlord(), "short-lived");
        PropertyRepository::insert(&store, &property)
            .await
            .expect("insert");
        PropertyRepository::delete(&store, &property.id)
            .await
            .expect("delete");
        assert!(matches!(
            PropertyRepository::delete(&store, &property.id).await,
            Err(PropertyRepositoryError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn reviews_are_scoped_to_their_property() {
        let store = InMemoryPersistence::new();
        let property_id = PropertyId::random();
        let other_property = PropertyId::random();
        let author = ProfileId::random();
        let rating = Rating::try_new(4).expect("valid rating");
        let review = Review::new(property_id.clone(), author.clone(), rating, "Nice", "Ira");
        let unrelated = Review::new(other_property, ProfileId::random(), rating, "Meh", "Lee");
        ReviewRepository::insert(&store, &review)
            .await
            .expect("insert");
        ReviewRepository::insert(&store, &unrelated)
            .await
            .expect("insert");

        let board = store.list_by_property(&property_id).await.expect("list");
        assert_eq!(board.len(), 1);
        let own = store
            .find_by_property_and_user(&property_id, &author)
            .await
            .expect("lookup");
        assert_eq!(own.map(|r| r.id), Some(review.id));
    }

    #[tokio::test]
    async fn profile_round_trip() {
        let store = InMemoryPersistence::new();
        let mut profile = landlord();
        ProfileRepository::insert(&store, &profile)
            .await
            .expect("insert");
        profile.phone = "555-0199".to_owned();
        ProfileRepository::update(&store, &profile)
            .await
            .expect("update");

        let fetched = ProfileRepository::find_by_id(&store, &profile.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(fetched.phone, "555-0199");
    }

    #[tokio::test]
    async fn duplicate_signup_is_rejected() {
        let provider = InMemoryCredentials::new();
        let creds = Credentials::try_from_parts("dana@example.com", "hunter2").expect("valid");
        provider.sign_up(&creds).await.expect("first signup");
        let error = provider.sign_up(&creds).await.expect_err("duplicate");
        assert!(matches!(error, CredentialsServiceError::EmailTaken { .. }));
    }

    #[tokio::test]
    async fn sign_in_checks_the_password() {
        let provider = InMemoryCredentials::new();
        let creds = Credentials::try_from_parts("dana@example.com", "hunter2").expect("valid");
        let principal = provider.sign_up(&creds).await.expect("signup");

        let ok = provider.sign_in(&creds).await.expect("sign in");
        assert_eq!(ok, principal);

        let wrong = Credentials::try_from_parts("dana@example.com", "other").expect("valid");
        assert!(matches!(
            provider.sign_in(&wrong).await,
            Err(CredentialsServiceError::InvalidCredentials)
        ));
    }
}
