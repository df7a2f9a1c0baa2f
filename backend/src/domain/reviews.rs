//! Review use-cases: read a property's board, submit, remove.
//!
//! Submission upholds the one-review-per-(property, user) invariant by
//! looking the pair up before writing: an existing row is updated in place,
//! otherwise a fresh row is inserted with the author's name snapshotted at
//! write time.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::access::Viewer;
use crate::domain::ports::{
    PropertyRepository, PropertyRepositoryError, ReviewRepository, ReviewRepositoryError,
};
use crate::domain::review::average_rating;
use crate::domain::{Error, PropertyId, Rating, Review};

/// A property's reviews from the current viewer's standpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBoard {
    /// All reviews, newest first.
    pub reviews: Vec<Review>,
    /// Mean rating rounded to one decimal, absent when there are none.
    pub average: Option<f64>,
    /// The viewer's own review, when they have written one.
    pub own: Option<Review>,
    /// Whether the viewer may submit a review.
    pub can_review: bool,
}

// f64 is Eq-safe here: averages come from `average_rating`, never NaN.
impl Eq for ReviewBoard {}

/// Outcome of a review submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedReview {
    /// The stored review after the write.
    pub review: Review,
    /// `true` when a new row was inserted, `false` when an existing one was
    /// updated.
    pub created: bool,
}

/// Review use-cases over the review and property repositories.
pub struct ReviewsService<R: ?Sized, P: ?Sized> {
    reviews: Arc<R>,
    properties: Arc<P>,
}

impl<R: ?Sized, P: ?Sized> Clone for ReviewsService<R, P> {
    fn clone(&self) -> Self {
        Self {
            reviews: Arc::clone(&self.reviews),
            properties: Arc::clone(&self.properties),
        }
    }
}

impl<R: ?Sized, P: ?Sized> ReviewsService<R, P> {
    /// Create a new service over the given repositories.
    pub fn new(reviews: Arc<R>, properties: Arc<P>) -> Self {
        Self {
            reviews,
            properties,
        }
    }
}

impl<R, P> ReviewsService<R, P>
where
    R: ReviewRepository + ?Sized,
    P: PropertyRepository + ?Sized,
{
    fn map_review_error(error: ReviewRepositoryError) -> Error {
        match error {
            ReviewRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("review repository unavailable: {message}"))
            }
            ReviewRepositoryError::Query { message } => {
                Error::internal(format!("review repository error: {message}"))
            }
            ReviewRepositoryError::NotFound { id } => {
                Error::not_found(format!("review not found: {id}"))
            }
        }
    }

    fn map_property_error(error: PropertyRepositoryError) -> Error {
        match error {
            PropertyRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("property repository unavailable: {message}"))
            }
            PropertyRepositoryError::Query { message } => {
                Error::internal(format!("property repository error: {message}"))
            }
            PropertyRepositoryError::NotFound { id } => {
                Error::not_found(format!("property not found: {id}"))
            }
        }
    }

    async fn require_property(&self, property_id: &PropertyId) -> Result<(), Error> {
        let found = self
            .properties
            .find_by_id(property_id)
            .await
            .map_err(Self::map_property_error)?;
        if found.is_none() {
            return Err(Error::not_found(format!(
                "property not found: {property_id}"
            )));
        }
        Ok(())
    }

    /// The review board for a property.
    ///
    /// Anonymous viewers see the reviews and the average but cannot submit;
    /// signed-in viewers additionally get their own review extracted for
    /// pre-filling the form.
    pub async fn board(
        &self,
        viewer: Viewer<'_>,
        property_id: &PropertyId,
    ) -> Result<ReviewBoard, Error> {
        self.require_property(property_id).await?;
        let reviews = self
            .reviews
            .list_by_property(property_id)
            .await
            .map_err(Self::map_review_error)?;

        let own = viewer.profile_id().and_then(|id| {
            reviews
                .iter()
                .find(|review| review.user_id == *id)
                .cloned()
        });

        Ok(ReviewBoard {
            average: average_rating(&reviews),
            own,
            can_review: viewer.can_review(),
            reviews,
        })
    }

    /// Submit a review, inserting or updating the viewer's row.
    pub async fn submit(
        &self,
        viewer: Viewer<'_>,
        property_id: &PropertyId,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Result<SubmittedReview, Error> {
        let Viewer::SignedIn { principal, profile } = viewer else {
            return Err(Error::unauthorized("sign in to review a property"));
        };
        self.require_property(property_id).await?;

        let existing = self
            .reviews
            .find_by_property_and_user(property_id, &principal.id)
            .await
            .map_err(Self::map_review_error)?;

        match existing {
            Some(mut review) => {
                review.rating = rating;
                review.comment = comment.into();
                review.updated_at = chrono::Utc::now();
                self.reviews
                    .update(&review)
                    .await
                    .map_err(Self::map_review_error)?;
                Ok(SubmittedReview {
                    review,
                    created: false,
                })
            }
            None => {
                let review = Review::new(
                    property_id.clone(),
                    principal.id.clone(),
                    rating,
                    comment,
                    profile.full_name.clone(),
                );
                self.reviews
                    .insert(&review)
                    .await
                    .map_err(Self::map_review_error)?;
                Ok(SubmittedReview {
                    review,
                    created: true,
                })
            }
        }
    }

    /// Remove the viewer's review of a property.
    pub async fn remove(&self, viewer: Viewer<'_>, property_id: &PropertyId) -> Result<(), Error> {
        let Viewer::SignedIn { principal, .. } = viewer else {
            return Err(Error::unauthorized("sign in to remove a review"));
        };

        let existing = self
            .reviews
            .find_by_property_and_user(property_id, &principal.id)
            .await
            .map_err(Self::map_review_error)?;
        let Some(review) = existing else {
            return Err(Error::not_found("you have not reviewed this property"));
        };

        self.reviews
            .delete(review.id)
            .await
            .map_err(Self::map_review_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockPropertyRepository, MockReviewRepository};
    use crate::domain::{ErrorCode, Principal, Profile, ProfileId, Property, Role};
    use rstest::rstest;

    fn tenant() -> Profile {
        Profile::new(ProfileId::random(), Role::Tenant, "Ira Voss", "").expect("valid profile")
    }

    fn principal_for(profile: &Profile) -> Principal {
        Principal {
            id: profile.id.clone(),
            email: "ira@example.com".to_owned(),
        }
    }

    fn property() -> Property {
        let owner = Profile::new(ProfileId::random(), Role::Landlord, "Dana Hart", "")
            .expect("valid profile");
        Property::builder(&owner, "dana@example.com")
            .title("Sunny two-bed")
            .build()
    }

    fn properties_with(found: Property) -> MockPropertyRepository {
        let mut repo = MockPropertyRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(found)));
        repo
    }

    fn service(
        reviews: MockReviewRepository,
        properties: MockPropertyRepository,
    ) -> ReviewsService<MockReviewRepository, MockPropertyRepository> {
        ReviewsService::new(Arc::new(reviews), Arc::new(properties))
    }

    #[tokio::test]
    async fn first_submission_inserts_with_name_snapshot() {
        let author = tenant();
        let principal = principal_for(&author);
        let subject = property();
        let property_id = subject.id.clone();

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_property_and_user()
            .times(1)
            .return_once(|_, _| Ok(None));
        reviews.expect_insert().times(1).return_once(|_| Ok(()));
        reviews.expect_update().times(0);

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        let outcome = service(reviews, properties_with(subject))
            .submit(
                viewer,
                &property_id,
                Rating::try_new(4).expect("valid"),
                "Lovely place",
            )
            .await
            .expect("submit succeeds");

        assert!(outcome.created);
        assert_eq!(outcome.review.reviewer_name, "Ira Voss");
        assert_eq!(outcome.review.user_id, author.id);
        assert_eq!(outcome.review.property_id, property_id);
    }

    #[tokio::test]
    async fn repeat_submission_updates_in_place() {
        let author = tenant();
        let principal = principal_for(&author);
        let subject = property();
        let property_id = subject.id.clone();
        let existing = Review::new(
            property_id.clone(),
            author.id.clone(),
            Rating::try_new(2).expect("valid"),
            "Damp",
            "Ira Voss",
        );
        let existing_id = existing.id;

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_property_and_user()
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        reviews.expect_insert().times(0);
        reviews
            .expect_update()
            .withf(move |review: &Review| {
                review.id == existing_id && review.rating.value() == 5 && review.comment == "Fixed"
            })
            .times(1)
            .return_once(|_| Ok(()));

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        let outcome = service(reviews, properties_with(subject))
            .submit(
                viewer,
                &property_id,
                Rating::try_new(5).expect("valid"),
                "Fixed",
            )
            .await
            .expect("submit succeeds");

        assert!(!outcome.created);
        assert_eq!(outcome.review.id, existing_id);
    }

    #[tokio::test]
    async fn submission_requires_a_session() {
        let reviews = MockReviewRepository::new();
        let properties = MockPropertyRepository::new();

        let error = service(reviews, properties)
            .submit(
                Viewer::Anonymous,
                &PropertyId::random(),
                Rating::try_new(3).expect("valid"),
                "Nope",
            )
            .await
            .expect_err("unauthorised");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn submission_against_missing_property_is_not_found() {
        let author = tenant();
        let principal = principal_for(&author);

        let reviews = MockReviewRepository::new();
        let mut properties = MockPropertyRepository::new();
        properties
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        let error = service(reviews, properties)
            .submit(
                viewer,
                &PropertyId::random(),
                Rating::try_new(3).expect("valid"),
                "Ghost",
            )
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn board_extracts_the_viewers_own_review() {
        let author = tenant();
        let principal = principal_for(&author);
        let subject = property();
        let property_id = subject.id.clone();
        let own = Review::new(
            property_id.clone(),
            author.id.clone(),
            Rating::try_new(4).expect("valid"),
            "Nice",
            "Ira Voss",
        );
        let other = Review::new(
            property_id.clone(),
            ProfileId::random(),
            Rating::try_new(5).expect("valid"),
            "Great",
            "Pat Low",
        );
        let own_id = own.id;
        let rows = vec![other, own];

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_list_by_property()
            .times(1)
            .return_once(move |_| Ok(rows));

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        let board = service(reviews, properties_with(subject))
            .board(viewer, &property_id)
            .await
            .expect("board succeeds");

        assert_eq!(board.reviews.len(), 2);
        assert_eq!(board.average, Some(4.5));
        assert_eq!(board.own.expect("own review").id, own_id);
        assert!(board.can_review);
    }

    #[tokio::test]
    async fn board_for_anonymous_viewers_has_no_own_review() {
        let subject = property();
        let property_id = subject.id.clone();

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_list_by_property()
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let board = service(reviews, properties_with(subject))
            .board(Viewer::Anonymous, &property_id)
            .await
            .expect("board succeeds");

        assert!(board.reviews.is_empty());
        assert_eq!(board.average, None);
        assert!(board.own.is_none());
        assert!(!board.can_review);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_an_absent_review_is_not_found() {
        let author = tenant();
        let principal = principal_for(&author);

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_property_and_user()
            .times(1)
            .return_once(|_, _| Ok(None));
        reviews.expect_delete().times(0);

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        let error = service(reviews, MockPropertyRepository::new())
            .remove(viewer, &PropertyId::random())
            .await
            .expect_err("not found");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn removing_deletes_the_viewers_row() {
        let author = tenant();
        let principal = principal_for(&author);
        let property_id = PropertyId::random();
        let existing = Review::new(
            property_id.clone(),
            author.id.clone(),
            Rating::try_new(1).expect("valid"),
            "Regret",
            "Ira Voss",
        );
        let existing_id = existing.id;

        let mut reviews = MockReviewRepository::new();
        reviews
            .expect_find_by_property_and_user()
            .times(1)
            .return_once(move |_, _| Ok(Some(existing)));
        reviews
            .expect_delete()
            .withf(move |id| *id == existing_id)
            .times(1)
            .return_once(|_| Ok(()));

        let viewer = Viewer::SignedIn {
            principal: &principal,
            profile: &author,
        };
        service(reviews, MockPropertyRepository::new())
            .remove(viewer, &property_id)
            .await
            .expect("remove succeeds");
    }
}
