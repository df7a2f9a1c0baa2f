//! Property reviews and ratings.
//!
//! At most one review exists per (property, user) pair. The reviews service
//! enforces the invariant by consulting persisted state before every submit;
//! see [`super::reviews`]. `reviewer_name` is a snapshot taken when the
//! review is written and is not refreshed on profile edits.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::profile::ProfileId;
use super::property::PropertyId;

/// Validated star rating, an integer between 1 and 5 inclusive.
///
/// # Examples
/// ```
/// use hearth::domain::Rating;
///
/// let rating = Rating::try_new(4).unwrap();
/// assert_eq!(rating.value(), 4);
/// assert!(Rating::try_new(0).is_err());
/// assert!(Rating::try_new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

/// Error returned when a rating falls outside 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingOutOfRange {
    /// The rejected value.
    pub value: u8,
}

impl fmt::Display for RatingOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rating must be between 1 and 5, got {}", self.value)
    }
}

impl std::error::Error for RatingOutOfRange {}

impl Rating {
    /// Lowest permitted rating.
    pub const MIN: u8 = 1;
    /// Highest permitted rating.
    pub const MAX: u8 = 5;

    /// Validate and construct a rating.
    pub fn try_new(value: u8) -> Result<Self, RatingOutOfRange> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange { value })
        }
    }

    /// The underlying star count.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A rating and comment authored by one principal for one property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Review {
    /// Stable identifier.
    pub id: Uuid,
    /// Reviewed property.
    #[schema(value_type = String)]
    pub property_id: PropertyId,
    /// Authoring user; at most one review per (property, user).
    #[schema(value_type = String)]
    pub user_id: ProfileId,
    /// Star rating.
    #[schema(value_type = u8, minimum = 1, maximum = 5)]
    pub rating: Rating,
    /// Free-text comment.
    pub comment: String,
    /// Author name snapshot taken when the review was written.
    pub reviewer_name: String,
    /// Creation timestamp; boards are ordered by this, descending.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Construct a fresh review authored now.
    pub fn new(
        property_id: PropertyId,
        user_id: ProfileId,
        rating: Rating,
        comment: impl Into<String>,
        reviewer_name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            property_id,
            user_id,
            rating,
            comment: comment.into(),
            reviewer_name: reviewer_name.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Mean rating across `reviews` rounded to one decimal place, or `None`
/// when there are no ratings yet.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating.value())).sum();
    let mean = f64::from(total) / reviews.len() as f64;
    Some((mean * 10.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn review_with_rating(value: u8) -> Review {
        Review::new(
            PropertyId::random(),
            ProfileId::random(),
            Rating::try_new(value).expect("valid rating"),
            "fine",
            "Ira Voss",
        )
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn rating_accepts_in_range_values(#[case] value: u8) {
        assert_eq!(Rating::try_new(value).expect("valid").value(), value);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(255)]
    fn rating_rejects_out_of_range_values(#[case] value: u8) {
        let err = Rating::try_new(value).expect_err("out of range");
        assert_eq!(err.value, value);
    }

    #[rstest]
    fn rating_serde_rejects_out_of_range() {
        let result: Result<Rating, _> = serde_json::from_str("7");
        assert!(result.is_err());
    }

    #[rstest]
    fn average_of_no_reviews_is_none() {
        assert_eq!(average_rating(&[]), None);
    }

    #[rstest]
    fn average_rounds_to_one_decimal() {
        let reviews = vec![
            review_with_rating(5),
            review_with_rating(4),
            review_with_rating(4),
        ];
        assert_eq!(average_rating(&reviews), Some(4.3));
    }
}
