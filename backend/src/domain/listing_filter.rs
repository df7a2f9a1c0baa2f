//! Listing search and filter derivation.
//!
//! A pure, deterministic filter over an in-memory property collection. The
//! input slice is assumed to be ordered by recency (descending) by the
//! upstream fetch; filtering preserves that relative order. A property is
//! included iff every active predicate holds, and an absent predicate is
//! always true, so the empty query returns the input unchanged.

use serde::{Deserialize, Serialize};

use super::property::Property;

/// Bedroom-count predicate.
///
/// Discrete buckets match exactly; the top bucket ("3+") uses threshold
/// semantics, so a five-bedroom house matches `AtLeast(3)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BedroomsFilter {
    /// Exact bedroom count; 0 selects studios.
    Exactly(u32),
    /// Minimum bedroom count, inclusive.
    AtLeast(u32),
}

impl BedroomsFilter {
    fn matches(self, bedrooms: u32) -> bool {
        match self {
            Self::Exactly(n) => bedrooms == n,
            Self::AtLeast(n) => bedrooms >= n,
        }
    }
}

/// Raw query state as it arrives from the wire, all fields optional free
/// text. Parsing is permissive: malformed numeric text behaves as if the
/// field were left blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct RawListingQuery {
    /// Free-text search input.
    pub search: Option<String>,
    /// Lower price bound as entered.
    pub min_price: Option<String>,
    /// Upper price bound as entered.
    pub max_price: Option<String>,
    /// Bedroom bucket as entered: an integer, or `N+` for the top bucket.
    pub bedrooms: Option<String>,
    /// Restrict to furnished units when true.
    pub furnished: Option<bool>,
    /// Required amenity tags, comma separated.
    pub amenities: Option<String>,
}

/// Structured filter state applied to a listing collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Case-insensitive substring matched against title, location, and
    /// description; empty means unconstrained.
    pub search_term: String,
    /// Inclusive lower price bound.
    pub min_price: Option<u32>,
    /// Inclusive upper price bound.
    pub max_price: Option<u32>,
    /// Bedroom predicate.
    pub bedrooms: Option<BedroomsFilter>,
    /// When true, only furnished units match; false is unconstrained.
    pub furnished: bool,
    /// Conjunctive amenity requirements: a property must carry every tag.
    pub amenities: Vec<String>,
}

fn parse_price(raw: Option<String>) -> Option<u32> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
}

fn parse_bedrooms(raw: Option<String>) -> Option<BedroomsFilter> {
    let text = raw?;
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Some(base) = text.strip_suffix('+') {
        return base.parse().ok().map(BedroomsFilter::AtLeast);
    }
    text.parse().ok().map(BedroomsFilter::Exactly)
}

impl ListingQuery {
    /// Build a structured query from raw wire input.
    ///
    /// Malformed numeric text never fails; the corresponding predicate is
    /// simply dropped, matching the permissive filter UX.
    ///
    /// # Examples
    /// ```
    /// use hearth::domain::{BedroomsFilter, ListingQuery, RawListingQuery};
    ///
    /// let query = ListingQuery::from_raw(RawListingQuery {
    ///     min_price: Some("not a number".into()),
    ///     bedrooms: Some("3+".into()),
    ///     ..RawListingQuery::default()
    /// });
    /// assert_eq!(query.min_price, None);
    /// assert_eq!(query.bedrooms, Some(BedroomsFilter::AtLeast(3)));
    /// ```
    pub fn from_raw(raw: RawListingQuery) -> Self {
        let amenities = raw
            .amenities
            .as_deref()
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            search_term: raw.search.map(|s| s.trim().to_owned()).unwrap_or_default(),
            min_price: parse_price(raw.min_price),
            max_price: parse_price(raw.max_price),
            bedrooms: parse_bedrooms(raw.bedrooms),
            furnished: raw.furnished.unwrap_or(false),
            amenities,
        }
    }

    /// True when no predicate is active, i.e. the query matches everything.
    pub fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.bedrooms.is_none()
            && !self.furnished
            && self.amenities.is_empty()
    }

    /// Whether `property` satisfies every active predicate.
    pub fn matches(&self, property: &Property) -> bool {
        self.matches_search(property)
            && self.matches_price(property)
            && self.matches_bedrooms(property)
            && self.matches_furnished(property)
            && self.matches_amenities(property)
    }

    fn matches_search(&self, property: &Property) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        property.title.to_lowercase().contains(&needle)
            || property.location.to_lowercase().contains(&needle)
            || property.description.to_lowercase().contains(&needle)
    }

    fn matches_price(&self, property: &Property) -> bool {
        self.min_price.is_none_or(|min| property.price >= min)
            && self.max_price.is_none_or(|max| property.price <= max)
    }

    fn matches_bedrooms(&self, property: &Property) -> bool {
        self.bedrooms
            .is_none_or(|filter| filter.matches(property.bedrooms))
    }

    fn matches_furnished(&self, property: &Property) -> bool {
        !self.furnished || property.is_furnished
    }

    fn matches_amenities(&self, property: &Property) -> bool {
        self.amenities
            .iter()
            .all(|tag| property.amenities.iter().any(|have| have == tag))
    }
}

/// Compute the visible subsequence of `properties` under `query`,
/// preserving the input's relative order.
pub fn filter_listings<'a>(properties: &'a [Property], query: &ListingQuery) -> Vec<&'a Property> {
    properties.iter().filter(|p| query.matches(p)).collect()
}
