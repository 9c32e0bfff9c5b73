//! The resource location model.

use serde::{Deserialize, Serialize};

use crate::ResourceCategory;

/// Placeholder name when the provider omits one.
pub const UNKNOWN_NAME_PLACEHOLDER: &str = "Unknown Location";

/// Placeholder phone number when the provider omits one.
pub const NO_PHONE_PLACEHOLDER: &str = "No phone available";

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Dedup key with latitude/longitude truncated to three decimal places.
    ///
    /// Two results within ~100 m of each other collapse to the same key.
    /// Used by the broadening merge path, which is category-agnostic, unlike
    /// the id-based dedup used for the category fan-out.
    #[must_use]
    pub fn rounded_key(self) -> (i64, i64) {
        #[allow(clippy::cast_possible_truncation)]
        let truncate = |v: f64| (v * 1000.0).trunc() as i64;
        (truncate(self.latitude), truncate(self.longitude))
    }
}

/// A discovered resource, mapped from one provider search result.
///
/// Immutable after construction. Equality and hashing are by `id` only;
/// the id ties a result to its category (or originating search query) and
/// coordinate, making it the natural dedup key for fan-out merges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLocation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub description: String,
    pub category: ResourceCategory,
    pub latitude: f64,
    pub longitude: f64,
    /// Copied from the category at construction time for display convenience.
    pub icon: String,
    pub website: Option<String>,
    pub hours: Option<String>,
    /// Provenance/service tags: the category label or the free-text query
    /// that produced this result.
    pub services: Vec<String>,
}

impl ResourceLocation {
    /// Id for a result from a plain single-category fetch.
    #[must_use]
    pub fn category_id(category: ResourceCategory, coordinate: Coordinate) -> String {
        format!(
            "{}-{}-{}",
            category.slug(),
            coordinate.latitude,
            coordinate.longitude
        )
    }

    /// Id for a result from the broadened single-category search.
    #[must_use]
    pub fn broadened_id(category: ResourceCategory, coordinate: Coordinate) -> String {
        format!(
            "{}-broad-{}-{}",
            category.slug(),
            coordinate.latitude,
            coordinate.longitude
        )
    }

    /// Id for a result from a free-text search.
    #[must_use]
    pub fn search_id(query_key: &str, coordinate: Coordinate) -> String {
        format!(
            "search-{query_key}-{}-{}",
            coordinate.latitude, coordinate.longitude
        )
    }

    /// Id for a result from the broadened free-text fallback.
    #[must_use]
    pub fn broadened_search_id(query_key: &str, coordinate: Coordinate) -> String {
        format!(
            "search-broad-{query_key}-{}-{}",
            coordinate.latitude, coordinate.longitude
        )
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl PartialEq for ResourceLocation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ResourceLocation {}

impl std::hash::Hash for ResourceLocation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
