//! Provider contract and wire types.

use std::future::Future;

use haven_core::Coordinate;
use serde::Deserialize;

use crate::error::GeoSearchError;

/// One place returned by the provider. Every field except the coordinate is
/// best-effort; callers substitute placeholders for what is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub coordinate: Coordinate,
    pub website: Option<String>,
    pub hours: Option<String>,
}

/// "Search places near a coordinate matching a text query."
///
/// No guarantee on result count, ordering, or latency. Implementations may
/// fail with a transport or provider error; they must not panic.
pub trait GeoSearch: Send + Sync {
    fn search(
        &self,
        query: &str,
        center: Coordinate,
        radius_meters: f64,
    ) -> impl Future<Output = Result<Vec<PlaceResult>, GeoSearchError>> + Send;
}

/// One entry of a Nominatim `/search` response (`format=jsonv2`).
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimPlace {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub extratags: Option<NominatimExtratags>,
}

/// Subset of `extratags` we care about.
#[derive(Debug, Deserialize)]
pub(crate) struct NominatimExtratags {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
}

impl NominatimPlace {
    /// Converts a wire entry into a [`PlaceResult`].
    ///
    /// Returns `None` when the coordinate strings do not parse; a place
    /// without a usable coordinate cannot be mapped or deduplicated.
    pub(crate) fn into_place(self) -> Option<PlaceResult> {
        let latitude = self.lat.parse::<f64>().ok()?;
        let longitude = self.lon.parse::<f64>().ok()?;
        let extratags = self.extratags;
        Some(PlaceResult {
            name: self.name.filter(|n| !n.is_empty()),
            address: self.display_name.filter(|a| !a.is_empty()),
            phone: extratags.as_ref().and_then(|t| t.phone.clone()),
            coordinate: Coordinate::new(latitude, longitude),
            website: extratags.as_ref().and_then(|t| t.website.clone()),
            hours: extratags.and_then(|t| t.opening_hours),
        })
    }
}
