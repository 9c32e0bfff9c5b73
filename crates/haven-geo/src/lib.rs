//! Geo search provider client.
//!
//! Defines the [`GeoSearch`] contract the discovery engine consumes,
//! "search places near a coordinate matching a text query", and an HTTP
//! implementation against the Nominatim search API.

mod client;
mod error;
mod retry;
mod types;

pub use client::{NominatimClient, NominatimConfig};
pub use error::GeoSearchError;
pub use types::{GeoSearch, PlaceResult};
