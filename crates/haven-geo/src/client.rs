//! HTTP client for the Nominatim search API.
//!
//! Wraps `reqwest` with typed deserialization, a bounded viewbox derived
//! from the caller's center/radius, and retry with back-off on transient
//! failures. Entries without a parseable coordinate are skipped rather than
//! failing the whole response.

use std::time::Duration;

use haven_core::Coordinate;
use reqwest::{Client, Url};

use crate::error::GeoSearchError;
use crate::retry::retry_with_backoff;
use crate::types::{GeoSearch, NominatimPlace, PlaceResult};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/search";
const MAX_RESULTS: u32 = 30;
const METERS_PER_LAT_DEGREE: f64 = 111_320.0;

/// Tuning knobs for [`NominatimClient`].
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "haven/0.1 (resource-discovery)".to_owned(),
            max_retries: 3,
            retry_backoff_base_ms: 500,
        }
    }
}

/// Client for the Nominatim search endpoint.
///
/// Use [`NominatimClient::new`] for production or
/// [`NominatimClient::with_base_url`] to point at a mock server in tests.
pub struct NominatimClient {
    client: Client,
    base_url: Url,
    max_retries: u32,
    retry_backoff_base_ms: u64,
}

impl NominatimClient {
    /// Creates a client pointed at the public Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeoSearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeoSearchError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeoSearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeoSearchError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(config: &NominatimConfig, base_url: &str) -> Result<Self, GeoSearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.clone())
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|_| GeoSearchError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
            retry_backoff_base_ms: config.retry_backoff_base_ms,
        })
    }

    /// Builds the search URL with a bounded viewbox around `center`.
    ///
    /// Nominatim takes `viewbox=lon_min,lat_max,lon_max,lat_min` with
    /// `bounded=1` to restrict results to the box. The box spans `radius`
    /// meters in each direction, with the longitude span widened by the
    /// latitude cosine so the physical extent stays square.
    fn build_url(&self, query: &str, center: Coordinate, radius_meters: f64) -> Url {
        let lat_delta = radius_meters / METERS_PER_LAT_DEGREE;
        let lon_delta =
            radius_meters / (METERS_PER_LAT_DEGREE * center.latitude.to_radians().cos());

        let viewbox = format!(
            "{},{},{},{}",
            center.longitude - lon_delta,
            center.latitude + lat_delta,
            center.longitude + lon_delta,
            center.latitude - lat_delta
        );

        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            pairs.append_pair("format", "jsonv2");
            pairs.append_pair("addressdetails", "1");
            pairs.append_pair("extratags", "1");
            pairs.append_pair("limit", &MAX_RESULTS.to_string());
            pairs.append_pair("viewbox", &viewbox);
            pairs.append_pair("bounded", "1");
        }
        url
    }

    /// Sends one GET request and parses the body as a list of places.
    async fn request_places(&self, url: &Url) -> Result<Vec<PlaceResult>, GeoSearchError> {
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(GeoSearchError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let raw: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|e| GeoSearchError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(raw.into_iter().filter_map(NominatimPlace::into_place).collect())
    }
}

impl GeoSearch for NominatimClient {
    async fn search(
        &self,
        query: &str,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<Vec<PlaceResult>, GeoSearchError> {
        let url = self.build_url(query, center, radius_meters);
        tracing::debug!(%url, query, "geo search");
        retry_with_backoff(self.max_retries, self.retry_backoff_base_ms, || {
            self.request_places(&url)
        })
        .await
    }
}
