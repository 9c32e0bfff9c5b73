//! The resource discovery engine.
//!
//! One engine instance owns the provider client, the cache, and the
//! classifier. Every fetch follows the same shape: consult the cache, on a
//! miss call the provider one or more times, map raw places into
//! [`ResourceLocation`] records, merge, cache, return. Category fan-out is
//! sequential with an inter-call delay as a provider throttle; the order is
//! deterministic so id-based dedup always keeps the earlier category's
//! entry.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use haven_core::{
    AppConfig, Classifier, Coordinate, ResourceCategory, ResourceLocation, NO_PHONE_PLACEHOLDER,
    UNKNOWN_NAME_PLACEHOLDER,
};
use haven_geo::{GeoSearch, GeoSearchError, PlaceResult};
use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;

use crate::cache::ResourceCache;
use crate::clock::Clock;
use crate::DiscoveryError;

/// Categories always searched in an "all categories" sweep, appended if the
/// catalog walk somehow misses them.
pub const PRIORITY_CATEGORIES: [ResourceCategory; 4] = [
    ResourceCategory::Shelter,
    ResourceCategory::Food,
    ResourceCategory::Healthcare,
    ResourceCategory::Crisis,
];

const FANOUT_RADIUS_FACTOR: f64 = 1.2;
const BROADEN_RADIUS_FACTOR: f64 = 1.5;
const FALLBACK_RADIUS_FACTOR: f64 = 1.8;

/// How many leading keywords the broadened single-category query OR-joins.
const BROADEN_KEYWORD_COUNT: usize = 5;
/// How many leading keywords the free-text fallback scans per category.
const FALLBACK_SCAN_KEYWORDS: usize = 5;
/// How many leading keywords the free-text fallback appends on a match.
const FALLBACK_APPEND_KEYWORDS: usize = 3;

/// Boilerplate appended to every free-text query before the first provider
/// call, to bias results toward assistance services.
const ENHANCED_QUERY_SUFFIX: &str =
    "assistance services support resources help community center";

/// Seed terms for the free-text fallback query.
const FALLBACK_SEED_TERMS: [&str; 4] =
    ["community resources", "assistance", "services", "support"];

const ADDRESS_PLACEHOLDER: &str = "Address unavailable";

/// Engine tuning knobs.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Pause between provider calls in a fan-out. A throttle against
    /// provider rate limiting, not a correctness requirement.
    pub inter_fetch_delay: Duration,
    /// A plain single-category fetch returning fewer raw results than this
    /// triggers one supplementary broadened search.
    pub sparse_result_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            inter_fetch_delay: Duration::from_millis(200),
            sparse_result_threshold: 5,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            inter_fetch_delay: Duration::from_millis(config.inter_fetch_delay_ms),
            sparse_result_threshold: config.sparse_result_threshold,
        }
    }
}

/// The published result of one discovery operation.
///
/// Provider failures never surface as hard errors: the caller gets whatever
/// accumulated plus a human-readable message. `message` is also used for
/// the "no results" case of free-text search.
#[derive(Debug, Clone, Serialize)]
pub struct FetchOutcome {
    pub resources: Vec<ResourceLocation>,
    pub message: Option<String>,
}

impl FetchOutcome {
    fn ok(resources: Vec<ResourceLocation>) -> Self {
        Self {
            resources,
            message: None,
        }
    }
}

/// Orchestrates provider searches and the resource cache.
///
/// Construct once per application session and share behind an `Arc`.
/// Concurrent fetches for the same cache key are single-flighted: the
/// second caller waits on a per-key lock and is then served from cache.
pub struct DiscoveryEngine<G, C: Clock> {
    provider: G,
    cache: ResourceCache<C>,
    classifier: Arc<dyn Classifier>,
    config: EngineConfig,
    // Per-key locks live for the process lifetime; the key space is bounded
    // by the catalog plus distinct search strings.
    in_flight: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl<G: GeoSearch, C: Clock> DiscoveryEngine<G, C> {
    pub fn new(
        provider: G,
        cache: ResourceCache<C>,
        classifier: Arc<dyn Classifier>,
        config: EngineConfig,
    ) -> Self {
        Self {
            provider,
            cache,
            classifier,
            config,
            in_flight: AsyncMutex::new(HashMap::new()),
        }
    }

    /// Fetches resources for one category, or for the whole catalog when
    /// `category` is the catch-all.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NoLocation`] when `location` is `None`;
    /// no provider call is attempted. Provider failures do not error: they
    /// degrade into a partial or empty outcome with a message.
    pub async fn fetch_by_category(
        &self,
        category: ResourceCategory,
        location: Option<Coordinate>,
        radius_meters: f64,
    ) -> Result<FetchOutcome, DiscoveryError> {
        let center = location.ok_or(DiscoveryError::NoLocation)?;
        if category == ResourceCategory::All {
            Ok(self.fetch_all_categories(center, radius_meters).await)
        } else {
            Ok(self.fetch_single_category(category, center, radius_meters).await)
        }
    }

    /// Free-text search with a two-stage fallback.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::NoLocation`] when `location` is `None`.
    pub async fn search_free_text(
        &self,
        query: &str,
        location: Option<Coordinate>,
        radius_meters: f64,
    ) -> Result<FetchOutcome, DiscoveryError> {
        let center = location.ok_or(DiscoveryError::NoLocation)?;
        let query_key = query.trim().to_lowercase();
        if query_key.is_empty() {
            return Ok(FetchOutcome {
                resources: Vec::new(),
                message: Some("Enter a search term".to_owned()),
            });
        }

        let lock = self.key_lock(&format!("search:{query_key}")).await;
        let _guard = lock.lock().await;

        if let Some(cached) = self.cache.get_search_results(&query_key) {
            tracing::debug!(query = %query_key, "search cache hit");
            return Ok(FetchOutcome::ok(cached));
        }

        let enhanced = format!("{query_key} {ENHANCED_QUERY_SUFFIX}");
        match self.provider.search(&enhanced, center, radius_meters).await {
            Ok(places) if !places.is_empty() => {
                let mapped = self.map_search_places(places, &query_key, false);
                self.cache.put_search_results(&mapped, &query_key);
                Ok(FetchOutcome::ok(mapped))
            }
            Ok(_) => {
                tracing::debug!(query = %query_key, "no results from enhanced query, broadening");
                Ok(self.fallback_search(&query_key, center, radius_meters).await)
            }
            Err(e) => {
                tracing::warn!(query = %query_key, error = %e, "enhanced search failed, broadening");
                Ok(self.fallback_search(&query_key, center, radius_meters).await)
            }
        }
    }

    /// Drops every cache entry.
    pub fn clear_all(&self) {
        self.cache.invalidate(None);
    }

    /// Drops one category's cache entry.
    pub fn clear_category(&self, category: ResourceCategory) {
        self.cache.invalidate(Some(category));
    }

    /// Sequential sweep over the whole catalog, merged and deduplicated by
    /// id (first occurrence wins), cached under the catch-all key.
    async fn fetch_all_categories(&self, center: Coordinate, radius_meters: f64) -> FetchOutcome {
        let lock = self.key_lock(ResourceCategory::All.slug()).await;
        let _guard = lock.lock().await;

        if let Some(cached) = self.cache.get(ResourceCategory::All) {
            tracing::debug!("all-categories cache hit");
            return FetchOutcome::ok(cached);
        }

        let mut categories: Vec<ResourceCategory> = ResourceCategory::catalog()
            .filter(|c| *c != ResourceCategory::All)
            .collect();
        for priority in PRIORITY_CATEGORIES {
            if !categories.contains(&priority) {
                categories.push(priority);
            }
        }

        let radius = radius_meters * FANOUT_RADIUS_FACTOR;
        let mut accumulated: Vec<ResourceLocation> = Vec::new();
        let mut failed = 0usize;

        for (i, category) in categories.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.config.inter_fetch_delay).await;
            }
            match self.fetch_category_results(category, center, radius).await {
                Ok((results, _)) => accumulated.extend(results),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(
                        category = category.slug(),
                        error = %e,
                        "category fetch failed, continuing fan-out"
                    );
                }
            }
        }

        let mut seen = HashSet::new();
        let deduped: Vec<ResourceLocation> = accumulated
            .into_iter()
            .filter(|r| seen.insert(r.id.clone()))
            .collect();
        self.cache.put(ResourceCategory::All, deduped.clone());

        let message = (failed > 0).then(|| format!("{failed} categories could not be searched"));
        FetchOutcome {
            resources: deduped,
            message,
        }
    }

    /// Direct single-category fetch: cache or provider, plus one broadened
    /// search when the raw result count is sparse. Broadened extras are
    /// returned but not cached; only the plain mapped list goes in the
    /// cache, so a later cache hit reproduces the provider's own answer.
    async fn fetch_single_category(
        &self,
        category: ResourceCategory,
        center: Coordinate,
        radius_meters: f64,
    ) -> FetchOutcome {
        match self.fetch_category_results(category, center, radius_meters).await {
            Ok((results, from_cache)) => {
                if !from_cache && results.len() < self.config.sparse_result_threshold {
                    let merged = self.broaden_category(category, center, radius_meters, results).await;
                    FetchOutcome::ok(merged)
                } else {
                    FetchOutcome::ok(results)
                }
            }
            Err(e) => {
                tracing::warn!(category = category.slug(), error = %e, "category search failed");
                FetchOutcome {
                    resources: Vec::new(),
                    message: Some(format!(
                        "Unable to search for {} right now",
                        category.label()
                    )),
                }
            }
        }
    }

    /// Cache-or-fetch for one category, single-flighted on the category
    /// key. The `bool` is `true` when served from cache.
    async fn fetch_category_results(
        &self,
        category: ResourceCategory,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<(Vec<ResourceLocation>, bool), GeoSearchError> {
        let lock = self.key_lock(category.slug()).await;
        let _guard = lock.lock().await;

        if let Some(cached) = self.cache.get(category) {
            tracing::debug!(category = category.slug(), "category cache hit");
            return Ok((cached, true));
        }

        let query = category.search_query().unwrap_or_else(|| category.label());
        let places = self.provider.search(query, center, radius_meters).await?;
        let mapped: Vec<ResourceLocation> = places
            .into_iter()
            .map(|place| map_category_place(category, place))
            .collect();
        self.cache.put(category, mapped.clone());
        Ok((mapped, false))
    }

    /// One supplementary broadened search for a sparse category. New
    /// results are merged unless their rounded coordinate collides with an
    /// existing one; this dedup is category-agnostic, unlike the id dedup
    /// used by the fan-out, because a broadened result may classify
    /// differently than the original fetch.
    async fn broaden_category(
        &self,
        category: ResourceCategory,
        center: Coordinate,
        radius_meters: f64,
        mut results: Vec<ResourceLocation>,
    ) -> Vec<ResourceLocation> {
        let query = broaden_query(category);
        tracing::debug!(
            category = category.slug(),
            count = results.len(),
            "sparse results, issuing broadened search"
        );
        match self
            .provider
            .search(&query, center, radius_meters * BROADEN_RADIUS_FACTOR)
            .await
        {
            Ok(places) => {
                let mut seen: HashSet<(i64, i64)> =
                    results.iter().map(|r| r.coordinate().rounded_key()).collect();
                for place in places {
                    if seen.insert(place.coordinate.rounded_key()) {
                        results.push(map_broadened_place(category, place));
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    category = category.slug(),
                    error = %e,
                    "broadened search failed, keeping sparse results"
                );
            }
        }
        results
    }

    /// Stage-two free-text search: generic seed terms plus the keywords of
    /// every category whose leading keywords relate to the query, OR-joined
    /// at a wider radius. Results are cached under the `broad-` key; their
    /// ids still contain the original query key, so a later plain lookup
    /// finds them.
    async fn fallback_search(
        &self,
        query_key: &str,
        center: Coordinate,
        radius_meters: f64,
    ) -> FetchOutcome {
        let broad_query = fallback_terms(query_key).join(" OR ");
        match self
            .provider
            .search(&broad_query, center, radius_meters * FALLBACK_RADIUS_FACTOR)
            .await
        {
            Ok(places) if !places.is_empty() => {
                let mapped = self.map_search_places(places, query_key, true);
                self.cache
                    .put_search_results(&mapped, &format!("broad-{query_key}"));
                FetchOutcome::ok(mapped)
            }
            Ok(_) => FetchOutcome {
                resources: Vec::new(),
                message: Some(format!("No results found for \"{query_key}\"")),
            },
            Err(e) => {
                tracing::warn!(query = %query_key, error = %e, "broadened free-text search failed");
                FetchOutcome {
                    resources: Vec::new(),
                    message: Some("Search is unavailable right now. Please try again.".to_owned()),
                }
            }
        }
    }

    /// Maps free-text provider results, classifying each by the original
    /// query and the result's name.
    fn map_search_places(
        &self,
        places: Vec<PlaceResult>,
        query_key: &str,
        broadened: bool,
    ) -> Vec<ResourceLocation> {
        places
            .into_iter()
            .map(|place| {
                let name = place
                    .name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN_NAME_PLACEHOLDER.to_owned());
                let category = self.classifier.classify(query_key, &name);
                let id = if broadened {
                    ResourceLocation::broadened_search_id(query_key, place.coordinate)
                } else {
                    ResourceLocation::search_id(query_key, place.coordinate)
                };
                build_location(
                    id,
                    category,
                    place,
                    format!("Result for \"{query_key}\""),
                    vec![query_key.to_owned()],
                )
            })
            .collect()
    }

    /// Returns the shared per-key lock, creating it on first use.
    async fn key_lock(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut map = self.in_flight.lock().await;
        Arc::clone(map.entry(key.to_owned()).or_default())
    }
}

/// OR-joined top keywords for the broadened single-category search.
fn broaden_query(category: ResourceCategory) -> String {
    category
        .search_keywords()
        .iter()
        .take(BROADEN_KEYWORD_COUNT)
        .copied()
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Term list for the free-text fallback query: generic seed terms, then
/// for each category whose first five keywords relate to the query (either
/// direction of substring containment), that category's first three
/// keywords and its label.
fn fallback_terms(query_key: &str) -> Vec<String> {
    let mut terms: Vec<String> = FALLBACK_SEED_TERMS.iter().map(|s| (*s).to_owned()).collect();
    for category in ResourceCategory::catalog() {
        if category == ResourceCategory::All {
            continue;
        }
        let keywords = category.search_keywords();
        let related = keywords
            .iter()
            .take(FALLBACK_SCAN_KEYWORDS)
            .any(|kw| query_key.contains(kw) || kw.contains(query_key));
        if related {
            terms.extend(
                keywords
                    .iter()
                    .take(FALLBACK_APPEND_KEYWORDS)
                    .map(|kw| (*kw).to_owned()),
            );
            terms.push(category.label().to_owned());
        }
    }
    terms
}

fn map_category_place(category: ResourceCategory, place: PlaceResult) -> ResourceLocation {
    let id = ResourceLocation::category_id(category, place.coordinate);
    build_location(
        id,
        category,
        place,
        format!("{} services", category.label()),
        vec![category.label().to_owned()],
    )
}

fn map_broadened_place(category: ResourceCategory, place: PlaceResult) -> ResourceLocation {
    let id = ResourceLocation::broadened_id(category, place.coordinate);
    build_location(
        id,
        category,
        place,
        format!("{} services", category.label()),
        vec![category.label().to_owned()],
    )
}

fn build_location(
    id: String,
    category: ResourceCategory,
    place: PlaceResult,
    description: String,
    services: Vec<String>,
) -> ResourceLocation {
    ResourceLocation {
        id,
        name: place
            .name
            .unwrap_or_else(|| UNKNOWN_NAME_PLACEHOLDER.to_owned()),
        address: place
            .address
            .unwrap_or_else(|| ADDRESS_PLACEHOLDER.to_owned()),
        phone_number: place
            .phone
            .unwrap_or_else(|| NO_PHONE_PLACEHOLDER.to_owned()),
        description,
        category,
        latitude: place.coordinate.latitude,
        longitude: place.coordinate.longitude,
        icon: category.icon().to_owned(),
        website: place.website,
        hours: place.hours,
        services,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn broaden_query_joins_top_five_keywords() {
        let q = broaden_query(ResourceCategory::Food);
        assert_eq!(
            q,
            "food bank OR food pantry OR food OR soup kitchen OR free meals"
        );
    }

    #[test]
    fn fallback_terms_start_with_seed_terms() {
        let terms = fallback_terms("zzzz");
        assert_eq!(
            terms,
            vec!["community resources", "assistance", "services", "support"]
        );
    }

    #[test]
    fn fallback_terms_pull_in_related_categories() {
        // "food" is contained in Food's leading keywords, so the fallback
        // query carries Food's top three keywords and its label.
        let terms = fallback_terms("food");
        assert!(terms.contains(&"food bank".to_owned()));
        assert!(terms.contains(&"food pantry".to_owned()));
        assert!(terms.contains(&"food".to_owned()));
        assert!(terms.contains(&"Food Assistance".to_owned()));
    }

    #[test]
    fn fallback_terms_match_in_both_directions() {
        // The query "emergency shelter downtown" contains Shelter's keyword
        // "shelter" even though no keyword contains the full query.
        let terms = fallback_terms("emergency shelter downtown");
        assert!(terms.contains(&"Shelter".to_owned()));
    }

    #[test]
    fn build_location_applies_placeholders() {
        let place = PlaceResult {
            name: None,
            address: None,
            phone: None,
            coordinate: Coordinate::new(33.749, -84.388),
            website: None,
            hours: None,
        };
        let loc = map_category_place(ResourceCategory::Shelter, place);
        assert_eq!(loc.name, UNKNOWN_NAME_PLACEHOLDER);
        assert_eq!(loc.phone_number, NO_PHONE_PLACEHOLDER);
        assert_eq!(loc.address, ADDRESS_PLACEHOLDER);
        assert_eq!(loc.icon, ResourceCategory::Shelter.icon());
        assert_eq!(loc.id, "shelter-33.749--84.388");
    }

    #[test]
    fn priority_categories_are_the_big_four() {
        assert_eq!(
            PRIORITY_CATEGORIES,
            [
                ResourceCategory::Shelter,
                ResourceCategory::Food,
                ResourceCategory::Healthcare,
                ResourceCategory::Crisis,
            ]
        );
    }
}
