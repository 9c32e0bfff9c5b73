//! In-memory TTL cache for discovered resources.
//!
//! One entry per category. Free-text search results do not get their own
//! entries: they accumulate inside the catch-all (`All`) entry and are
//! recovered by filtering on the query key embedded in each resource id.
//! Category reads use the full staleness window; free-text reads use half
//! of it, since search results are treated as more volatile.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use haven_core::{ResourceCategory, ResourceLocation};

use crate::clock::Clock;

#[derive(Debug, Clone)]
struct CacheEntry {
    results: Vec<ResourceLocation>,
    last_updated: DateTime<Utc>,
}

/// Bounded-staleness memoization keyed by category.
///
/// Mutated only by the discovery engine. Constructed once per application
/// session and injected; there is no ambient global instance.
pub struct ResourceCache<C: Clock> {
    clock: C,
    category_ttl: Duration,
    search_ttl: Duration,
    entries: Mutex<HashMap<ResourceCategory, CacheEntry>>,
}

impl<C: Clock> ResourceCache<C> {
    /// Creates a cache with the given staleness windows.
    pub fn new(clock: C, category_ttl: Duration, search_ttl: Duration) -> Self {
        Self {
            clock,
            category_ttl,
            search_ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached results for `category` if the entry is non-empty
    /// and fresher than the category staleness window.
    pub fn get(&self, category: ResourceCategory) -> Option<Vec<ResourceLocation>> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(&category)?;
        if entry.results.is_empty() {
            return None;
        }
        if self.clock.now() - entry.last_updated >= self.category_ttl {
            return None;
        }
        Some(entry.results.clone())
    }

    /// Overwrites the entry for `category` and stamps it with the current time.
    pub fn put(&self, category: ResourceCategory, results: Vec<ResourceLocation>) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            category,
            CacheEntry {
                results,
                last_updated: self.clock.now(),
            },
        );
    }

    /// Returns the free-text results stored under the catch-all entry whose
    /// id contains `query_key`, provided the catch-all entry is fresher than
    /// the (shorter) search staleness window and the filtered set is
    /// non-empty.
    pub fn get_search_results(&self, query_key: &str) -> Option<Vec<ResourceLocation>> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        let entry = entries.get(&ResourceCategory::All)?;
        if self.clock.now() - entry.last_updated >= self.search_ttl {
            return None;
        }
        let matched: Vec<ResourceLocation> = entry
            .results
            .iter()
            .filter(|r| r.id.contains(query_key))
            .cloned()
            .collect();
        if matched.is_empty() {
            return None;
        }
        Some(matched)
    }

    /// Stores free-text results inside the catch-all entry: removes any
    /// previous results whose id contains `query_key`, appends the new ones,
    /// and re-stamps the entry.
    pub fn put_search_results(&self, results: &[ResourceLocation], query_key: &str) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        let now = self.clock.now();
        let entry = entries
            .entry(ResourceCategory::All)
            .or_insert_with(|| CacheEntry {
                results: Vec::new(),
                last_updated: now,
            });
        entry.results.retain(|r| !r.id.contains(query_key));
        entry.results.extend_from_slice(results);
        entry.last_updated = now;
    }

    /// Clears one category's entry, or the entire cache when `None`.
    pub fn invalidate(&self, category: Option<ResourceCategory>) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match category {
            Some(category) => {
                entries.remove(&category);
            }
            None => entries.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use haven_core::Coordinate;

    use super::*;
    use crate::clock::ManualClock;

    fn location(category: ResourceCategory, lat: f64, lon: f64) -> ResourceLocation {
        let coord = Coordinate::new(lat, lon);
        ResourceLocation {
            id: ResourceLocation::category_id(category, coord),
            name: "Test Resource".to_owned(),
            address: "1 Test St".to_owned(),
            phone_number: "555-0100".to_owned(),
            description: String::new(),
            category,
            latitude: lat,
            longitude: lon,
            icon: category.icon().to_owned(),
            website: None,
            hours: None,
            services: vec![category.label().to_owned()],
        }
    }

    fn search_location(query_key: &str, lat: f64, lon: f64) -> ResourceLocation {
        let coord = Coordinate::new(lat, lon);
        ResourceLocation {
            id: ResourceLocation::search_id(query_key, coord),
            category: ResourceCategory::All,
            ..location(ResourceCategory::All, lat, lon)
        }
    }

    fn cache(clock: ManualClock) -> ResourceCache<ManualClock> {
        ResourceCache::new(clock, Duration::minutes(30), Duration::minutes(15))
    }

    #[test]
    fn get_returns_fresh_entry() {
        let c = cache(ManualClock::new(Utc::now()));
        let stored = vec![location(ResourceCategory::Shelter, 33.749, -84.388)];
        c.put(ResourceCategory::Shelter, stored.clone());
        assert_eq!(c.get(ResourceCategory::Shelter), Some(stored));
    }

    #[test]
    fn get_misses_after_staleness_window() {
        // Scenario: put, read back, then simulate 31 minutes elapsed.
        let c = cache(ManualClock::new(Utc::now()));
        c.put(
            ResourceCategory::Shelter,
            vec![location(ResourceCategory::Shelter, 33.749, -84.388)],
        );
        assert!(c.get(ResourceCategory::Shelter).is_some());
        c.clock.advance(Duration::minutes(31));
        assert_eq!(c.get(ResourceCategory::Shelter), None);
    }

    #[test]
    fn get_stays_fresh_just_under_the_window() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put(
            ResourceCategory::Food,
            vec![location(ResourceCategory::Food, 33.749, -84.388)],
        );
        c.clock.advance(Duration::minutes(29));
        assert!(c.get(ResourceCategory::Food).is_some());
        c.clock.advance(Duration::minutes(1));
        assert_eq!(c.get(ResourceCategory::Food), None);
    }

    #[test]
    fn get_misses_on_empty_entry() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put(ResourceCategory::Shelter, Vec::new());
        assert_eq!(c.get(ResourceCategory::Shelter), None);
    }

    #[test]
    fn search_results_expire_after_half_the_category_window() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put_search_results(&[search_location("food", 33.749, -84.388)], "food");

        c.clock.advance(Duration::minutes(14));
        assert!(c.get_search_results("food").is_some());

        c.clock.advance(Duration::minutes(1));
        assert_eq!(c.get_search_results("food"), None);

        // The same entry would still satisfy a category read at this age.
        assert!(c.get(ResourceCategory::All).is_some());
    }

    #[test]
    fn search_results_filter_by_query_key_substring() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put_search_results(&[search_location("food", 33.749, -84.388)], "food");
        c.put_search_results(&[search_location("dental", 33.75, -84.39)], "dental");

        let food = c.get_search_results("food").expect("food hit");
        assert_eq!(food.len(), 1);
        assert!(food[0].id.contains("food"));

        assert_eq!(c.get_search_results("housing"), None);
    }

    #[test]
    fn put_search_results_replaces_matching_ids() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put_search_results(&[search_location("food", 33.749, -84.388)], "food");
        c.put_search_results(&[search_location("food", 34.0, -84.0)], "food");

        let food = c.get_search_results("food").expect("food hit");
        assert_eq!(food.len(), 1, "old food results should be replaced");
        assert!(food[0].id.contains("34"));
    }

    #[test]
    fn put_search_results_keeps_other_queries() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put_search_results(&[search_location("food", 33.749, -84.388)], "food");
        c.put_search_results(&[search_location("dental", 33.75, -84.39)], "dental");

        assert!(c.get_search_results("food").is_some());
        assert!(c.get_search_results("dental").is_some());
    }

    #[test]
    fn invalidate_single_category() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put(
            ResourceCategory::Shelter,
            vec![location(ResourceCategory::Shelter, 33.749, -84.388)],
        );
        c.put(
            ResourceCategory::Food,
            vec![location(ResourceCategory::Food, 33.749, -84.388)],
        );

        c.invalidate(Some(ResourceCategory::Shelter));
        assert_eq!(c.get(ResourceCategory::Shelter), None);
        assert!(c.get(ResourceCategory::Food).is_some());
    }

    #[test]
    fn invalidate_all() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put(
            ResourceCategory::Shelter,
            vec![location(ResourceCategory::Shelter, 33.749, -84.388)],
        );
        c.put_search_results(&[search_location("food", 33.749, -84.388)], "food");

        c.invalidate(None);
        assert_eq!(c.get(ResourceCategory::Shelter), None);
        assert_eq!(c.get_search_results("food"), None);
    }

    #[test]
    fn put_overwrites_and_restamps() {
        let c = cache(ManualClock::new(Utc::now()));
        c.put(
            ResourceCategory::Shelter,
            vec![location(ResourceCategory::Shelter, 33.749, -84.388)],
        );
        c.clock.advance(Duration::minutes(29));
        c.put(
            ResourceCategory::Shelter,
            vec![location(ResourceCategory::Shelter, 34.0, -84.0)],
        );
        c.clock.advance(Duration::minutes(29));

        let hit = c.get(ResourceCategory::Shelter).expect("restamped entry");
        assert!(hit[0].id.contains("34"));
    }
}
