//! Resource discovery and caching.
//!
//! Orchestrates geo provider searches across the category catalog: single
//! category fetches with sparse-result broadening, sequential "all
//! categories" fan-out with id dedup, and free-text search with a two-stage
//! fallback. Results are memoized in an in-memory TTL cache keyed by
//! category, with free-text results accumulating under the catch-all key.

mod cache;
mod clock;
mod engine;

pub use cache::ResourceCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{DiscoveryEngine, EngineConfig, FetchOutcome, PRIORITY_CATEGORIES};

use thiserror::Error;

/// Hard failures of a discovery operation.
///
/// Provider failures are not here: they degrade into a partial or empty
/// result plus a user-facing message, never a hard error.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The caller asked for a fetch without a resolvable coordinate. No
    /// provider call is attempted.
    #[error("no location available for search")]
    NoLocation,
}
