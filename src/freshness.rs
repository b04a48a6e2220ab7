//! Cache freshness gate
//!
//! Decides whether persisted upstream data (observations, forecasts, irradiance)
//! is too old to use. The thermal core never calls this; the caller checks it
//! before handing series to the pipeline and owns the refresh itself.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;

/// Default maximum cache age: six hours
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(6 * 3600);

pub trait FreshnessGate {
    /// Whether `resource_id` is older than `max_age` (or missing)
    fn is_stale(&self, resource_id: &str, max_age: Duration) -> bool;
}

/// Resolves resource ids as file names below a cache directory and compares
/// their modification time to the wall clock.
#[derive(Debug, Clone)]
pub struct FileFreshnessGate {
    cache_dir: PathBuf,
}

impl FileFreshnessGate {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn resource_path(&self, resource_id: &str) -> PathBuf {
        self.cache_dir.join(resource_id)
    }

    /// Staleness relative to an explicit `now`.
    ///
    /// Missing or unreadable resources are stale. A modification time later
    /// than `now` counts as fresh.
    pub fn is_stale_at(&self, resource_id: &str, max_age: Duration, now: SystemTime) -> bool {
        let path = self.resource_path(resource_id);
        let modified = match std::fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                debug!(resource = resource_id, error = %e, "cache resource unavailable");
                return true;
            }
        };

        match now.duration_since(modified) {
            Ok(age) => {
                let stale = age > max_age;
                debug!(
                    resource = resource_id,
                    age_secs = age.as_secs(),
                    max_age_secs = max_age.as_secs(),
                    stale,
                    "checked cache age"
                );
                stale
            }
            Err(_) => false,
        }
    }
}

impl FreshnessGate for FileFreshnessGate {
    fn is_stale(&self, resource_id: &str, max_age: Duration) -> bool {
        self.is_stale_at(resource_id, max_age, SystemTime::now())
    }
}

/// True if any of `resources` is stale
pub fn needs_refresh<G, S>(gate: &G, resources: &[S], max_age: Duration) -> bool
where
    G: FreshnessGate + ?Sized,
    S: AsRef<str>,
{
    resources
        .iter()
        .any(|r| gate.is_stale(r.as_ref(), max_age))
}
