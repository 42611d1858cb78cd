//! In-memory result cache shared by the geocoding clients

use std::time::Duration;

use moka::future::Cache;

use crate::client::GeocodedLocation;

const MAX_ENTRIES: u64 = 1000;

/// Lookup cache keyed by the lower-cased query; a TTL of zero disables it
#[derive(Debug, Clone)]
pub(crate) struct GeocodeCache {
    inner: Option<Cache<String, GeocodedLocation>>,
}

impl GeocodeCache {
    pub(crate) fn new(ttl_hours: u64) -> Self {
        let inner = (ttl_hours > 0).then(|| {
            Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(Duration::from_secs(ttl_hours * 3600))
                .build()
        });
        Self { inner }
    }

    pub(crate) fn key(query: &str) -> String {
        query.trim().to_lowercase()
    }

    pub(crate) async fn get(&self, query: &str) -> Option<GeocodedLocation> {
        match &self.inner {
            Some(cache) => cache.get(&Self::key(query)).await,
            None => None,
        }
    }

    pub(crate) async fn insert(&self, query: &str, value: GeocodedLocation) {
        if let Some(cache) = &self.inner {
            cache.insert(Self::key(query), value).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::GeoLocation;

    use super::*;

    fn place() -> GeocodedLocation {
        GeocodedLocation {
            address: "100 Main St, Raleigh, NC".to_string(),
            location: GeoLocation::new(35.78, -78.64).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_cache_hit_is_case_insensitive() {
        let cache = GeocodeCache::new(1);
        cache.insert("100 Main St", place()).await;
        assert_eq!(cache.get(" 100 MAIN ST ").await, Some(place()));
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_cache() {
        let cache = GeocodeCache::new(0);
        cache.insert("100 Main St", place()).await;
        assert!(cache.get("100 Main St").await.is_none());
    }
}
