//! Memoisation of chart series.
//!
//! Charts are recomputed whenever their data or configuration changes, and
//! usually the same pair comes back many times in a row. `SeriesCache` keeps
//! the last few results keyed by a content hash of `(points, config)`.
//! A hit always equals what [`transform`] would return.

use crate::config::TrendConfig;
use crate::trend::{transform, ChartSeries, TrendPoint};
use lru::LruCache;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

pub const DEFAULT_CACHE_CAPACITY: usize = 16;

struct Entry {
    points: Vec<TrendPoint>,
    config: TrendConfig,
    series: ChartSeries,
}

/// Small LRU of computed chart series. Owned by the caller, not shared.
pub struct SeriesCache {
    entries: LruCache<u64, Entry>,
    hits: u64,
    misses: u64,
}

impl Default for SeriesCache {
    fn default() -> Self {
        SeriesCache::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

impl SeriesCache {
    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        SeriesCache {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached series for `(points, config)`, computing it on a miss.
    pub fn get_or_transform(&mut self, points: &[TrendPoint], config: &TrendConfig) -> ChartSeries {
        let key = content_hash(points, config);
        if let Some(entry) = self.entries.get(&key) {
            // guard against hash collisions
            if entry.points == points && entry.config == *config {
                self.hits += 1;
                return entry.series.clone();
            }
        }
        self.misses += 1;
        let series = transform(points, config);
        self.entries.put(
            key,
            Entry {
                points: points.to_vec(),
                config: *config,
                series: series.clone(),
            },
        );
        series
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn content_hash(points: &[TrendPoint], config: &TrendConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    points.len().hash(&mut hasher);
    for point in points {
        point.date.hash(&mut hasher);
        point.value.map(f64::to_bits).hash(&mut hasher);
    }
    config.scale.hash(&mut hasher);
    config.lower_pct.to_bits().hash(&mut hasher);
    config.upper_pct.to_bits().hash(&mut hasher);
    config.smooth_radius.hash(&mut hasher);
    config.tick_count.hash(&mut hasher);
    config.rounding_unit.to_bits().hash(&mut hasher);
    config.tick_rounding_unit.map(f64::to_bits).hash(&mut hasher);
    config.absent.hash(&mut hasher);
    config.x_scale.hash(&mut hasher);
    config.curve.hash(&mut hasher);
    let viewport = &config.viewport;
    for v in [
        viewport.width,
        viewport.height,
        viewport.padding_h,
        viewport.padding_v,
    ] {
        v.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Scale;
    use chrono::NaiveDate;

    fn points(values: &[f64]) -> Vec<TrendPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| TrendPoint::new(start + chrono::Duration::days(i as i64), Some(*v)))
            .collect()
    }

    #[test]
    fn test_cache_hit_matches_transform() {
        let mut cache = SeriesCache::default();
        let pts = points(&[2000.0, 2100.0, 1950.0]);
        let config = TrendConfig::default();

        let first = cache.get_or_transform(&pts, &config);
        let second = cache.get_or_transform(&pts, &config);
        assert_eq!(first, second);
        assert_eq!(second, transform(&pts, &config));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_distinguishes_config_and_data() {
        let mut cache = SeriesCache::with_capacity(4);
        let pts = points(&[2000.0, 2100.0, 1950.0]);
        let percentile = TrendConfig::default();
        let minmax = TrendConfig {
            scale: Scale::MinMax,
            ..TrendConfig::default()
        };
        cache.get_or_transform(&pts, &percentile);
        cache.get_or_transform(&pts, &minmax);
        cache.get_or_transform(&points(&[1.0]), &minmax);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.len(), 3);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_least_recent() {
        let mut cache = SeriesCache::with_capacity(0);
        let config = TrendConfig::default();
        cache.get_or_transform(&points(&[1.0]), &config);
        cache.get_or_transform(&points(&[2.0]), &config);
        assert_eq!(cache.len(), 1);
        cache.get_or_transform(&points(&[1.0]), &config);
        assert_eq!(cache.misses(), 3);
    }
}
