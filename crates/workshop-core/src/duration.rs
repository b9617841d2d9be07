//! Duration policy: per-category base durations plus bounded random jitter.

use crate::config::SimConfig;
use crate::vehicle::Category;
use rand::Rng;
use std::time::Duration;

/// Base service duration for a vehicle category, from configuration.
pub fn base_duration(cfg: &SimConfig, category: Category) -> Duration {
    cfg.base_duration(category)
}

/// Apply symmetric random jitter of at most `jitter_ms` milliseconds.
///
/// Returns `base + uniform[-jitter_ms, +jitter_ms]`, clamped at zero. When
/// `jitter_ms` is zero, returns `base` unchanged without consuming
/// randomness. The randomness source is supplied by the caller so a seeded
/// run stays fully reproducible.
pub fn jittered<R: Rng>(base: Duration, jitter_ms: u64, rng: &mut R) -> Duration {
    if jitter_ms == 0 {
        return base;
    }
    let jitter = jitter_ms as i64;
    let delta = rng.gen_range(-jitter..=jitter);
    let millis = (base.as_millis() as i64 + delta).max(0);
    Duration::from_millis(millis as u64)
}
