//! Correlation id generation
//!
//! The array echoes the `id` of each request in its response. Ids only need
//! to make collisions between in-flight requests improbable, so they are
//! drawn uniformly from a small range rather than counted.
//!
//! One generator is created per client and shared by all its clones. The
//! random source is seeded once from the clock when the generator is built
//! and guarded by a mutex, so concurrent calls may draw ids safely.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Smallest id handed out
pub const MIN_REQUEST_ID: i64 = 1;

/// Largest id handed out
pub const MAX_REQUEST_ID: i64 = 999;

/// Source of request correlation ids
#[derive(Debug)]
pub struct RequestIdGenerator {
    rng: Mutex<StdRng>,
}

impl RequestIdGenerator {
    /// Generator seeded from the current time
    pub fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::with_seed(seed)
    }

    /// Generator with a fixed seed, for reproducible sequences
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Next id in `[MIN_REQUEST_ID, MAX_REQUEST_ID]`
    pub fn next_id(&self) -> i64 {
        // A panic while holding the lock cannot leave the rng in a bad state
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(MIN_REQUEST_ID..=MAX_REQUEST_ID)
    }
}

impl Default for RequestIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
