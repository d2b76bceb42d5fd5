// seed.rs - Seeded random sources for the initial population

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{LifeError, LifeResult};
use crate::params::Params;

/// Probability that a freshly seeded cell starts alive (one coin flip per cell).
pub const ALIVE_PROBABILITY: f64 = 0.5;

/// Portable, reproducible generator for a boundary seed.
///
/// Any `i64` is a seed except the `-1` parse sentinel. Negative seeds keep
/// their bit pattern when widened to the generator's `u64` seed.
pub fn rng_from_seed(seed: i64) -> LifeResult<ChaCha8Rng> {
    if seed == Params::INVALID {
        return Err(LifeError::InvalidSeed { seed });
    }
    Ok(ChaCha8Rng::seed_from_u64(seed as u64))
}

/// Wall-clock Unix time in nanoseconds, used when no seed is configured.
pub fn clock_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
