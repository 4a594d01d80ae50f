//! Reproducible duplicate injection.

use crate::error::GeneratorError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides, record by record, whether to emit the record a second time.
///
/// Draws a uniform integer in `[0, 100)` and duplicates when it falls below
/// `floor(chance * 100)`. Seeded per run, so the duplicate rate is stable while
/// positions are only reproducible for a given seed.
pub struct DuplicateInjector {
    threshold: u32,
    rng: StdRng,
}

impl DuplicateInjector {
    /// Create an injector duplicating with probability `chance`.
    pub fn new(chance: f64, seed: u64) -> Result<Self, GeneratorError> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&chance) {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "duplicate chance must be within [0.0, 1.0], got {chance}"
            )));
        }
        Ok(Self {
            threshold: (chance * 100.0).floor() as u32,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Whether the current record should be emitted again.
    pub fn should_duplicate(&mut self) -> bool {
        if self.threshold == 0 {
            return false;
        }
        self.rng.gen_range(0..100) < self.threshold
    }

    /// Duplication threshold in percent.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
