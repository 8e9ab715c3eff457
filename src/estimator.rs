//! Monte-Carlo estimation of a state's density over an integer range.
//!
//! The [`Estimator`] draws uniform samples from a closed range and reports
//! the fraction that falls inside a state. The generator is re-seeded on
//! every call, so the same inputs always yield the same ratio.
//!
//! ```
//! use state_sampler::estimator::{Estimator, EstimatorConfig};
//! use state_sampler::states::States;
//!
//! let states = States::new();
//! let seg = states.mk_segment(0, 10);
//!
//! let estimator = Estimator::new(EstimatorConfig::default().with_range(0, 100)).unwrap();
//! let p = estimator.estimate(&states, seg, 100_000).unwrap();
//! assert!((p - 11.0 / 101.0).abs() < 0.01);
//! ```

use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::reference::StateRef;
use crate::states::States;

/// Sampling parameters.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EstimatorConfig {
    /// Seed for the generator, applied afresh on every estimate.
    pub seed: u64,
    /// Lower bound of the sampling range (inclusive).
    pub min: i32,
    /// Upper bound of the sampling range (inclusive).
    pub max: i32,
    /// Sample count used by [`Estimator::run`].
    pub samples: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            seed: 10,
            min: 0,
            max: 100,
            samples: 1000,
        }
    }
}

impl EstimatorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_range(mut self, min: i32, max: i32) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    /// Number of integers in the sampling range.
    pub fn range_len(&self) -> u64 {
        (self.max as i64 - self.min as i64 + 1).max(0) as u64
    }
}

/// Validated sampler over `[min, max]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    /// Validates the configuration.
    ///
    /// Fails with [`Error::EmptyRange`] when `min > max` and with
    /// [`Error::ZeroSamples`] when the default sample count is zero.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        if config.min > config.max {
            return Err(Error::EmptyRange {
                min: config.min,
                max: config.max,
            });
        }
        if config.samples == 0 {
            return Err(Error::ZeroSamples);
        }
        debug!("Estimator::new({:?})", config);
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimates with the configured sample count.
    pub fn run(&self, states: &States, state: StateRef) -> Result<f32> {
        self.estimate(states, state, self.config.samples)
    }

    /// Fraction of `samples` uniform draws from `[min, max]` contained in `state`.
    ///
    /// The result is in `[0, 1]`. Identical arguments give bit-identical
    /// results. Fails with [`Error::ZeroSamples`] when `samples == 0` and with
    /// [`Error::UnknownState`] for a handle the manager did not issue.
    pub fn estimate(&self, states: &States, state: StateRef, samples: u32) -> Result<f32> {
        if samples == 0 {
            return Err(Error::ZeroSamples);
        }
        if !states.is_valid(state) {
            return Err(Error::UnknownState(state));
        }

        let hits = self.count_hits(states, state, samples);
        let ratio = hits as f32 / samples as f32;
        debug!(
            "estimate(state = {}, samples = {}) -> {}/{} = {}",
            state, samples, hits, samples, ratio
        );
        Ok(ratio)
    }

    /// Fresh stream of uniform draws from `[min, max]`, seeded from the config.
    fn draws(&self) -> impl Iterator<Item = i32> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let range = self.config.min..=self.config.max;
        std::iter::repeat_with(move || rng.random_range(range.clone()))
    }

    fn count_hits(&self, states: &States, state: StateRef, samples: u32) -> u32 {
        let mut hits = 0;
        for x in self.draws().take(samples as usize) {
            if states.contains(state, x) {
                hits += 1;
            }
        }
        hits
    }

    /// Exact density of `state` over the range, by enumeration.
    ///
    /// Useful as a reference for small ranges.
    pub fn exact(&self, states: &States, state: StateRef) -> Result<f64> {
        if !states.is_valid(state) {
            return Err(Error::UnknownState(state));
        }
        let hits = (self.config.min..=self.config.max)
            .filter(|&x| states.contains(state, x))
            .count();
        Ok(hits as f64 / self.config.range_len() as f64)
    }
}
