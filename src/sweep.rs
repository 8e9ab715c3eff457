//! Parameter sweeps over sample count, interval length and set size.
//!
//! The sweeps drive an [`Estimator`] repeatedly and collect the results.
//! Failures to write output files are logged and skipped; they never abort
//! a sweep.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::estimator::{Estimator, EstimatorConfig};
use crate::output::append_value;
use crate::reference::StateRef;
use crate::states::States;

/// A state whose estimates are appended to `path`.
#[derive(Debug, Clone)]
pub struct SweepTarget {
    pub state: StateRef,
    pub path: PathBuf,
}

impl SweepTarget {
    pub fn new(state: StateRef, path: impl Into<PathBuf>) -> Self {
        Self {
            state,
            path: path.into(),
        }
    }
}

/// One estimate of a count sweep.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CountEstimate {
    pub state: StateRef,
    pub samples: u32,
    pub probability: f32,
}

/// Estimates every target once per sample count and appends each ratio to the
/// target's file.
///
/// Every target handle is checked before anything is written. Zero counts are
/// skipped. Unwritable destinations are logged and the sweep continues; the
/// estimate is still returned.
pub fn count_sweep(
    estimator: &Estimator,
    states: &States,
    targets: &[SweepTarget],
    counts: impl IntoIterator<Item = u32>,
) -> Result<Vec<CountEstimate>> {
    if let Some(target) = targets.iter().find(|t| !states.is_valid(t.state)) {
        return Err(Error::UnknownState(target.state));
    }

    let mut estimates = Vec::new();

    for samples in counts {
        if samples == 0 {
            warn!("count_sweep: skipping zero sample count");
            continue;
        }
        for target in targets {
            let probability = estimator.estimate(states, target.state, samples)?;
            if let Err(e) = append_value(&target.path, probability) {
                warn!("count_sweep: {}", e);
            }
            estimates.push(CountEstimate {
                state: target.state,
                samples,
                probability,
            });
        }
    }

    info!("count_sweep: {} estimates", estimates.len());
    Ok(estimates)
}

/// One line of a density table.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepRow {
    /// Number of values of the state inside the interval.
    pub set_len: u64,
    /// Number of integers in the interval.
    pub interval_len: u64,
    /// `set_len / interval_len`, the exact density.
    pub ratio: f64,
    /// Estimated density.
    pub probability: f32,
}

impl SweepRow {
    /// Absolute gap between the estimate and the exact density.
    pub fn error(&self) -> f64 {
        (self.probability as f64 - self.ratio).abs()
    }
}

impl Display for SweepRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<6} {:<6} {:<18.6} {:.6}",
            self.set_len, self.interval_len, self.ratio, self.probability
        )
    }
}

/// Rows printed under a header line.
#[derive(Debug, Clone, Default)]
pub struct SweepTable {
    pub rows: Vec<SweepRow>,
}

impl SweepTable {
    pub const HEADER: &'static str = "SetLen IntLen SetLen/IntervalLen Probability";
}

impl From<Vec<SweepRow>> for SweepTable {
    fn from(rows: Vec<SweepRow>) -> Self {
        Self { rows }
    }
}

impl Display for SweepTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", Self::HEADER)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

fn row(estimator: &Estimator, states: &States, state: StateRef, samples: u32) -> Result<SweepRow> {
    let config = estimator.config();
    let interval_len = config.range_len();
    let set_len = (config.min..=config.max)
        .filter(|&x| states.contains(state, x))
        .count() as u64;
    let probability = estimator.estimate(states, state, samples)?;
    Ok(SweepRow {
        set_len,
        interval_len,
        ratio: set_len as f64 / interval_len as f64,
        probability,
    })
}

/// Density of a fixed state over the growing intervals `[min, min + step * i]`
/// for `i` in `1..=steps`.
///
/// Fails with [`Error::OutOfRange`] before sampling anything if `steps` or the
/// last interval end does not fit in `i32`.
pub fn interval_sweep(
    config: EstimatorConfig,
    states: &States,
    state: StateRef,
    step: i32,
    steps: u32,
) -> Result<Vec<SweepRow>> {
    let steps = i32::try_from(steps).map_err(|_| Error::OutOfRange { name: "steps" })?;
    let interval_end = |i: i32| {
        step.checked_mul(i)
            .and_then(|w| config.min.checked_add(w))
            .ok_or(Error::OutOfRange { name: "interval end" })
    };
    // Ends are monotonic in `i`, so the extreme ones bound all the others.
    interval_end(1)?;
    interval_end(steps)?;

    let mut rows = Vec::new();
    for i in 1..=steps {
        let max = interval_end(i)?;
        let estimator = Estimator::new(config.with_range(config.min, max))?;
        let r = row(&estimator, states, state, config.samples)?;
        info!("interval_sweep: [{}, {}] -> {}", config.min, max, r);
        rows.push(r);
    }
    Ok(rows)
}

/// Density of random sets of `step * i` draws, for `i` in `1..=steps`, over
/// the configured interval.
///
/// Each set is drawn from the interval itself with seed `seed + i`. The sets
/// live in a manager private to the sweep, so repeated sweeps do not grow any
/// caller-owned [`States`].
pub fn set_size_sweep(config: EstimatorConfig, step: usize, steps: u32, seed: u64) -> Result<Vec<SweepRow>> {
    let estimator = Estimator::new(config)?;
    usize::try_from(steps)
        .ok()
        .and_then(|n| step.checked_mul(n))
        .ok_or(Error::OutOfRange { name: "draws" })?;

    let states = States::new();
    let mut rows = Vec::new();
    for i in 1..=steps {
        let draws = step * i as usize;
        let set = states.mk_random_set(draws, config.min, config.max, seed.wrapping_add(i as u64))?;
        let r = row(&estimator, &states, set, config.samples)?;
        info!("set_size_sweep: {} draws -> {}", draws, r);
        rows.push(r);
    }
    Ok(rows)
}
