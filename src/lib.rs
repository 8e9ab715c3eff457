//! # state-sampler: Monte-Carlo density of integer states
//!
//! **`state-sampler`** estimates the probability that a uniformly drawn
//! integer from a closed range belongs to a *state*: a composable membership
//! test over `i32`.
//!
//! ## States
//!
//! A state is one of:
//!
//! - a **discrete** value,
//! - a closed **segment** `[begin, end]` (the default segment `[0, -1]` is empty),
//! - an explicit **set** of values,
//! - a combinator over two states: **intersection**, **union** or **difference**.
//!
//! All states live in a [`States`][crate::states::States] manager and are
//! referred to by lightweight [`StateRef`][crate::reference::StateRef] handles.
//! Combinators hold handles, so a combinator can never outlive its operands.
//!
//! Note the operand order of the difference: `apply_difference(a, b)` holds the
//! values of `b` that are *not* in `a`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use state_sampler::estimator::{Estimator, EstimatorConfig};
//! use state_sampler::states::States;
//!
//! // 1. Initialize the manager
//! let states = States::new();
//!
//! // 2. Build states
//! let one = states.mk_discrete(1);
//! let seg = states.mk_segment(0, 10);
//!
//! // 3. Combine them: the segment without the point 1
//! let f = states.eval(seg - one).unwrap();
//! assert!(states.contains(f, 0));
//! assert!(!states.contains(f, 1));
//!
//! // 4. Estimate its density over [0, 100]
//! let estimator = Estimator::new(EstimatorConfig::default()).unwrap();
//! let p = estimator.estimate(&states, f, 100_000).unwrap();
//! assert!((p - 10.0 / 101.0).abs() < 0.01);
//! ```
//!
//! ## Core Components
//!
//! - **[`states`]**: the manager that builds and evaluates states.
//! - **[`estimator`]**: seeded uniform sampling over a range.
//! - **[`sweep`]**: sweeps over sample count, interval length and set size.
//! - **[`output`]**: append-only result files.

pub mod error;
pub mod estimator;
pub mod eval;
pub mod output;
pub mod random;
pub mod reference;
pub mod state;
pub mod states;
pub mod sweep;

pub use error::{Error, Result};
