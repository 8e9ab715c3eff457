//! Error type shared by the manager, the estimator and the reporting helpers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::reference::StateRef;

/// Errors produced by this crate.
///
/// Evaluating a state never fails; errors only arise from invalid
/// arguments and from writing results out.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample count of zero, which leaves the hit ratio undefined.
    #[error("invalid argument: sample count must be positive")]
    ZeroSamples,

    /// Sampling range with `min > max`.
    #[error("invalid argument: empty sampling range [{min}, {max}]")]
    EmptyRange { min: i32, max: i32 },

    /// Numeric argument whose value, or a value derived from it, does not fit
    /// the integer type it is used as.
    #[error("invalid argument: {name} out of range")]
    OutOfRange { name: &'static str },

    /// Handle that was not issued by the manager it was passed to.
    #[error("invalid argument: unknown state {0}")]
    UnknownState(StateRef),

    /// Output destination could not be opened or written.
    #[error("cannot write to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns `true` for errors caused by invalid arguments.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Error::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
