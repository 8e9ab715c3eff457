//! Append-only result files.
//!
//! Each call opens the destination in append mode, writes one line and closes
//! it again, so consecutive calls land in call order.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};

/// Appends `value` as a single decimal line (six fractional digits) to `path`.
///
/// The file is created if it does not exist.
pub fn append_value(path: impl AsRef<Path>, value: f32) -> Result<()> {
    append_line(path, &format!("{:.6}", value))
}

/// Appends `line` followed by a newline to `path`.
pub fn append_line(path: impl AsRef<Path>, line: &str) -> Result<()> {
    let path = path.as_ref();
    debug!("append_line(path = {}, line = {:?})", path.display(), line);

    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_error)?;
    writeln!(file, "{}", line).map_err(io_error)?;
    Ok(())
}
