//! Result and Error types for meshslice

use crate::grid::Axis;

/// Type alias for Result<T, meshslice::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `meshslice` crate
///
/// Anything raised while reading a file aborts the whole parse. Anything
/// raised by a lookup or slice on a finished [Grid](crate::grid::Grid) is
/// handed back to the caller to deal with.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("malformed header on line {line}: {reason}")]
    MalformedHeader { line: usize, reason: String },

    #[error("could not parse \"{token}\" on line {line} as a number")]
    InvalidNumber { line: usize, token: String },

    #[error("inconsistent data table on line {line} (expected {expected:?}, found {found:?})")]
    Dimension {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("cannot choose a bin from an empty {0} axis")]
    EmptyAxis(Axis),

    #[error("plane slice needs more than one bin along {axis} (found {bins})")]
    SliceDimension { axis: Axis, bins: usize },

    #[error("{axis} index {index} out of range (expected 0..{count})")]
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        count: usize,
    },

    #[error("tally \"{0}\" not found")]
    TallyNotFound(u32),
}
