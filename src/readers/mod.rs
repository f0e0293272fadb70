#![doc(hidden)]
//! Library of readers and common functions for meshtal files

// internal modules
use crate::error::{Error, Result};
use crate::grid::Grid;

// standard library
use std::path::Path;

// files under the readers module
mod meshtal_file;
pub mod parsers;

// inline important the reader for a nice API
#[doc(inline)]
pub use crate::readers::meshtal_file::MeshtalReader;

/// Read all tally blocks in a meshtal file
///
/// Returns a result containing a vector of [Grid] structs extracted from the
/// file at `path` by the parser, in the order they appear.
///
/// - `path` - Path to the meshtal file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```ignore
/// // Read every tally block contained in the file
/// let grids: Vec<Grid> = meshslice::read_meshtal("path/to/meshtal.msht")?;
/// ```
pub fn read_meshtal<P: AsRef<Path>>(path: P) -> Result<Vec<Grid>> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = MeshtalReader::new();
    reader.disable_progress();
    reader.parse(path)
}

/// Read only the specified tally block from a meshtal file
///
/// Returns a result of the targeted [Grid] if it was successfully
/// extracted from the file at `path`.
///
/// - `path` - Path to the meshtal file, can be [&str], [String], [Path], etc...
/// - `target` - Tally number of interest
///
/// Example
/// ```ignore
/// // Read only tally 104 (i.e. FMESH104) from the file
/// let grid: Grid = meshslice::read_meshtal_target("path/to/meshtal.msht", 104)?;
/// ```
pub fn read_meshtal_target<P: AsRef<Path>>(path: P, target: u32) -> Result<Grid> {
    let path: &Path = Path::new(path.as_ref());
    let mut reader = MeshtalReader::new();
    reader.disable_progress();
    reader.set_target_id(target);
    reader
        .parse(path)?
        .into_iter()
        .next()
        .ok_or(Error::TallyNotFound(target))
}
