//! Core grid library
//!
//! # Overview
//!
//! Module for storing and slicing the results of a single mesh tally block.
//! Every block found by the reader becomes one [Grid].
//!
//! ```rust
//! // Extract all blocks from a file into a Vec<Grid>
//! let grids = meshslice::read_meshtal("./tests/data/multi.msht").unwrap();
//!
//! // Extract just one block by its tally number
//! let grid = meshslice::read_meshtal_target("./tests/data/multi.msht", 214).unwrap();
//! ```
//!
//! Once read, a [Grid] is never modified, so it can be shared between threads
//! and queried as much as needed.
//!
//! # Slicing
//!
//! Lines and planes can be requested by bin index or by value.
//!
//! ```rust
//! # let grid = meshslice::read_meshtal_target("./tests/data/multi.msht", 214).unwrap();
//! // XY plane through z = 1.2 cm for the group containing 5 MeV
//! let plane = grid.plane_xy_at(1.2, 5.0).unwrap();
//!
//! // Same thing by bin index
//! let z = grid.coordinate_bin(meshslice::grid::Axis::Z, 1.2).unwrap();
//! let e = grid.energy_bin(5.0).unwrap();
//! assert_eq!(plane, grid.plane_xy(z, e).unwrap());
//! ```

// Split into subfiles for development, but anything important is re-exported
mod core;
mod slice;

// inline important the grid-related modules for a nice public API
#[doc(inline)]
pub use crate::grid::core::{Axis, Channel, Grid};

#[doc(inline)]
pub use crate::grid::slice::{Line, Plane};

#[doc(inline)]
pub use crate::readers::{read_meshtal, read_meshtal_target};
