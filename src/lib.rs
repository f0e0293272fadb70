//! # The Meshslice crate
//!
//! Reads MCNP column-format meshtal files into dense grids, and pulls lines
//! and planes back out of them for plotting.
//!
//! ## Installation
//!
//! Direct install from github:
//!
//! ```shell
//! cargo install --git https://github.com/repositony/meshslice.git
//! ```
//!
//! ## Overview
//!
//! The crate contains a library for reading and slicing mesh tallies, and a
//! command line tool for writing slices to text or JSON.
//!
//! | Command line   | Description                                           |
//! | -------------- | ----------------------------------------------------- |
//! | `meshslice`    | Extract a line or plane from any mesh tally block     |
//!
//! ### Supported input
//!
//! Only the rectangular `COL` output format (the MCNP default) with an
//! energy column is understood. Every block in the file looks like this:
//!
//! ```text
//! Mesh Tally Number 104
//!  X direction:     0.00     1.00     2.00     3.00
//!  Y direction:     0.00     1.00     2.00
//!  Z direction:     0.00     1.00
//!  Energy bin boundaries: 0.00E+00 1.00E+02
//!
//!    Energy         X         Y         Z     Result     Rel Error
//!  1.000E+02     0.500     0.500     0.500 1.23456E-03 1.23456E-02
//!  ...
//! ```
//!
//! The first value after each header is the lower edge of the first bin, and
//! every value after that is an upper bin edge. The data table has one row
//! per cell and one extra 'Total' energy group after the listed boundaries.
//!
//! ## Library use
//!
//! ```rust
//! use meshslice::read_meshtal_target;
//!
//! // read a single tally block into a grid
//! let grid = read_meshtal_target("./tests/data/multi.msht", 214).unwrap();
//!
//! // XY plane through z = 1.2 cm, for the energy group containing 5 MeV
//! let plane = grid.plane_xy_at(1.2, 5.0).unwrap();
//!
//! // line along x through (y, z) = (0.5, 0.5) for the first energy group
//! let line = grid.line_along_x(0, 0, 0).unwrap();
//! assert_eq!(line.len(), grid.nx());
//! ```
//!
//! As an overview:
//! - The [grid] module contains the [Grid](crate::grid::Grid) struct and all
//! of the slicing operations.
//! - The [bins] module holds the rules for turning a value into a bin index.
//! - The [error] module has the typed errors returned by everything.
//!
//! A parsed [Grid](crate::grid::Grid) is never modified, so it is safe to share
//! between threads without any locking.

// Public facing modules
pub mod bins;
pub mod error;
pub mod grid;
pub mod utils;

// note that docs are hidden to prevent confusing the current simple API
pub mod readers;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::error::{Error, Result};

#[doc(inline)]
pub use crate::readers::{read_meshtal, read_meshtal_target, MeshtalReader};
