//! Line and plane extraction from a [Grid]
//!
//! Every slice copies out of the grid storage into new arrays, so the results
//! can be handed to plotting code and modified freely.
//!
//! Index-addressed methods take bin indices for everything. The `_at`
//! variants take coordinate and energy values instead, resolve them with the
//! [bins](crate::bins) rules, and then call the index-addressed method.

// internal modules
use crate::error::{Error, Result};
use crate::grid::{Axis, Channel, Grid};
use crate::utils::*;

// external crates
use itertools::iproduct;
use log::{debug, trace};
use serde::Serialize;

/// Results along one spatial axis
///
/// `coordinates` holds the bin centres along the free axis and `values` the
/// tallied result in each of those bins.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Line {
    /// Axis the line runs along
    #[serde(skip)]
    pub along: Option<Axis>,
    /// Bin centres along the free axis
    pub coordinates: Vec<f64>,
    /// Tallied results
    pub values: Vec<f64>,
}

impl Line {
    /// Number of points on the line
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no points on the line
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Results over a plane spanned by two spatial axes
///
/// All four matrices have shape `[first axis bins][second axis bins]`. For
/// example [Grid::plane_xz()] gives rows along x and columns along z.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Plane {
    /// Spanning axes as (rows, columns)
    #[serde(skip)]
    pub axes: Option<(Axis, Axis)>,
    /// Bin centres along the first spanning axis
    pub first: Vec<Vec<f64>>,
    /// Bin centres along the second spanning axis
    pub second: Vec<Vec<f64>>,
    /// Tallied results
    pub values: Vec<Vec<f64>>,
    /// Relative errors on the results
    pub errors: Vec<Vec<f64>>,
}

impl Plane {
    /// Matrix shape as `[rows, columns]`
    pub fn shape(&self) -> [usize; 2] {
        [
            self.values.len(),
            self.values.first().map(|row| row.len()).unwrap_or(0),
        ]
    }

    /// Largest result in the plane, NaN if empty
    pub fn max_value(&self) -> f64 {
        match self.is_empty() {
            true => f64::NAN,
            false => *vec_f64_max(&self.flat_values()),
        }
    }

    /// Smallest result in the plane, NaN if empty
    pub fn min_value(&self) -> f64 {
        match self.is_empty() {
            true => f64::NAN,
            false => *vec_f64_min(&self.flat_values()),
        }
    }

    /// True if the plane holds no results
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|row| row.is_empty())
    }

    fn flat_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }
}

/// Lines by bin index
impl Grid {
    /// Line along x for fixed y and z bins in energy group `e`
    pub fn line_along_x(&self, y: usize, z: usize, e: usize) -> Result<Line> {
        let along = (Axis::X, Channel::XCenter);
        self.extract_line(along, [(Axis::Y, y), (Axis::Z, z)], e)
    }

    /// Line along y for fixed x and z bins in energy group `e`
    pub fn line_along_y(&self, x: usize, z: usize, e: usize) -> Result<Line> {
        let along = (Axis::Y, Channel::YCenter);
        self.extract_line(along, [(Axis::X, x), (Axis::Z, z)], e)
    }

    /// Line along z for fixed x and y bins in energy group `e`
    pub fn line_along_z(&self, x: usize, y: usize, e: usize) -> Result<Line> {
        let along = (Axis::Z, Channel::ZCenter);
        self.extract_line(along, [(Axis::X, x), (Axis::Y, y)], e)
    }
}

/// Lines by coordinate and energy values
impl Grid {
    /// Line along x through the point (`y`, `z`) for the group containing `energy`
    pub fn line_along_x_at(&self, y: f64, z: f64, energy: f64) -> Result<Line> {
        self.line_along_x(
            self.coordinate_bin(Axis::Y, y)?,
            self.coordinate_bin(Axis::Z, z)?,
            self.energy_bin(energy)?,
        )
    }

    /// Line along y through the point (`x`, `z`) for the group containing `energy`
    pub fn line_along_y_at(&self, x: f64, z: f64, energy: f64) -> Result<Line> {
        self.line_along_y(
            self.coordinate_bin(Axis::X, x)?,
            self.coordinate_bin(Axis::Z, z)?,
            self.energy_bin(energy)?,
        )
    }

    /// Line along z through the point (`x`, `y`) for the group containing `energy`
    pub fn line_along_z_at(&self, x: f64, y: f64, energy: f64) -> Result<Line> {
        self.line_along_z(
            self.coordinate_bin(Axis::X, x)?,
            self.coordinate_bin(Axis::Y, y)?,
            self.energy_bin(energy)?,
        )
    }
}

/// Planes by bin index
impl Grid {
    /// YZ plane at x bin `x` in energy group `e`
    ///
    /// Fails with [Error::SliceDimension] unless there is more than one bin
    /// along both y and z.
    pub fn plane_yz(&self, x: usize, e: usize) -> Result<Plane> {
        let spanning = [(Axis::Y, Channel::YCenter), (Axis::Z, Channel::ZCenter)];
        self.extract_plane(spanning, (Axis::X, x), e)
    }

    /// XZ plane at y bin `y` in energy group `e`
    ///
    /// Fails with [Error::SliceDimension] unless there is more than one bin
    /// along both x and z.
    pub fn plane_xz(&self, y: usize, e: usize) -> Result<Plane> {
        let spanning = [(Axis::X, Channel::XCenter), (Axis::Z, Channel::ZCenter)];
        self.extract_plane(spanning, (Axis::Y, y), e)
    }

    /// XY plane at z bin `z` in energy group `e`
    ///
    /// Fails with [Error::SliceDimension] unless there is more than one bin
    /// along both x and y.
    pub fn plane_xy(&self, z: usize, e: usize) -> Result<Plane> {
        let spanning = [(Axis::X, Channel::XCenter), (Axis::Y, Channel::YCenter)];
        self.extract_plane(spanning, (Axis::Z, z), e)
    }
}

/// Planes by coordinate and energy values
impl Grid {
    /// YZ plane through coordinate `x` for the group containing `energy`
    pub fn plane_yz_at(&self, x: f64, energy: f64) -> Result<Plane> {
        self.plane_yz(self.coordinate_bin(Axis::X, x)?, self.energy_bin(energy)?)
    }

    /// XZ plane through coordinate `y` for the group containing `energy`
    pub fn plane_xz_at(&self, y: f64, energy: f64) -> Result<Plane> {
        self.plane_xz(self.coordinate_bin(Axis::Y, y)?, self.energy_bin(energy)?)
    }

    /// XY plane through coordinate `z` for the group containing `energy`
    pub fn plane_xy_at(&self, z: f64, energy: f64) -> Result<Plane> {
        self.plane_xy(self.coordinate_bin(Axis::Z, z)?, self.energy_bin(energy)?)
    }
}

/// Shared extraction logic
///
/// Every free axis comes paired with the channel holding its bin centres.
impl Grid {
    fn extract_line(
        &self,
        along: (Axis, Channel),
        fixed: [(Axis, usize); 2],
        e: usize,
    ) -> Result<Line> {
        let (axis, center) = along;
        self.check_index(Axis::Energy, e)?;
        for (fixed_axis, index) in fixed {
            self.check_index(fixed_axis, index)?;
        }
        trace!("Line along {axis} with {fixed:?} in group {e}");

        let n = self.count(axis);
        let mut line = Line {
            along: Some(axis),
            coordinates: Vec::with_capacity(n),
            values: Vec::with_capacity(n),
        };

        for i in 0..n {
            let (x, y, z) = place(axis, i, fixed);
            line.coordinates.push(self.stored(e, x, y, z, center));
            line.values.push(self.stored(e, x, y, z, Channel::Value));
        }
        Ok(line)
    }

    fn extract_plane(
        &self,
        spanning: [(Axis, Channel); 2],
        normal: (Axis, usize),
        e: usize,
    ) -> Result<Plane> {
        let [(first, first_center), (second, second_center)] = spanning;

        // a single bin along either direction is not a plane
        for axis in [first, second] {
            let bins = self.count(axis);
            if bins <= 1 {
                return Err(Error::SliceDimension { axis, bins });
            }
        }

        self.check_index(normal.0, normal.1)?;
        self.check_index(Axis::Energy, e)?;
        debug!(
            "Extracting {first}{second} plane at {} bin {}, group {e}",
            normal.0, normal.1
        );

        let (n0, n1) = (self.count(first), self.count(second));
        let mut plane = Plane {
            axes: Some((first, second)),
            first: vec![vec![0.0; n1]; n0],
            second: vec![vec![0.0; n1]; n0],
            values: vec![vec![0.0; n1]; n0],
            errors: vec![vec![0.0; n1]; n0],
        };

        for (i, j) in iproduct!(0..n0, 0..n1) {
            let (x, y, z) = place(first, i, [(second, j), normal]);
            plane.first[i][j] = self.stored(e, x, y, z, first_center);
            plane.second[i][j] = self.stored(e, x, y, z, second_center);
            plane.values[i][j] = self.stored(e, x, y, z, Channel::Value);
            plane.errors[i][j] = self.stored(e, x, y, z, Channel::RelError);
        }
        Ok(plane)
    }
}

/// Assemble (x, y, z) bin indices from one free index and two fixed ones
fn place(free: Axis, index: usize, fixed: [(Axis, usize); 2]) -> (usize, usize, usize) {
    let mut xyz = [0; 3];
    for (axis, i) in [(free, index), fixed[0], fixed[1]] {
        match axis {
            Axis::X => xyz[0] = i,
            Axis::Y => xyz[1] = i,
            Axis::Z => xyz[2] = i,
            Axis::Energy => (),
        }
    }
    (xyz[0], xyz[1], xyz[2])
}
