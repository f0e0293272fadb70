// internal modules
use crate::bins;
use crate::error::{Error, Result};
use crate::utils::*;

/// Dense result grid for a single mesh tally block
///
/// [Grid] fields correspond to the headers of a column-format meshtal block
/// and units are unchanged from the MCNP defaults.
///
/// Bin boundaries are the *upper* edges of each bin, in file order. The lower
/// edge of the first bin along each axis is kept in [Grid::lower_edges()],
/// and the first upper boundary recorded in [Grid::axis_origin()].
///
/// The energy axis always has one more group than there are listed
/// boundaries, as the file appends an implicit 'Total' group after the last
/// explicit boundary.
///
/// ## Data layout
///
/// Every cell stores five [Channel]s. All cells live in one contiguous
/// row-major buffer over `(energy, x, y, z, channel)`, which is exactly the
/// order rows appear in the data table of the file.
///
/// ```rust
/// # use meshslice::grid::{Channel, Grid};
/// let text = "\
/// Mesh Tally Number 14
/// X direction: 0.0 1.0 2.0
/// Y direction: 0.0 1.0
/// Z direction: 0.0 1.0
/// Energy bin boundaries: 0.0 20.0
/// Energy X Y Z Result Rel Error
/// 1.0E+01 0.5 0.5 0.5 1.0E-01 0.01
/// 1.0E+01 1.5 0.5 0.5 2.0E-01 0.02
/// Total   0.5 0.5 0.5 3.0E-01 0.03
/// Total   1.5 0.5 0.5 4.0E-01 0.04
/// ";
/// let grids = meshslice::MeshtalReader::new().parse_str(text).unwrap();
/// let grid: &Grid = &grids[0];
///
/// assert_eq!(grid.shape(), [2, 2, 1, 1, 5]);
/// assert_eq!(grid.value(1, 1, 0, 0, Channel::Value).unwrap(), 0.4);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    /// Mesh tally number, if one was given e.g. fmesh104 => 104
    pub(crate) id: Option<u32>,
    /// Upper energy bin boundaries
    pub(crate) e_bins: Vec<f64>,
    /// Upper x bin boundaries
    pub(crate) x_bins: Vec<f64>,
    /// Upper y bin boundaries
    pub(crate) y_bins: Vec<f64>,
    /// Upper z bin boundaries
    pub(crate) z_bins: Vec<f64>,
    /// First boundary recorded for each of x, y, z, and energy
    pub(crate) axis_origin: [f64; 4],
    /// Lower edge of the first bin for each of x, y, z, and energy
    pub(crate) lower_edges: [f64; 4],
    nx: usize,
    ny: usize,
    nz: usize,
    ng: usize,
    /// Dense `[ng][nx][ny][nz][5]` storage
    values: Vec<f64>,
}

/// The four axes of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Energy groups
    Energy,
    /// Cartesian x
    X,
    /// Cartesian y
    Y,
    /// Cartesian z
    Z,
}

impl Axis {
    /// Slot in [Grid::axis_origin()] and [Grid::lower_edges()] for this axis
    pub const fn origin_index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
            Self::Energy => 3,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Energy => write!(f, "energy"),
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// Quantities stored for every cell of a [Grid]
///
/// The discriminant is the position of the channel in the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// x coordinate at the cell centre
    XCenter = 0,
    /// y coordinate at the cell centre
    YCenter = 1,
    /// z coordinate at the cell centre
    ZCenter = 2,
    /// Tallied result
    Value = 3,
    /// Relative error on the result
    RelError = 4,
}

impl Channel {
    /// Number of channels stored per cell
    pub const COUNT: usize = 5;
}

/// Getters, everything is read-only once parsed
impl Grid {
    /// Mesh tally number from the `Mesh Tally Number` header
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    /// Upper energy boundaries, excluding the implicit 'Total' group
    pub fn e_bins(&self) -> &[f64] {
        &self.e_bins
    }

    /// Upper x boundaries
    pub fn x_bins(&self) -> &[f64] {
        &self.x_bins
    }

    /// Upper y boundaries
    pub fn y_bins(&self) -> &[f64] {
        &self.y_bins
    }

    /// Upper z boundaries
    pub fn z_bins(&self) -> &[f64] {
        &self.z_bins
    }

    /// Upper boundaries for any axis
    pub fn bins(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::Energy => &self.e_bins,
            Axis::X => &self.x_bins,
            Axis::Y => &self.y_bins,
            Axis::Z => &self.z_bins,
        }
    }

    /// First boundary recorded from each header, as `[x, y, z, energy]`
    ///
    /// Carried for reference only, lookups never use it.
    pub fn axis_origin(&self) -> [f64; 4] {
        self.axis_origin
    }

    /// Lower edge of the first bin on each axis, as `[x, y, z, energy]`
    pub fn lower_edges(&self) -> [f64; 4] {
        self.lower_edges
    }

    /// Number of x bins
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Number of y bins
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Number of z bins
    pub fn nz(&self) -> usize {
        self.nz
    }

    /// Number of energy groups, including the 'Total' group
    pub fn ng(&self) -> usize {
        self.ng
    }

    /// Number of bins along any axis
    pub fn count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Energy => self.ng,
            Axis::X => self.nx,
            Axis::Y => self.ny,
            Axis::Z => self.nz,
        }
    }

    /// Shape of the dense storage, `[ng, nx, ny, nz, 5]`
    pub fn shape(&self) -> [usize; 5] {
        [self.ng, self.nx, self.ny, self.nz, Channel::COUNT]
    }

    /// Number of cells, i.e. data rows expected in the file
    pub fn n_cells(&self) -> usize {
        self.ng * self.nx * self.ny * self.nz
    }

    /// All five channels of a single cell
    pub fn cell(&self, e: usize, x: usize, y: usize, z: usize) -> Result<[f64; 5]> {
        self.check_indices(e, x, y, z)?;
        let start = self.flat_index(e, x, y, z, Channel::XCenter);
        let mut cell = [0.0; Channel::COUNT];
        cell.copy_from_slice(&self.values[start..start + Channel::COUNT]);
        Ok(cell)
    }

    /// A single channel of a single cell
    pub fn value(&self, e: usize, x: usize, y: usize, z: usize, channel: Channel) -> Result<f64> {
        self.check_indices(e, x, y, z)?;
        Ok(self.stored(e, x, y, z, channel))
    }
}

/// Bin lookups by value
impl Grid {
    /// Energy group containing `energy`, see [choose_energy_bin()](bins::choose_energy_bin)
    ///
    /// Only explicit groups are ever chosen, never the trailing 'Total'.
    pub fn energy_bin(&self, energy: f64) -> Result<usize> {
        bins::choose_energy_bin(&self.e_bins, energy)
    }

    /// Bin containing `value` along a spatial axis, see
    /// [choose_coordinate_bin()](bins::choose_coordinate_bin)
    pub fn coordinate_bin(&self, axis: Axis, value: f64) -> Result<usize> {
        bins::choose_coordinate_bin(axis, self.bins(axis), value)
    }
}

/// Sizing and storage used by the reader
impl Grid {
    /// Just calls Default::default() and sets the tally number
    pub(crate) fn new(id: Option<u32>) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Work out the bin counts and allocate zeroed storage
    ///
    /// Depends only on the boundary lists, so calling this again with the
    /// same lists gives the same (zeroed) result.
    pub(crate) fn size(&mut self) {
        self.nx = self.x_bins.len();
        self.ny = self.y_bins.len();
        self.nz = self.z_bins.len();
        self.ng = self.e_bins.len() + 1;
        self.values = vec![0.0; self.n_cells() * Channel::COUNT];
    }

    /// Mutable boundaries for any axis
    pub(crate) fn bins_mut(&mut self, axis: Axis) -> &mut Vec<f64> {
        match axis {
            Axis::Energy => &mut self.e_bins,
            Axis::X => &mut self.x_bins,
            Axis::Y => &mut self.y_bins,
            Axis::Z => &mut self.z_bins,
        }
    }

    /// Write all five channels of a cell
    pub(crate) fn set_cell(&mut self, e: usize, x: usize, y: usize, z: usize, cell: [f64; 5]) {
        let start = self.flat_index(e, x, y, z, Channel::XCenter);
        self.values[start..start + Channel::COUNT].copy_from_slice(&cell);
    }

    /// Read one stored channel, indices must already be checked
    #[inline]
    pub(crate) fn stored(&self, e: usize, x: usize, y: usize, z: usize, c: Channel) -> f64 {
        self.values[self.flat_index(e, x, y, z, c)]
    }

    /// Row-major offset into the dense storage
    #[inline]
    pub(crate) fn flat_index(&self, e: usize, x: usize, y: usize, z: usize, c: Channel) -> usize {
        (((e * self.nx + x) * self.ny + y) * self.nz + z) * Channel::COUNT + c as usize
    }

    /// Make sure an explicit bin index is in range for an axis
    pub(crate) fn check_index(&self, axis: Axis, index: usize) -> Result<()> {
        let count = self.count(axis);
        if index < count {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange { axis, index, count })
        }
    }

    fn check_indices(&self, e: usize, x: usize, y: usize, z: usize) -> Result<()> {
        self.check_index(Axis::Energy, e)?;
        self.check_index(Axis::X, x)?;
        self.check_index(Axis::Y, y)?;
        self.check_index(Axis::Z, z)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let head = match self.id {
            Some(id) => f!(" > Mesh {id} [{} cells]", self.n_cells()),
            None => f!(" > Mesh [{} cells]", self.n_cells()),
        };

        let mut s = f!("{}\n{}\n{}\n", "-".repeat(40), head, "-".repeat(40));
        for (name, axis, unit) in [
            ("x", Axis::X, "cm"),
            ("y", Axis::Y, "cm"),
            ("z", Axis::Z, "cm"),
            ("e", Axis::Energy, "MeV"),
        ] {
            let lower = self.lower_edges[axis.origin_index()];
            let upper = self.bins(axis).last().copied().unwrap_or(lower);
            s += &f!(
                "{name}mesh : {:>10} - {:>10} {unit} ({} bins)\n",
                lower.sci(2, 2),
                upper.sci(2, 2),
                self.count(axis)
            );
        }
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn grid() -> Grid {
        let mut grid = Grid::new(Some(104));
        grid.x_bins = vec![1.0, 2.0, 3.0];
        grid.y_bins = vec![1.0, 2.0];
        grid.z_bins = vec![1.0];
        grid.e_bins = vec![100.0];
        grid.size();
        grid
    }

    #[rstest]
    fn sizing_follows_bins(grid: Grid) {
        assert_eq!(grid.ng(), grid.e_bins().len() + 1);
        assert_eq!(grid.nx(), grid.x_bins().len());
        assert_eq!(grid.ny(), grid.y_bins().len());
        assert_eq!(grid.nz(), grid.z_bins().len());
        assert_eq!(grid.shape(), [2, 3, 2, 1, 5]);
        assert_eq!(grid.n_cells(), 12);
    }

    #[rstest]
    fn sizing_zeroes_storage(mut grid: Grid) {
        grid.set_cell(1, 2, 1, 0, [1.0, 2.0, 3.0, 4.0, 5.0]);
        grid.size();
        assert_eq!(grid.cell(1, 2, 1, 0).unwrap(), [0.0; 5]);
        assert_eq!(grid.shape(), [2, 3, 2, 1, 5]);
    }

    #[rstest]
    fn flat_index_is_row_major(grid: Grid) {
        assert_eq!(grid.flat_index(0, 0, 0, 0, Channel::XCenter), 0);
        assert_eq!(grid.flat_index(0, 0, 1, 0, Channel::XCenter), 5);
        assert_eq!(grid.flat_index(0, 1, 0, 0, Channel::XCenter), 10);
        assert_eq!(grid.flat_index(1, 0, 0, 0, Channel::Value), 33);
        assert_eq!(grid.flat_index(1, 2, 1, 0, Channel::RelError), 59);
    }

    #[rstest]
    fn cells_are_independent(mut grid: Grid) {
        grid.set_cell(0, 1, 1, 0, [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(grid.cell(0, 1, 1, 0).unwrap(), [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(grid.value(0, 1, 1, 0, Channel::Value).unwrap(), 0.4);
        assert_eq!(grid.cell(0, 1, 0, 0).unwrap(), [0.0; 5]);
        assert_eq!(grid.cell(1, 1, 1, 0).unwrap(), [0.0; 5]);
    }

    #[rstest]
    #[case(2, 0, 0, 0, Axis::Energy)]
    #[case(0, 3, 0, 0, Axis::X)]
    #[case(0, 0, 2, 0, Axis::Y)]
    #[case(0, 0, 0, 1, Axis::Z)]
    fn out_of_range_cells(
        grid: Grid,
        #[case] e: usize,
        #[case] x: usize,
        #[case] y: usize,
        #[case] z: usize,
        #[case] expected: Axis,
    ) {
        match grid.cell(e, x, y, z) {
            Err(Error::IndexOutOfRange { axis, .. }) => assert_eq!(axis, expected),
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[rstest]
    fn lookups_use_the_right_rule(grid: Grid) {
        assert_eq!(grid.energy_bin(100.0).unwrap(), 0);
        assert_eq!(grid.coordinate_bin(Axis::X, 2.0).unwrap(), 1);
        assert_eq!(grid.coordinate_bin(Axis::X, 2.0001).unwrap(), 2);
        assert_eq!(grid.coordinate_bin(Axis::Z, -50.0).unwrap(), 0);
    }

    #[rstest]
    #[case(Axis::Energy, 1)]
    #[case(Axis::X, 3)]
    #[case(Axis::Y, 2)]
    #[case(Axis::Z, 1)]
    fn mutable_bins_match_their_axis(mut grid: Grid, #[case] axis: Axis, #[case] before: usize) {
        grid.bins_mut(axis).push(500.0);
        assert_eq!(grid.bins(axis).len(), before + 1);
        assert_eq!(grid.bins(axis).last(), Some(&500.0));
    }

    #[rstest]
    fn stored_reads_the_checked_cell(mut grid: Grid) {
        grid.set_cell(1, 2, 1, 0, [0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(grid.stored(1, 2, 1, 0, Channel::RelError), 0.5);
        assert_eq!(
            grid.stored(1, 2, 1, 0, Channel::ZCenter),
            grid.value(1, 2, 1, 0, Channel::ZCenter).unwrap()
        );
    }

    #[test]
    fn unsized_grid_is_empty() {
        let grid = Grid::new(None);
        assert_eq!(grid.n_cells(), 0);
        assert!(grid.cell(0, 0, 0, 0).is_err());
        assert!(matches!(
            grid.energy_bin(1.0),
            Err(Error::EmptyAxis(Axis::Energy))
        ));
    }

    #[rstest]
    fn display_summary(grid: Grid) {
        let s = grid.to_string();
        assert!(s.contains("Mesh 104 [12 cells]"));
        assert!(s.contains("(3 bins)"));
        assert!(s.contains("MeV (2 bins)"));
    }
}
