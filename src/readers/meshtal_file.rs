// internal modules
use crate::error::{Error, Result};
use crate::grid::{Axis, Grid};
use crate::readers::parsers::{self, Header};
use crate::utils::*;

// standard library
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

// external crates
use itertools::iproduct;
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, trace, warn};

/// A reader for column-format meshtal files
///
/// Scans the file once, line by line, and builds a [Grid] for every
/// `Mesh Tally Number` block found.
///
/// For each block the reader expects, in order:
///     - the `X/Y/Z direction:` bin boundaries
///     - the `Energy bin boundaries:`, which sizes the grid
///     - the `Energy X Y Z Result Rel Error` table header
///     - exactly one data row per cell, energy outermost then x, y, z
///
/// Anything else in the file is skipped over.
///
/// Notes:
///     - Any error aborts the whole read, no partial results are returned
///     - Broken exponential formatting is handled e.g. 1.00+002 => 1.00E+002
///     - A line limit is only checked outside of data tables, so a table
///       that has started is always read to the end
///     - Text parsed from memory never shows a progress bar
///
/// Example:
/// ```ignore
///     let path = Path::new(path);
///     let mut reader = MeshtalReader::new();
///     reader.set_max_lines(5000);
///     let grid_list = reader.parse(path).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MeshtalReader {
    /// Optionally stop scanning after this many lines
    max_lines: Option<usize>,
    /// Optionally extract only a specific tally block
    target_id: Option<u32>,
    /// Disable progress bar?
    disable_progress: bool,
}

/// High level methods
impl MeshtalReader {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses all tally blocks from a meshtal file
    pub fn parse(&self, path: &Path) -> Result<Vec<Grid>> {
        debug!("Reading {}", path.display());
        let file = File::open(path)?;
        self.scan_blocks(BufReader::new(file), self.progress_bar(true))
    }

    /// Parses all tally blocks from meshtal text already in memory
    pub fn parse_str(&self, text: &str) -> Result<Vec<Grid>> {
        self.scan_blocks(text.as_bytes(), self.progress_bar(false))
    }

    /// Parses all tally blocks from any buffered source
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Vec<Grid>> {
        self.scan_blocks(reader, self.progress_bar(true))
    }

    fn scan_blocks<R: BufRead>(&self, reader: R, progress_bar: Option<Bar>) -> Result<Vec<Grid>> {
        let mut scan = Scan::new(reader.lines(), self.max_lines, progress_bar);
        let mut state = ParseState::new(self.target_id);

        debug!("Parsing tally blocks");
        if let Some(bar) = &mut scan.progress_bar {
            bar.refresh()?;
        }

        while let Some((n, line)) = scan.next_line()? {
            let words: Vec<&str> = line.split_whitespace().collect();

            let Some(header) = parsers::header(&words) else {
                continue;
            };

            match header {
                Header::NewTally => {
                    if state.is_target_extracted() {
                        debug!("Target tally extracted, stopping early");
                        break;
                    }
                    state.new_block(n, parsers::tally_id(&words))?
                }
                Header::AxisBounds(axis) => {
                    state.read_axis_bounds(n, axis, &words[header.tag_length()..])?
                }
                Header::EnergyBounds => {
                    state.read_energy_bounds(n, &words[header.tag_length()..])?
                }
                Header::DataTable => state.read_data_table(n, &mut scan)?,
            }
        }

        // need an extra line for clean spacing if the progress bar is printed
        if scan.progress_bar.is_some() {
            eprintln!()
        };

        let grid_list = state.finish(scan.is_truncated)?;
        debug!("Extracted {} tally block(s)", grid_list.len());

        match self.target_id {
            Some(id) if grid_list.is_empty() => Err(Error::TallyNotFound(id)),
            _ => Ok(grid_list),
        }
    }

    /// Stop scanning after `max_lines` lines
    ///
    /// Unlimited by default. Any block that is not complete when the limit
    /// is hit is dropped with a warning.
    pub fn set_max_lines(&mut self, max_lines: usize) {
        self.max_lines = Some(max_lines);
    }

    /// Setter for specifying which tally block to target
    pub fn set_target_id(&mut self, target_id: u32) {
        self.target_id = Some(target_id);
    }

    /// Do not print the tqdm progress indicators
    pub fn disable_progress(&mut self) {
        debug!("Progress bar disabled");
        self.disable_progress = true;
    }

    /// Initialise the progress bar, unless disabled or not `wanted`
    fn progress_bar(&self, wanted: bool) -> Option<Bar> {
        if self.disable_progress || !wanted {
            return None;
        }
        BarBuilder::default()
            .delay(0.0)
            .unit(" lines")
            .unit_scale(true)
            .build()
            .ok()
    }
}

/// Line source with a counter, an optional limit, and progress tracking
struct Scan<R: BufRead> {
    lines: Lines<R>,
    /// Lines consumed so far, also the 1-based number of the last line
    line_number: usize,
    max_lines: Option<usize>,
    /// Set if the limit, rather than the end of input, stopped the scan
    is_truncated: bool,
    progress_bar: Option<Bar>,
}

impl<R: BufRead> Scan<R> {
    fn new(lines: Lines<R>, max_lines: Option<usize>, progress_bar: Option<Bar>) -> Self {
        Self {
            lines,
            line_number: 0,
            max_lines,
            is_truncated: false,
            progress_bar,
        }
    }

    /// Next line and its number, or None at the end of input or the limit
    fn next_line(&mut self) -> Result<Option<(usize, String)>> {
        if let Some(limit) = self.max_lines {
            if self.line_number >= limit {
                if !self.is_truncated {
                    warn!("Line limit of {limit} reached, stopping scan");
                }
                self.is_truncated = true;
                return Ok(None);
            }
        }
        self.next_row()
    }

    /// Next line regardless of the limit, used inside data tables
    fn next_row(&mut self) -> Result<Option<(usize, String)>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                let line = line?;
                self.line_number += 1;
                if let Some(bar) = &mut self.progress_bar {
                    bar.update(1)?;
                }
                Ok(Some((self.line_number, line)))
            }
        }
    }
}

/// How far the current block has got
#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    /// Collecting bin boundaries
    Open,
    /// Storage allocated, waiting for the data table
    Sized,
    /// Every cell written
    Filled,
}

/// What the reader is currently writing to
#[derive(Debug)]
enum Current {
    /// No block header seen yet
    Nothing,
    /// Inside a block that is not the target
    Skipping,
    /// Inside a block that is being built
    Building { grid: Grid, stage: Stage, line: usize },
}

/// Explicit parser state in place of a "last mesh" pointer
#[derive(Debug)]
struct ParseState {
    grid_list: Vec<Grid>,
    current: Current,
    target_id: Option<u32>,
}

impl ParseState {
    fn new(target_id: Option<u32>) -> Self {
        Self {
            grid_list: Vec::new(),
            current: Current::Nothing,
            target_id,
        }
    }

    /// Only true once the targeted block has been filled
    fn is_target_extracted(&self) -> bool {
        self.target_id.is_some()
            && matches!(
                self.current,
                Current::Building {
                    stage: Stage::Filled,
                    ..
                }
            )
    }

    /// Close off the current block and start a new one
    fn new_block(&mut self, n: usize, id: Option<u32>) -> Result<()> {
        self.close_block()?;

        match (self.target_id, id) {
            (Some(target), Some(id)) if target == id => (),
            (Some(_), _) => {
                trace!("[Tally {id:?}] skipped, not the target");
                self.current = Current::Skipping;
                return Ok(());
            }
            _ => (),
        }

        trace!("[Tally {id:?}] new block on line {n}");
        self.current = Current::Building {
            grid: Grid::new(id),
            stage: Stage::Open,
            line: n,
        };
        Ok(())
    }

    /// Record the boundaries following `X/Y/Z direction:`
    fn read_axis_bounds(&mut self, n: usize, axis: Axis, words: &[&str]) -> Result<()> {
        let Some((grid, stage)) = self.building(n, &f!("{axis} boundaries"))? else {
            return Ok(());
        };

        if *stage != Stage::Open {
            return Err(malformed(n, f!("{axis} boundaries after the grid was sized")));
        }

        let values = parse_header_values(n, words)?;
        let first_header = grid.bins(axis).is_empty();
        record_bounds(grid, axis, &values, first_header);

        if grid.bins(axis).is_empty() {
            return Err(malformed(n, f!("no upper {axis} bin boundaries listed")));
        }

        trace!("[{axis} bounds] {} bins extracted", grid.bins(axis).len());
        Ok(())
    }

    /// Record the `Energy bin boundaries:` and size the grid
    fn read_energy_bounds(&mut self, n: usize, words: &[&str]) -> Result<()> {
        let Some((grid, stage)) = self.building(n, "energy boundaries")? else {
            return Ok(());
        };

        if *stage != Stage::Open {
            return Err(malformed(n, "energy boundaries repeated for one tally"));
        }

        let values = parse_header_values(n, words)?;
        record_bounds(grid, Axis::Energy, &values, true);
        if grid.e_bins.is_empty() {
            return Err(malformed(n, "no upper energy bin boundaries listed"));
        }
        trace!(
            "[Energy bounds] {} bins extracted {:?}",
            grid.e_bins.len(),
            grid.e_bins
        );

        // every spatial axis needs at least one bin before sizing
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            if grid.bins(axis).is_empty() {
                return Err(malformed(n, f!("no {axis} boundaries before energy boundaries")));
            }
        }

        grid.size();
        *stage = Stage::Sized;
        debug!(
            "Sized grid to {:?} ({} data rows expected)",
            grid.shape(),
            grid.n_cells()
        );
        Ok(())
    }

    /// Consume the data table that follows the table header
    fn read_data_table<R: BufRead>(&mut self, n: usize, scan: &mut Scan<R>) -> Result<()> {
        let Some((grid, stage)) = self.building(n, "data table")? else {
            return Ok(());
        };

        match stage {
            Stage::Open => return Err(malformed(n, "data table before energy bin boundaries")),
            Stage::Filled => return Err(malformed(n, "second data table for one tally")),
            Stage::Sized => (),
        }

        trace!("[Data table] {} rows from line {}", grid.n_cells(), n + 1);
        let expected = grid.n_cells();
        let dims = (grid.ng(), grid.nx(), grid.ny(), grid.nz());

        for (found, (e, x, y, z)) in
            iproduct!(0..dims.0, 0..dims.1, 0..dims.2, 0..dims.3).enumerate()
        {
            let Some((row_number, row)) = scan.next_row()? else {
                return Err(Error::Dimension {
                    line: scan.line_number,
                    expected,
                    found,
                });
            };
            grid.set_cell(e, x, y, z, parse_data_row(row_number, &row)?);
        }

        *stage = Stage::Filled;
        Ok(())
    }

    /// Current grid and its stage, or None for a skipped block
    fn building(&mut self, n: usize, what: &str) -> Result<Option<(&mut Grid, &mut Stage)>> {
        match &mut self.current {
            Current::Nothing => Err(malformed(n, f!("{what} before any Mesh Tally Number"))),
            Current::Skipping => Ok(None),
            Current::Building { grid, stage, .. } => Ok(Some((grid, stage))),
        }
    }

    /// Move a completed block onto the list
    fn close_block(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.current, Current::Nothing) {
            Current::Building { grid, stage, line } => {
                Self::ensure_complete(&grid, stage, line)?;
                self.grid_list.push(grid);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Check the final block and hand over the list
    fn finish(mut self, is_truncated: bool) -> Result<Vec<Grid>> {
        if is_truncated {
            if let Current::Building { grid, stage, .. } = &self.current {
                if *stage != Stage::Filled {
                    warn!(
                        "Dropping tally {:?}, line limit reached before its data table",
                        grid.id()
                    );
                    self.current = Current::Nothing;
                }
            }
        }
        self.close_block()?;
        Ok(self.grid_list)
    }

    /// A block is only complete once its data table has been read
    fn ensure_complete(grid: &Grid, stage: Stage, line: usize) -> Result<()> {
        match stage {
            Stage::Filled => Ok(()),
            Stage::Sized => Err(Error::Dimension {
                line,
                expected: grid.n_cells(),
                found: 0,
            }),
            Stage::Open => Err(malformed(
                line,
                f!("tally {:?} has no energy bin boundaries", grid.id()),
            )),
        }
    }
}

/// Convenience for building a MalformedHeader error
fn malformed<S: Into<String>>(line: usize, reason: S) -> Error {
    Error::MalformedHeader {
        line,
        reason: reason.into(),
    }
}

/// Append header values to the boundaries of `axis`
///
/// On the first header for an axis the leading value is the lower edge of
/// the first bin. The first boundary appended is kept as the axis origin.
fn record_bounds(grid: &mut Grid, axis: Axis, values: &[f64], first_header: bool) {
    let slot = axis.origin_index();
    let upper = match values.split_first() {
        Some((&lower, upper)) if first_header => {
            grid.lower_edges[slot] = lower;
            upper
        }
        _ => values,
    };

    if let Some(&origin) = upper.first() {
        grid.axis_origin[slot] = origin;
    }
    grid.bins_mut(axis).extend_from_slice(upper);
}

/// Numbers following a header tag, any failure is a malformed header
fn parse_header_values(n: usize, words: &[&str]) -> Result<Vec<f64>> {
    parsers::numbers(words)
        .map_err(|word| malformed(n, f!("\"{word}\" is not a valid bin boundary")))
}

/// Columns 1-5 of a data row, the leading energy column is not kept
fn parse_data_row(n: usize, row: &str) -> Result<[f64; 5]> {
    let words: Vec<&str> = row.split_whitespace().collect();
    if words.len() < 6 {
        return Err(Error::Dimension {
            line: n,
            expected: 6,
            found: words.len(),
        });
    }

    let mut cell = [0.0; 5];
    for (value, word) in cell.iter_mut().zip(&words[1..6]) {
        *value = parsers::number(word).ok_or_else(|| Error::InvalidNumber {
            line: n,
            token: word.to_string(),
        })?;
    }
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Channel;
    use rstest::rstest;

    /// The 3x2x1 mesh with two energy groups used throughout
    const HEADER: &str = "\
 neutron   mesh tally.
 Tally bin boundaries:
Mesh Tally Number 24
 X direction:     0.00     1.00     2.00     3.00
 Y direction:     0.00     1.00     2.00
 Z direction:     0.00     1.00
 Energy bin boundaries: 0.00E+00 1.00E+02

   Energy         X         Y         Z     Result     Rel Error
";

    /// Data rows where every value encodes the row it came from
    fn rows(count: usize) -> String {
        (0..count)
            .map(|r| f!("  1.0E+02  {r}.1  {r}.2  {r}.3  {r}.4E-01  {r}.5E-02\n"))
            .collect()
    }

    #[test]
    fn round_trip_layout() {
        let text = f!("{HEADER}{}", rows(12));
        let grids = MeshtalReader::new().parse_str(&text).unwrap();
        assert_eq!(grids.len(), 1);

        let grid = &grids[0];
        assert_eq!(grid.id(), Some(24));
        assert_eq!(grid.shape(), [2, 3, 2, 1, 5]);
        assert_eq!(grid.x_bins(), &[1.0, 2.0, 3.0]);
        assert_eq!(grid.e_bins(), &[100.0]);
        assert_eq!(grid.axis_origin(), [1.0, 1.0, 1.0, 100.0]);
        assert_eq!(grid.lower_edges(), [0.0; 4]);

        for (e, x, y, z) in iproduct!(0..2, 0..3, 0..2, 0..1) {
            let r = (e * 3 * 2 + x * 2 + y + z) as f64;
            let expected = [
                r + 0.1,
                r + 0.2,
                r + 0.3,
                (r + 0.4) * 1e-1,
                (r + 0.5) * 1e-2,
            ];
            let cell = grid.cell(e, x, y, z).unwrap();
            for (a, b) in cell.iter().zip(expected) {
                assert!((a - b).abs() < 1e-12, "cell {:?} != {:?}", cell, expected);
            }
        }
    }

    #[test]
    fn short_table_is_a_dimension_error() {
        let text = f!("{HEADER}{}", rows(11));
        match MeshtalReader::new().parse_str(&text) {
            Err(Error::Dimension {
                expected, found, ..
            }) => {
                assert_eq!(expected, 12);
                assert_eq!(found, 11);
            }
            other => panic!("expected Dimension error, got {other:?}"),
        }
    }

    #[test]
    fn short_row_is_a_dimension_error() {
        let text = f!("{HEADER}{}  1.0 0.5 0.5 0.5 1.0\n", rows(5));
        assert!(matches!(
            MeshtalReader::new().parse_str(&text),
            Err(Error::Dimension {
                line: 15,
                expected: 6,
                found: 5
            })
        ));
    }

    #[test]
    fn bad_number_in_row() {
        let text = f!("{HEADER}{}  1.0 0.5 oops 0.5 1.0 0.1\n{}", rows(3), rows(8));
        assert!(matches!(
            MeshtalReader::new().parse_str(&text),
            Err(Error::InvalidNumber { line: 13, .. })
        ));
    }

    #[test]
    fn energy_echo_is_not_parsed() {
        let mut text = f!("{HEADER}{}", rows(6));
        for r in 6..12 {
            text += &f!("   Total  {r}.1  {r}.2  {r}.3  {r}.4E-01  {r}.5E-02\n");
        }
        let grid = MeshtalReader::new().parse_str(&text).unwrap().remove(0);
        assert_eq!(grid.value(1, 2, 1, 0, Channel::XCenter).unwrap(), 11.1);
    }

    #[rstest]
    #[case("X direction: 0 1 2\n")]
    #[case("Energy bin boundaries: 0 1\n")]
    #[case("Energy X Y Z Result Rel Error\n")]
    fn headers_before_any_block(#[case] text: &str) {
        assert!(matches!(
            MeshtalReader::new().parse_str(text),
            Err(Error::MalformedHeader { line: 1, .. })
        ));
    }

    #[rstest]
    #[case("Mesh Tally Number 1\nX direction: 0 one 2\n", 2)]
    #[case("Mesh Tally Number 1\nX direction: 0\n", 2)]
    #[case("Mesh Tally Number 1\nY direction: 0 1\nY direction: 2\nZ direction: 0\n", 4)]
    #[case(
        "Mesh Tally Number 1\nX direction: 0 1\nY direction: 0 1\nZ direction: 0 1\n\
         Energy bin boundaries:\n",
        5
    )]
    #[case(
        "Mesh Tally Number 1\nX direction: 0 1\nY direction: 0 1\nZ direction: 0 1\n\
         Energy bin boundaries: 0\n",
        5
    )]
    #[case(
        "Mesh Tally Number 1\nX direction: 0 1\nY direction: 0 1\n\
         Energy bin boundaries: 0 1\n",
        4
    )]
    #[case("Mesh Tally Number 1\nEnergy bin boundaries: 0 1\n", 2)]
    #[case(
        "Mesh Tally Number 1\nX direction: 0 1\nY direction: 0 1\nZ direction: 0 1\n\
         Energy bin boundaries: 0 1\nX direction: 0 1\n",
        6
    )]
    #[case(
        "Mesh Tally Number 1\nX direction: 0 1\nY direction: 0 1\nZ direction: 0 1\n\
         Energy bin boundaries: 0 1\nEnergy bin boundaries: 0 1\n",
        6
    )]
    #[case("Mesh Tally Number 1\nX direction: 0 1\nEnergy X Y Z Result Rel Error\n", 3)]
    fn malformed_headers(#[case] text: &str, #[case] expected_line: usize) {
        match MeshtalReader::new().parse_str(text) {
            Err(Error::MalformedHeader { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected MalformedHeader, got {other:?}"),
        }
    }

    #[rstest]
    #[case(" X direction:     0.00     1.00     2.00     3.00\n", " X direction:     0.00\n", 4)]
    #[case(" Z direction:     0.00     1.00\n", "", 6)]
    fn empty_axes_are_never_sized(
        #[case] header_line: &str,
        #[case] replacement: &str,
        #[case] expected_line: usize,
    ) {
        let text = f!("{}{}", HEADER.replace(header_line, replacement), rows(12));
        match MeshtalReader::new().parse_str(&text) {
            Err(Error::MalformedHeader { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected MalformedHeader, got {other:?}"),
        }
    }

    #[test]
    fn repeated_axis_headers_append() {
        let text = HEADER.replace(
            " Y direction:     0.00     1.00     2.00\n",
            " Y direction:     0.00     1.00\n Y direction:     2.00\n",
        );
        let grid = MeshtalReader::new()
            .parse_str(&f!("{text}{}", rows(12)))
            .unwrap()
            .remove(0);
        assert_eq!(grid.y_bins(), &[1.0, 2.0]);
        assert_eq!(grid.lower_edges()[1], 0.0);
        // origin follows the first value of the latest header
        assert_eq!(grid.axis_origin()[1], 2.0);
    }

    #[test]
    fn short_header_lines_are_ignored() {
        let text = f!("X direction:\nMesh Tally\nEnergy bin\n{HEADER}{}", rows(12));
        let grids = MeshtalReader::new().parse_str(&text).unwrap();
        assert_eq!(grids[0].shape(), [2, 3, 2, 1, 5]);
    }

    #[test]
    fn block_without_a_table() {
        let text = HEADER.replace("   Energy         X", "   Result         X");
        assert!(matches!(
            MeshtalReader::new().parse_str(&text),
            Err(Error::Dimension {
                expected: 12,
                found: 0,
                ..
            })
        ));
    }

    #[test]
    fn block_without_energy_bounds() {
        let text = "Mesh Tally Number 1\nX direction: 0 1\nMesh Tally Number 2\n";
        assert!(matches!(
            MeshtalReader::new().parse_str(text),
            Err(Error::MalformedHeader { line: 1, .. })
        ));
    }

    #[test]
    fn multiple_blocks_in_order() {
        let text = f!("{HEADER}{}{}{}", rows(12), HEADER.replace("24", "34"), rows(12));
        let grids = MeshtalReader::new().parse_str(&text).unwrap();
        let ids: Vec<Option<u32>> = grids.iter().map(|g| g.id()).collect();
        assert_eq!(ids, vec![Some(24), Some(34)]);
        assert_eq!(grids[0].shape(), grids[1].shape());
        assert_eq!(
            grids[0].cell(1, 2, 1, 0).unwrap(),
            grids[1].cell(1, 2, 1, 0).unwrap()
        );
    }

    #[test]
    fn target_block_only() {
        let text = f!("{HEADER}{}{}{}", rows(12), HEADER.replace("24", "34"), rows(12));
        let mut reader = MeshtalReader::new();
        reader.set_target_id(34);
        let grids = reader.parse_str(&text).unwrap();
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].id(), Some(34));

        reader.set_target_id(44);
        assert!(matches!(
            reader.parse_str(&text),
            Err(Error::TallyNotFound(44))
        ));
    }

    #[rstest]
    #[case(2, vec![])] // nothing but the preamble
    #[case(8, vec![])] // sized, but the table header is out of reach
    #[case(9, vec![24])] // table header is the last line allowed
    #[case(15, vec![24])] // limit inside the first table
    #[case(28, vec![24])] // second block never reaches its table
    #[case(30, vec![24, 34])]
    #[case(1000, vec![24, 34])]
    fn line_limit_keeps_complete_blocks(#[case] max_lines: usize, #[case] expected: Vec<u32>) {
        let text = f!("{HEADER}{}{}{}", rows(12), HEADER.replace("24", "34"), rows(12));
        let mut reader = MeshtalReader::new();
        reader.set_max_lines(max_lines);

        let ids: Vec<u32> = reader
            .parse_str(&text)
            .unwrap()
            .iter()
            .filter_map(|g| g.id())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn line_limit_never_splits_a_table() {
        let mut reader = MeshtalReader::new();
        reader.set_max_lines(11);

        // read on past the limit to the last row
        let grid = reader
            .parse_str(&f!("{HEADER}{}", rows(12)))
            .unwrap()
            .remove(0);
        assert_eq!(grid.value(1, 2, 1, 0, Channel::XCenter).unwrap(), 11.1);

        // and a table that ends early is still short
        assert!(matches!(
            reader.parse_str(&f!("{HEADER}{}", rows(4))),
            Err(Error::Dimension {
                expected: 12,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn progress_bar_only_for_streams() {
        let mut reader = MeshtalReader::new();
        assert!(reader.progress_bar(false).is_none());

        reader.disable_progress();
        assert!(reader.progress_bar(true).is_none());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = MeshtalReader::new().parse(Path::new("./no/such/file.msht"));
        assert!(matches!(result, Err(Error::IOError(_))));
    }
}
