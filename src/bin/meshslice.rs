//! Command line extraction of lines and planes from meshtal files
//!
//! Provides a quick way of pulling a 1D line or 2D plane of results out of
//! any tally block in a column-format meshtal file, ready for plotting with
//! whatever tool is preferred.
//!
//! # Usage
//!
//! ```text
//! Usage: meshslice <meshtal> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples, default
//! values, examples, and any important behaviour.
//!
//! ### Planes (--plane)
//!
//! A plane is chosen by the axis it is normal to, and either a coordinate or
//! a bin index along that axis.
//!
//! ```bash
//! # XY plane through z = 12.5 cm in the first energy group
//! meshslice /path/to/meshtal.msht --plane z --at 12.5
//!
//! # YZ plane at the third x bin for the group containing 2 MeV
//! meshslice /path/to/meshtal.msht --plane x --bin 2 --energy 2.0
//! ```
//!
//! ### Lines (--line)
//!
//! A line is chosen by the axis it runs along, and the two remaining
//! coordinates (in x, y, z order) or bin indices.
//!
//! ```bash
//! # Line along y through (x, z) = (1.0, -3.5)
//! meshslice /path/to/meshtal.msht --line y --at 1.0 -3.5
//! ```
//!
//! ### Result outputs
//!
//! Results are written as columns to `slice.txt` by default, or as JSON to
//! `slice.json` with the `--json` flag. Use `--output` to rename.
//!
//! Note that coordinates on a bin boundary belong to the lower bin, while
//! energies on a boundary belong to the group above.

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// Crate modules
use meshslice::grid::{Axis, Grid, Line, Plane};
use meshslice::utils::*;
use meshslice::MeshtalReader;

// External crates
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::*;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make Info the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    // Get the tally block of interest
    info!("Reading {}", &cli.meshtal);
    let grid = try_meshtal_read(&cli)?;
    info!("Mesh read successful");

    if cli.info {
        println!("{grid}");
    }

    // work out what was asked for and extract it
    let slice = match (cli.plane, cli.line) {
        (Some(normal), None) => Slice::Plane(extract_plane(&grid, &cli, normal.into())?),
        (None, Some(along)) => Slice::Line(extract_line(&grid, &cli, along.into())?),
        (None, None) if cli.info => return Ok(()),
        _ => bail!("Provide exactly one of --plane or --line"),
    };

    // output to a file
    let description = match grid.id() {
        Some(id) => f!("fmesh {id}"),
        None => "fmesh".to_string(),
    };
    match cli.json {
        true => write_json(&slice, &cli),
        false => write_columns(&slice, &cli, &description),
    }
}

/// Extract lines and planes from meshtal files
///
/// Reads a column-format meshtal file and writes a 1D line or 2D plane
/// of results to a text or JSON file for plotting.
///
/// Positions are given as coordinates (--at) or bin indices (--bin).
/// Energy groups are given as an energy (--energy) or an index
/// (--group). The first group is used if neither is given.
///
/// Examples
/// --------
///
///  Typical use:
///     $ meshslice run0.msht --plane z --at 12.5
///
///  Plane by bin index for a specific tally:
///     $ meshslice run0.msht --tally 104 --plane x --bin 0
///
///  Line along y through (x, z), for the group containing 2 MeV:
///     $ meshslice run0.msht --line y --at 1.0 -3.5 --energy 2.0
///
///  Summary of the tally bins only:
///     $ meshslice run0.msht --tally 104 --info
///
/// Notes
/// -----
///
/// Coordinates exactly on a boundary are in the lower bin. Energies
/// exactly on a boundary are in the group above.
///
/// Planes need more than one bin along both spanning axes.
#[allow(rustdoc::invalid_rust_codeblocks)]
#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: meshslice run0.msht --plane z --at 12.5\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("meshslice <meshtal> [options]")
)]
struct Cli {
    // * Positional
    /// Path to input meshtal file
    #[arg(name = "meshtal")]
    meshtal: String,

    // * Optional
    /// Mesh tally identifier
    ///
    /// e.g. 104 for FMESH104:n. The first block in the file is
    /// used if not provided.
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    #[arg(value_name = "id")]
    tally: Option<u32>,

    /// Stop reading after this many lines
    ///
    /// Unlimited by default. A data table that has started is
    /// always read in full, blocks that have not reached their
    /// table by the limit are dropped.
    #[arg(help_heading("Mesh options"))]
    #[arg(long)]
    #[arg(value_name = "n")]
    max_lines: Option<usize>,

    /// Print a summary of the mesh bins
    #[arg(help_heading("Mesh options"))]
    #[arg(short, long)]
    info: bool,

    /// Plane normal to an axis (x, y, z)
    ///
    /// e.g. '--plane z' is the XY plane.
    #[arg(help_heading("Slice options"))]
    #[arg(short, long, value_enum)]
    #[arg(conflicts_with("line"))]
    #[arg(value_name = "axis")]
    plane: Option<SliceAxis>,

    /// Line along an axis (x, y, z)
    ///
    /// e.g. '--line y' varies y for fixed x and z.
    #[arg(help_heading("Slice options"))]
    #[arg(short, long, value_enum)]
    #[arg(value_name = "axis")]
    line: Option<SliceAxis>,

    /// Fixed coordinate(s) of the slice
    ///
    /// One value for a plane, two for a line given in x, y, z
    /// order with the free axis left out.
    #[arg(help_heading("Slice options"))]
    #[arg(short, long)]
    #[arg(allow_negative_numbers(true), num_args(1..=2))]
    #[arg(conflicts_with("bin"))]
    #[arg(value_name = "coords")]
    at: Vec<f64>,

    /// Fixed bin index(es) of the slice
    ///
    /// Same ordering as --at, but with bin indices instead.
    #[arg(help_heading("Slice options"))]
    #[arg(short, long)]
    #[arg(num_args(1..=2))]
    #[arg(value_name = "idx")]
    bin: Vec<usize>,

    /// Energy to choose the group by (MeV)
    #[arg(help_heading("Slice options"))]
    #[arg(short, long)]
    #[arg(conflicts_with("group"))]
    #[arg(value_name = "value")]
    energy: Option<f64>,

    /// Energy group index
    #[arg(help_heading("Slice options"))]
    #[arg(short, long)]
    #[arg(value_name = "idx")]
    group: Option<usize>,

    /// Write JSON rather than columns
    #[arg(help_heading("Output options"))]
    #[arg(short, long)]
    json: bool,

    /// Name of output file
    ///
    /// Defaults to `slice.txt`, or `slice.json` with --json.
    #[arg(help_heading("Output options"))]
    #[arg(short, long)]
    #[arg(value_name = "path")]
    output: Option<String>,

    // * Flags
    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG (-v)
    /// or TRACE (-vv). Errors and Warnings are always logged unless in quiet
    /// (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

/// Spatial axes available on the command line
#[doc(hidden)]
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SliceAxis {
    X,
    Y,
    Z,
}

impl From<SliceAxis> for Axis {
    fn from(axis: SliceAxis) -> Self {
        match axis {
            SliceAxis::X => Axis::X,
            SliceAxis::Y => Axis::Y,
            SliceAxis::Z => Axis::Z,
        }
    }
}

/// Whatever was extracted
#[doc(hidden)]
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
enum Slice {
    Line(Line),
    Plane(Plane),
}

#[doc(hidden)]
fn try_meshtal_read(cli: &Cli) -> Result<Grid> {
    let path: &Path = Path::new(&cli.meshtal);

    let mut reader = MeshtalReader::new();
    if cli.quiet || cli.verbose > 1 {
        reader.disable_progress();
    }
    if let Some(id) = cli.tally {
        reader.set_target_id(id);
    }
    if let Some(n) = cli.max_lines {
        reader.set_max_lines(n);
    }

    let grid_list = reader
        .parse(path)
        .with_context(|| f!("Failed to read {}", path.display()))?;

    grid_list
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No complete tally blocks found in {}", cli.meshtal))
}

/// Energy group index from --group or --energy, defaulting to the first
#[doc(hidden)]
fn energy_group(grid: &Grid, cli: &Cli) -> Result<usize> {
    match (cli.group, cli.energy) {
        (Some(idx), _) => Ok(idx),
        (None, Some(energy)) => Ok(grid.energy_bin(energy)?),
        (None, None) => Ok(0),
    }
}

/// Bin indices for the fixed axes, from --bin or --at
#[doc(hidden)]
fn fixed_bins(grid: &Grid, cli: &Cli, axes: &[Axis]) -> Result<Vec<usize>> {
    if !cli.bin.is_empty() {
        if cli.bin.len() != axes.len() {
            bail!("Expected {} value(s) for --bin", axes.len());
        }
        return Ok(cli.bin.clone());
    }

    if cli.at.len() != axes.len() {
        bail!("Expected {} value(s) for --at or --bin", axes.len());
    }

    axes.iter()
        .zip(&cli.at)
        .map(|(&axis, &value)| -> Result<usize> {
            let idx = grid.coordinate_bin(axis, value)?;
            debug!("{axis} = {value} is in bin {idx}");
            Ok(idx)
        })
        .collect()
}

#[doc(hidden)]
fn extract_plane(grid: &Grid, cli: &Cli, normal: Axis) -> Result<Plane> {
    let idx = fixed_bins(grid, cli, &[normal])?[0];
    let e = energy_group(grid, cli)?;
    info!("Extracting plane normal to {normal} at bin {idx}, energy group {e}");

    let plane = match normal {
        Axis::X => grid.plane_yz(idx, e)?,
        Axis::Y => grid.plane_xz(idx, e)?,
        _ => grid.plane_xy(idx, e)?,
    };

    debug!(
        "Plane shape {:?}, results {} to {}",
        plane.shape(),
        plane.min_value().sci(5, 2),
        plane.max_value().sci(5, 2)
    );
    Ok(plane)
}

#[doc(hidden)]
fn extract_line(grid: &Grid, cli: &Cli, along: Axis) -> Result<Line> {
    let e = energy_group(grid, cli)?;
    let line = match along {
        Axis::X => {
            let fixed = fixed_bins(grid, cli, &[Axis::Y, Axis::Z])?;
            grid.line_along_x(fixed[0], fixed[1], e)?
        }
        Axis::Y => {
            let fixed = fixed_bins(grid, cli, &[Axis::X, Axis::Z])?;
            grid.line_along_y(fixed[0], fixed[1], e)?
        }
        _ => {
            let fixed = fixed_bins(grid, cli, &[Axis::X, Axis::Y])?;
            grid.line_along_z(fixed[0], fixed[1], e)?
        }
    };
    info!("Extracted {} points along {along}, energy group {e}", line.len());
    Ok(line)
}

#[doc(hidden)]
fn get_writer(path: &str) -> Result<BufWriter<File>> {
    let f = File::create(path).with_context(|| f!("Could not create {path}"))?;
    Ok(BufWriter::new(f))
}

/// Write the slice as whitespace separated columns
#[doc(hidden)]
fn write_columns(slice: &Slice, cli: &Cli, description: &str) -> Result<()> {
    let path = cli.output.clone().unwrap_or("slice.txt".to_string());
    info!("Writing results to {}", path);
    let mut f = get_writer(&path)?;

    match slice {
        Slice::Line(line) => {
            let axis = line.along.map(|a| a.to_string()).unwrap_or_default();
            writeln!(f, "# {description}, line along {axis}")?;
            writeln!(f, "# {:>11} {:>13}", f!("{axis}_coord"), "result")?;
            for (c, v) in line.coordinates.iter().zip(&line.values) {
                writeln!(f, "{:>13} {:>13}", c.sci(5, 2), v.sci(5, 2))?;
            }
        }
        Slice::Plane(plane) => {
            let (a, b) = match plane.axes {
                Some((a, b)) => (a.to_string(), b.to_string()),
                None => ("i".to_string(), "j".to_string()),
            };
            writeln!(f, "# {description}, {a}{b} plane {:?}", plane.shape())?;
            writeln!(
                f,
                "# {:>11} {:>13} {:>13} {:>13}",
                f!("{a}_coord"),
                f!("{b}_coord"),
                "result",
                "error"
            )?;
            for (i, row) in plane.values.iter().enumerate() {
                for (j, value) in row.iter().enumerate() {
                    writeln!(
                        f,
                        "{:>13} {:>13} {:>13} {:>13.4}",
                        plane.first[i][j].sci(5, 2),
                        plane.second[i][j].sci(5, 2),
                        value.sci(5, 2),
                        plane.errors[i][j]
                    )?;
                }
                // blank line between rows for gnuplot style surface plots
                writeln!(f)?;
            }
        }
    }
    Ok(())
}

/// Write the slice to json
#[doc(hidden)]
fn write_json(slice: &Slice, cli: &Cli) -> Result<()> {
    let path = cli.output.clone().unwrap_or("slice.json".to_string());
    info!("Writing JSON format to {}", path);
    let writer = get_writer(&path)?;
    Ok(serde_json::to_writer_pretty(writer, slice)?)
}

/// generates a banner for cli tool consistency
#[doc(hidden)]
fn banner() -> String {
    let mut s = f!("{:-<1$}\n", "", 70);
    s += &f!("{:^70}\n", "Meshslice :: Line and plane extraction");
    s += &f!("{:-<1$}", "", 70);
    s
}

#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    let result = stderrlog::new()
        .modules(vec![
            module_path!(),
            "meshslice::bins",
            "meshslice::grid",
            "meshslice::readers",
        ])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init();

    if let Err(e) = result {
        eprintln!("Logging already initialised: {e}");
    }
}
