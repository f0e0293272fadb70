//! Resolve a value to a bin index along one axis
//!
//! Two rules are kept deliberately separate. Energy boundaries are matched
//! strictly, so a value sitting exactly on a boundary belongs to the next
//! group up. Coordinate boundaries are matched inclusively, so a value on a
//! boundary belongs to the bin that boundary closes.
//!
//! | Boundaries    | Value | Energy bin | Coordinate bin |
//! | ------------- | ----- | ---------- | -------------- |
//! | 1.0 2.0 3.0   | 0.5   | 0          | 0              |
//! | 1.0 2.0 3.0   | 1.0   | 1          | 0              |
//! | 1.0 2.0 3.0   | 2.5   | 2          | 2              |
//! | 1.0 2.0 3.0   | 9.0   | 2          | 2              |
//!
//! Values beyond the last boundary clamp to the last bin for both rules. A
//! `NaN` never compares true, so it also ends up in the last bin.

// internal modules
use crate::error::{Error, Result};
use crate::grid::Axis;

// external crates
use log::trace;

/// Find the energy bin for `value`
///
/// Returns the index of the first boundary strictly greater than `value`, or
/// the last index if there is none.
///
/// ```rust
/// # use meshslice::bins::choose_energy_bin;
/// let e_bins = [1.0, 10.0, 100.0];
/// assert_eq!(choose_energy_bin(&e_bins, 0.5).unwrap(), 0);
/// assert_eq!(choose_energy_bin(&e_bins, 10.0).unwrap(), 2);
/// assert_eq!(choose_energy_bin(&e_bins, 1e6).unwrap(), 2);
/// ```
pub fn choose_energy_bin(boundaries: &[f64], value: f64) -> Result<usize> {
    let last = last_index(Axis::Energy, boundaries)?;
    let index = boundaries
        .iter()
        .position(|&bound| bound > value)
        .unwrap_or(last);

    trace!(
        "Chose energy bin {index} with upper limit {} for {value}",
        boundaries[index]
    );
    Ok(index)
}

/// Find the coordinate bin for `value` along `axis`
///
/// Returns the index of the first boundary greater than or equal to `value`,
/// or the last index if there is none. The `axis` is only used to name the
/// axis in errors and logs.
///
/// ```rust
/// # use meshslice::bins::choose_coordinate_bin;
/// # use meshslice::grid::Axis;
/// let x_bins = [1.0, 2.0, 3.0];
/// assert_eq!(choose_coordinate_bin(Axis::X, &x_bins, 1.0).unwrap(), 0);
/// assert_eq!(choose_coordinate_bin(Axis::X, &x_bins, 1.5).unwrap(), 1);
/// assert!(choose_coordinate_bin(Axis::X, &[], 1.5).is_err());
/// ```
pub fn choose_coordinate_bin(axis: Axis, boundaries: &[f64], value: f64) -> Result<usize> {
    let last = last_index(axis, boundaries)?;
    let index = boundaries
        .iter()
        .position(|&bound| value <= bound)
        .unwrap_or(last);

    trace!(
        "Chose {axis} bin {index} with upper limit {} for {value}",
        boundaries[index]
    );
    Ok(index)
}

/// Last valid index, or an error if there is nothing to choose from
fn last_index(axis: Axis, boundaries: &[f64]) -> Result<usize> {
    match boundaries.len() {
        0 => Err(Error::EmptyAxis(axis)),
        n => Ok(n - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BOUNDS: [f64; 4] = [-5.0, 0.0, 2.5, 10.0];

    #[rstest]
    #[case(-100.0, 0)]
    #[case(-5.0, 1)] // exactly on a boundary goes up a bin
    #[case(-1.0, 1)]
    #[case(0.0, 2)]
    #[case(2.5, 3)]
    #[case(9.99, 3)]
    #[case(10.0, 3)] // nothing greater, clamp to last
    #[case(1e36, 3)]
    fn energy_rule_is_strict(#[case] value: f64, #[case] expected: usize) {
        assert_eq!(choose_energy_bin(&BOUNDS, value).unwrap(), expected);
    }

    #[rstest]
    #[case(-100.0, 0)]
    #[case(-5.0, 0)] // exactly on a boundary stays in that bin
    #[case(-1.0, 1)]
    #[case(0.0, 1)]
    #[case(2.5, 2)]
    #[case(9.99, 3)]
    #[case(10.0, 3)]
    #[case(1e36, 3)]
    fn coordinate_rule_is_inclusive(#[case] value: f64, #[case] expected: usize) {
        assert_eq!(
            choose_coordinate_bin(Axis::Y, &BOUNDS, value).unwrap(),
            expected
        );
    }

    #[test]
    fn rules_disagree_only_on_boundaries() {
        for &bound in &BOUNDS[..3] {
            let e = choose_energy_bin(&BOUNDS, bound).unwrap();
            let c = choose_coordinate_bin(Axis::Z, &BOUNDS, bound).unwrap();
            assert_eq!(e, c + 1);
        }
        assert_eq!(
            choose_energy_bin(&BOUNDS, 1.0).unwrap(),
            choose_coordinate_bin(Axis::Z, &BOUNDS, 1.0).unwrap()
        );
    }

    #[test]
    fn both_rules_are_monotonic() {
        let values: Vec<f64> = (-80..=160).map(|v| v as f64 * 0.125).collect();
        for pair in values.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            assert!(
                choose_energy_bin(&BOUNDS, lo).unwrap() <= choose_energy_bin(&BOUNDS, hi).unwrap()
            );
            assert!(
                choose_coordinate_bin(Axis::X, &BOUNDS, lo).unwrap()
                    <= choose_coordinate_bin(Axis::X, &BOUNDS, hi).unwrap()
            );
        }
    }

    #[test]
    fn single_boundary_always_resolves_to_zero() {
        assert_eq!(choose_energy_bin(&[100.0], -1.0).unwrap(), 0);
        assert_eq!(choose_energy_bin(&[100.0], 100.0).unwrap(), 0);
        assert_eq!(choose_coordinate_bin(Axis::X, &[1.0], 5.0).unwrap(), 0);
    }

    #[test]
    fn nan_clamps_to_last_bin() {
        assert_eq!(choose_energy_bin(&BOUNDS, f64::NAN).unwrap(), 3);
        assert_eq!(choose_coordinate_bin(Axis::X, &BOUNDS, f64::NAN).unwrap(), 3);
    }

    #[test]
    fn empty_axis_is_an_error() {
        assert!(matches!(
            choose_energy_bin(&[], 1.0),
            Err(Error::EmptyAxis(Axis::Energy))
        ));
        assert!(matches!(
            choose_coordinate_bin(Axis::Y, &[], 1.0),
            Err(Error::EmptyAxis(Axis::Y))
        ));
    }
}
