//! Library of parser functions
//!
//! Lines are split on whitespace before they get here. Headers are recognised
//! from the first three words alone, and anything with fewer than three words
//! is never a header.

// internal modules
use crate::grid::Axis;
use crate::utils::f;

// external crates
use log::warn;

// nom parser combinators
use nom::character::complete::{digit1, one_of};
use nom::combinator::{all_consuming, recognize};
use nom::number::complete::double;
use nom::sequence::tuple;
use nom::IResult;

/// Every line the reader cares about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Header {
    /// `Mesh Tally Number <id>`
    NewTally,
    /// `X direction: ...`, `Y direction: ...`, or `Z direction: ...`
    AxisBounds(Axis),
    /// `Energy bin boundaries: ...`
    EnergyBounds,
    /// `Energy X Y Z Result Rel Error`
    DataTable,
}

impl Header {
    /// Number of leading words that make up the header tag
    pub fn tag_length(&self) -> usize {
        match self {
            Self::AxisBounds(_) => 2,
            _ => 3,
        }
    }
}

/// Recognise a header from the leading words of a line
pub fn header(words: &[&str]) -> Option<Header> {
    if words.len() < 3 {
        return None;
    }
    match (words[0], words[1], words[2]) {
        ("Mesh", "Tally", "Number") => Some(Header::NewTally),
        ("X", "direction:", _) => Some(Header::AxisBounds(Axis::X)),
        ("Y", "direction:", _) => Some(Header::AxisBounds(Axis::Y)),
        ("Z", "direction:", _) => Some(Header::AxisBounds(Axis::Z)),
        ("Energy", "bin", "boundaries:") => Some(Header::EnergyBounds),
        ("Energy", "X", "Y") => Some(Header::DataTable),
        _ => None,
    }
}

/// Tally number following `Mesh Tally Number`, if there is a valid one
pub fn tally_id(words: &[&str]) -> Option<u32> {
    let word: &str = words.get(3)?;
    all_consuming(nom::character::complete::u32::<&str, ()>)(word)
        .ok()
        .map(|(_, id)| id)
}

/// Parse every word into an f64, or return the first word that failed
pub fn numbers<'a>(words: &[&'a str]) -> Result<Vec<f64>, &'a str> {
    words
        .iter()
        .map(|word| number(word).ok_or(*word))
        .collect()
}

/// Parse a single word into an f64
///
/// Falls back on [broken_scientific_f64()] for anything that looks like an
/// exponent with the `E` missing.
pub fn number(word: &str) -> Option<f64> {
    match all_consuming(double::<&str, ()>)(word) {
        Ok((_, value)) => Some(value),
        Err(_) => all_consuming(broken_scientific_f64)(word)
            .ok()
            .map(|(_, value)| value),
    }
}

/// Parse scientific numbers where the `E` has been dropped
///
/// If the exponent goes into triple digits the `E` will be dropped to make
/// room for the exponent, e.g. `1.00000+100`. This puts the `E` back.
pub fn broken_scientific_f64(i: &str) -> IResult<&str, f64> {
    let (i, (value, sign, exponent)) = tuple((double, recognize(one_of("-+")), digit1))(i)?;
    let fixed = f!("{value}e{sign}{exponent}");
    warn!("Fixing formatting for: \"{value}{sign}{exponent}\" => {fixed}");

    match fixed.parse::<f64>() {
        Ok(number) => Ok((i, number)),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            i,
            nom::error::ErrorKind::Float,
        ))),
    }
}
