//! Unit conversion and fixed-width number formatting shared by the cube
//! reader and writer.

use std::io::{self, Write};

/// Bohr radius in Å (CODATA 2018).
pub const BOHR_TO_ANGSTROM: f64 = 0.529177210903;
pub const ANGSTROM_TO_BOHR: f64 = 1.0 / BOHR_TO_ANGSTROM;

/// Converts a vector from file units (Bohr) to internal units (Å).
#[inline]
pub fn to_internal(v: [f64; 3]) -> [f64; 3] {
    v.map(|c| c * BOHR_TO_ANGSTROM)
}

/// Converts a vector from internal units (Å) to file units (Bohr).
#[inline]
pub fn to_file(v: [f64; 3]) -> [f64; 3] {
    v.map(|c| c * ANGSTROM_TO_BOHR)
}

pub const INT_WIDTH: usize = 5;
pub const FLOAT_WIDTH: usize = 12;
pub const FLOAT_PRECISION: usize = 6;
pub const VOXEL_WIDTH: usize = 13;
pub const VOXEL_PRECISION: usize = 5;

pub fn write_fixed_int<W: Write>(writer: &mut W, number: i64) -> io::Result<()> {
    write!(writer, "{number:>INT_WIDTH$}")
}

pub fn write_fixed_float<W: Write>(writer: &mut W, number: f64) -> io::Result<()> {
    write!(writer, "{number:>FLOAT_WIDTH$.FLOAT_PRECISION$}")
}

pub fn write_scientific<W: Write>(writer: &mut W, number: f64) -> io::Result<()> {
    let text = format_scientific(number, VOXEL_PRECISION);
    write!(writer, "{text:>VOXEL_WIDTH$}")
}

/// Formats `value` like C's `%.Ne`: the exponent always carries a sign and at
/// least two digits (`1.50000e-03`, `-2.00000e+10`).
pub fn format_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rust_style = format!("{value:.precision$e}");
    let Some((mantissa, exponent)) = rust_style.split_once('e') else {
        return rust_style;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
}
