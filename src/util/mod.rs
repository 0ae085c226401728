//! Internal utility functions and helpers.
//!
//! This module contains small helper functions used throughout the crate.
//! It is an implementation detail and not part of the public API.

/// Parses a decimal number from raw field bytes.
///
/// Always uses `.` as the decimal separator; the process locale plays no
/// part. Surrounding ASCII whitespace is ignored. Parses the bytes directly,
/// so nothing is copied or decoded first.
pub(crate) fn parse_decimal(field: &[u8]) -> Result<f64, &'static str> {
    let digits = field.trim_ascii();
    if digits.is_empty() {
        return Err("empty value field");
    }
    let value: f64 =
        fast_float2::parse(digits).map_err(|_| "value field is not a decimal number")?;
    if !value.is_finite() {
        return Err("value field is not a finite number");
    }
    Ok(value)
}
