// CoilCalc - Planar Coil Inductance Calculator
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! SI-prefixed rendering of inductances.
//!
//! Values are bucketed into base-1000 bands, `band = floor(log10(|x|) / 3)`,
//! and printed with a fixed number of fractional digits. Bands outside the
//! prefix table fall back to an explicit exponent (`1.500e18H`).
//!
//! Rounding is whatever `format!("{:.N}")` does: the exact binary value is
//! rounded to the nearest decimal, exact ties go to even.

pub const DEFAULT_DECIMAL_PLACES: usize = 3;

const UNIT: &str = "H";

/// Prefixes for bands -5 (femto) through +4 (tera).
const PREFIXES: [&str; 10] = ["f", "p", "n", "µ", "m", "", "k", "M", "G", "T"];
const LOWEST_BAND: i32 = -5;

fn prefix_for_band(band: i32) -> Option<&'static str> {
    let index = usize::try_from(band - LOWEST_BAND).ok()?;
    PREFIXES.get(index).copied()
}

/// `value / 10^exponent` without the power itself overflowing or flushing to zero.
fn scale_down(value: f64, exponent: i32) -> f64 {
    if (f64::MIN_10_EXP..=f64::MAX_10_EXP).contains(&exponent) {
        return value / 10f64.powf(f64::from(exponent));
    }
    let half = exponent / 2;
    value / 10f64.powf(f64::from(half)) / 10f64.powf(f64::from(exponent - half))
}

/// Render `value` henries with `decimal_places` fractional digits.
pub fn format_magnitude(value: f64, decimal_places: usize) -> String {
    if value == 0.0 {
        return format!("{:.*}{}", decimal_places, 0.0, UNIT);
    }
    if !value.is_finite() {
        return format!("{}{}", value, UNIT);
    }

    // Finite non-zero doubles keep log10 within about ±324, so the cast is exact.
    let band = (value.abs().log10() / 3.0).floor() as i32;
    let exponent = band * 3;
    let scaled = scale_down(value, exponent);

    match prefix_for_band(band) {
        Some(prefix) => format!("{:.*}{}{}", decimal_places, scaled, prefix, UNIT),
        None => format!("{:.*}e{}{}", decimal_places, scaled, exponent, UNIT),
    }
}

/// [`format_magnitude`] with [`DEFAULT_DECIMAL_PLACES`].
pub fn format_inductance(value: f64) -> String {
    format_magnitude(value, DEFAULT_DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_never_prefixed() {
        assert_eq!(format_magnitude(0.0, 3), "0.000H");
        assert_eq!(format_magnitude(-0.0, 3), "0.000H");
        assert_eq!(format_magnitude(0.0, 0), "0H");
    }

    #[test]
    fn test_prefixed_bands() {
        assert_eq!(format_magnitude(482.113e-9, 3), "482.113nH");
        assert_eq!(format_magnitude(-250e-6, 3), "-250.000µH");
        assert_eq!(format_magnitude(1.384087912087912e-6, 3), "1.384µH");
        assert_eq!(format_magnitude(7.072211817782386e-7, 3), "707.221nH");
        assert_eq!(format_magnitude(2.5e-3, 3), "2.500mH");
        assert_eq!(format_magnitude(4.7, 3), "4.700H");
        assert_eq!(format_magnitude(12.5e3, 3), "12.500kH");
        assert_eq!(format_magnitude(3.3e6, 1), "3.3MH");
        assert_eq!(format_magnitude(-7.5e9, 2), "-7.50GH");
        assert_eq!(format_magnitude(2.0e12, 3), "2.000TH");
        assert_eq!(format_magnitude(47e-12, 3), "47.000pH");
        assert_eq!(format_magnitude(1.5e-15, 3), "1.500fH");
    }

    #[test]
    fn test_exponent_fallback_above_tera() {
        assert_eq!(format_magnitude(1.5e18, 3), "1.500e18H");
        assert_eq!(format_magnitude(-4.2e15, 2), "-4.20e15H");
    }

    #[test]
    fn test_exponent_fallback_below_femto() {
        assert_eq!(format_magnitude(1e-20, 3), "10.000e-21H");
        assert_eq!(format_magnitude(2.5e-300, 3), "2.500e-300H");
    }

    #[test]
    fn test_subnormal_magnitude_takes_exponent_path() {
        let s = format_magnitude(5e-320, 3);
        assert!(s.ends_with("e-321H"), "{}", s);
        assert!(!s.contains("inf"), "{}", s);
    }

    #[test]
    fn test_smallest_subnormals_stay_finite() {
        assert_eq!(format_magnitude(5e-324, 3), "4.941e-324H");
        assert_eq!(format_magnitude(-1e-323, 3), "-9.881e-324H");
        assert_eq!(format_magnitude(f64::MIN_POSITIVE / 2.0, 3), "11.125e-309H");
    }

    #[test]
    fn test_largest_magnitudes() {
        assert_eq!(format_magnitude(f64::MAX, 3), "179.769e306H");
    }

    #[test]
    fn test_non_finite_values() {
        assert_eq!(format_magnitude(f64::NAN, 3), "NaNH");
        assert_eq!(format_magnitude(f64::INFINITY, 3), "infH");
        assert_eq!(format_magnitude(f64::NEG_INFINITY, 3), "-infH");
    }

    #[test]
    fn test_decimal_places() {
        assert_eq!(format_magnitude(482.113e-9, 0), "482nH");
        assert_eq!(format_magnitude(482.113e-9, 5), "482.11300nH");
        assert_eq!(format_inductance(482.113e-9), "482.113nH");
    }

    #[test]
    fn test_idempotent() {
        for v in [0.0, 1.0e-7, -3.3e-5, 9.99e20, f64::MIN_POSITIVE] {
            assert_eq!(format_magnitude(v, 3), format_magnitude(v, 3));
        }
    }
}
