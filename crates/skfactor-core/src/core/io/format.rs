//! Number formatting compatible with C's `%.Ne` conversion.
//!
//! Rust's `{:e}` prints `1.0000e0`; downstream tooling reading the spectra expects
//! the printf form `1.0000e+00` with a signed, at least two-digit exponent.

/// Formats `value` like C's `%.{precision}e`.
///
/// Non-finite values are written as `nan`, `inf` and `-inf`.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rust_form = format!("{:.*e}", precision, value);
    let Some((mantissa, exponent)) = rust_form.split_once('e') else {
        return rust_form;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_printf_for_ordinary_values() {
        assert_eq!(format_scientific(1.0, 4), "1.0000e+00");
        assert_eq!(format_scientific(-0.0025, 4), "-2.5000e-03");
        assert_eq!(format_scientific(123456.0, 4), "1.2346e+05");
        assert_eq!(format_scientific(0.0, 4), "0.0000e+00");
    }

    #[test]
    fn keeps_three_digit_exponents() {
        assert_eq!(format_scientific(1.5e-300, 4), "1.5000e-300");
        assert_eq!(format_scientific(2.0e120, 2), "2.00e+120");
    }

    #[test]
    fn writes_non_finite_values_in_c_style() {
        assert_eq!(format_scientific(f64::NAN, 4), "nan");
        assert_eq!(format_scientific(f64::INFINITY, 4), "inf");
        assert_eq!(format_scientific(f64::NEG_INFINITY, 4), "-inf");
    }

    #[test]
    fn supports_full_double_precision() {
        assert_eq!(format_scientific(0.125, 18), "1.250000000000000000e-01");
    }
}
