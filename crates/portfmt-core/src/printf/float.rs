//! Digit generation for `%f` and `%g`.
//!
//! Both conversions take their digits from Rust's float formatting, which
//! rounds the exact binary value half-to-even and does not depend on the
//! host libc. Callers pass the magnitude; sign and special values are
//! handled by the renderer.

/// Default precision for `%f` and `%g`.
pub const DEFAULT_PRECISION: usize = 6;

/// Most digits generated for one value. Every finite `f64` has an exact
/// decimal expansion shorter than this, so further digits are all zero.
pub const MAX_EXACT_DIGITS: usize = 1100;

/// `%f`: fixed-point with `precision` fractional digits.
///
/// At most [`MAX_EXACT_DIGITS`] fractional digits are produced; the caller
/// appends any remaining zeros.
#[must_use]
pub fn format_f(value: f64, precision: usize) -> String {
    let precision = precision.min(MAX_EXACT_DIGITS);
    format!("{value:.precision$}")
}

/// `%g`: `precision` significant digits (0 counts as 1).
///
/// With `X` the decimal exponent after rounding to `P` significant digits,
/// fixed notation is used when `-4 <= X < P` and `d.ddde±XX` otherwise.
/// Trailing fractional zeros and a dangling decimal point are removed.
#[must_use]
pub fn format_g(value: f64, precision: usize) -> String {
    let p = precision.clamp(1, MAX_EXACT_DIGITS);
    if value == 0.0 {
        return String::from("0");
    }

    let sci = format!("{value:.prec$e}", prec = p - 1);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i64>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let p_exp = i64::try_from(p).unwrap_or(i64::MAX);
    if exp < -4 || exp >= p_exp {
        let mut mantissa = mantissa.to_string();
        strip_trailing_zeros(&mut mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    } else {
        // -4 <= exp < p, so this is in 0..=p+3.
        let frac_digits = usize::try_from(p_exp - 1 - exp).unwrap_or(0);
        let mut fixed = format_f(value, frac_digits);
        strip_trailing_zeros(&mut fixed);
        fixed
    }
}

/// Remove trailing zeros after the decimal point.
fn strip_trailing_zeros(s: &mut String) {
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_default_precision() {
        assert_eq!(format_f(core::f64::consts::PI, DEFAULT_PRECISION), "3.141593");
        assert_eq!(format_f(0.0, DEFAULT_PRECISION), "0.000000");
        assert_eq!(format_f(1e21, 0), "1000000000000000000000");
    }

    #[test]
    fn fixed_rounds_exact_binary_value() {
        // 0.125 is exact; ties go to even.
        assert_eq!(format_f(0.125, 2), "0.12");
        assert_eq!(format_f(0.375, 2), "0.38");
        // 2.675 is slightly below the tie in binary.
        assert_eq!(format_f(2.675, 2), "2.67");
        assert_eq!(format_f(2.5, 0), "2");
        assert_eq!(format_f(3.5, 0), "4");
    }

    #[test]
    fn general_uses_fixed_for_moderate_exponents() {
        assert_eq!(format_g(100000.0, 6), "100000");
        assert_eq!(format_g(0.0001, 6), "0.0001");
        assert_eq!(format_g(3.14159265, 6), "3.14159");
        assert_eq!(format_g(1.5, 6), "1.5");
        assert_eq!(format_g(0.0, 6), "0");
    }

    #[test]
    fn general_switches_to_exponent() {
        assert_eq!(format_g(1000000.0, 6), "1e+06");
        assert_eq!(format_g(123456789.0, 6), "1.23457e+08");
        assert_eq!(format_g(0.00001234, 6), "1.234e-05");
        assert_eq!(format_g(1e100, 6), "1e+100");
    }

    #[test]
    fn general_rounding_can_bump_the_exponent() {
        assert_eq!(format_g(999999.5, 6), "1e+06");
        assert_eq!(format_g(9.9999996, 6), "10");
    }

    #[test]
    fn huge_precision_is_capped() {
        let fixed = format_f(1.5, 70_000);
        assert_eq!(fixed.len(), 2 + MAX_EXACT_DIGITS);
        assert!(fixed.starts_with("1.5000"));
        assert_eq!(format_f(0.1, usize::MAX).len(), 2 + MAX_EXACT_DIGITS);
        // The exact expansion of 2^-1074 fits.
        assert!(!format_f(f64::from_bits(1), MAX_EXACT_DIGITS).ends_with("0000000000"));
        assert_eq!(format_g(1.5, 70_000), "1.5");
        assert_eq!(format_g(1e300, usize::MAX).len(), 301);
        assert!(format_g(0.1, usize::MAX).starts_with("0.1000000000000000055511151231257827"));
    }

    #[test]
    fn general_precision_zero_means_one() {
        assert_eq!(format_g(123.0, 0), "1e+02");
        assert_eq!(format_g(7.0, 0), "7");
        assert_eq!(format_g(123.456, 2), "1.2e+02");
        assert_eq!(format_g(123.456, 3), "123");
    }
}
