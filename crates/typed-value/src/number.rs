//! Arbitrary-precision number helpers.
//!
//! Decimals are taken apart into sign, significant digits and a power of
//! ten, and every conversion works on that form. Nothing here multiplies
//! out the exponent, so `1e1000000000` costs as much as `1`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::Sign;

use crate::error::ValueError;

/// Padding zeros beyond which [`format_decimal`] switches to exponent
/// notation.
pub const MAX_PLAIN_PADDING: u64 = 64;

/// Parses a decimal literal in JSON number syntax.
pub fn parse_number(text: &str) -> Result<BigDecimal, ValueError> {
    BigDecimal::from_str(text.trim()).map_err(|_| ValueError::InvalidNumber(text.to_owned()))
}

/// Converts a finite float using its shortest round-trip decimal form, so
/// `1.5` becomes exactly `1.5` and `0.1` becomes exactly `0.1`.
pub fn from_f64(n: f64) -> Result<BigDecimal, ValueError> {
    if !n.is_finite() {
        return Err(ValueError::NonFiniteNumber(n));
    }
    parse_number(&n.to_string())
}

/// `sign digits × 10^exponent`, with no trailing zeros in `digits`.
struct Decomposed {
    negative: bool,
    digits: String,
    exponent: i128,
}

impl Decomposed {
    fn of(n: &BigDecimal) -> Self {
        let (int_val, scale) = n.as_bigint_and_exponent();
        let mut digits = int_val.magnitude().to_string();
        if digits == "0" {
            return Decomposed { negative: false, digits, exponent: 0 };
        }
        let significant = digits.trim_end_matches('0').len();
        let stripped = digits.len() - significant;
        digits.truncate(significant);
        Decomposed {
            negative: int_val.sign() == Sign::Minus,
            digits,
            exponent: stripped as i128 - i128::from(scale),
        }
    }

    fn sign(&self) -> &'static str {
        if self.negative {
            "-"
        } else {
            ""
        }
    }
}

/// The exact `i64` value of `n`, if it is an integer in range.
pub fn to_i64_exact(n: &BigDecimal) -> Option<i64> {
    let d = Decomposed::of(n);
    // i64::MAX has 19 digits.
    if d.exponent < 0 || d.digits.len() as i128 + d.exponent > 19 {
        return None;
    }
    let zeros = "0".repeat(d.exponent as usize);
    format!("{}{}{}", d.sign(), d.digits, zeros).parse().ok()
}

/// The nearest `f64` to `n`. Magnitudes beyond the double range become
/// infinite and tiny ones become zero.
pub fn to_f64_approx(n: &BigDecimal) -> f64 {
    let d = Decomposed::of(n);
    let text = format!("{}{}e{}", d.sign(), d.digits, d.exponent);
    match text.parse::<f64>() {
        Ok(f) => f,
        Err(_) if d.exponent > 0 => {
            if d.negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }
        }
        Err(_) => 0.0,
    }
}

/// Renders a number as JSON number text with no trailing fractional zeros:
/// `1`, `-5`, `1.5`, `1000000000000000000000`.
///
/// Plain decimal notation is used unless it would take more than
/// [`MAX_PLAIN_PADDING`] padding zeros, in which case the significant
/// digits are followed by an exponent: `1e100`, `25e-80`.
pub fn format_decimal(n: &BigDecimal) -> String {
    let d = Decomposed::of(n);
    let len = d.digits.len() as i128;
    let padding = if d.exponent >= 0 {
        d.exponent
    } else {
        (-d.exponent - len).max(0)
    };
    if padding > i128::from(MAX_PLAIN_PADDING) {
        return format!("{}{}e{}", d.sign(), d.digits, d.exponent);
    }

    let mut out = String::with_capacity(d.digits.len() + padding as usize + 3);
    out.push_str(d.sign());
    if d.exponent >= 0 {
        out.push_str(&d.digits);
        out.push_str(&"0".repeat(padding as usize));
    } else if len > -d.exponent {
        let (int_part, frac_part) = d.digits.split_at((len + d.exponent) as usize);
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    } else {
        out.push_str("0.");
        out.push_str(&"0".repeat(padding as usize));
        out.push_str(&d.digits);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> String {
        format_decimal(&parse_number(text).unwrap())
    }

    fn num(text: &str) -> BigDecimal {
        parse_number(text).unwrap()
    }

    #[test]
    fn plain_integers() {
        assert_eq!(plain("0"), "0");
        assert_eq!(plain("-0"), "0");
        assert_eq!(plain("0.000"), "0");
        assert_eq!(plain("12"), "12");
        assert_eq!(plain("-5"), "-5");
        assert_eq!(plain("1e3"), "1000");
        assert_eq!(plain("1.000"), "1");
    }

    #[test]
    fn plain_fractions() {
        assert_eq!(plain("1.5"), "1.5");
        assert_eq!(plain("12.50"), "12.5");
        assert_eq!(plain("0.001"), "0.001");
        assert_eq!(plain("-0.25"), "-0.25");
        assert_eq!(plain("1e-3"), "0.001");
        assert_eq!(plain("1200.50"), "1200.5");
    }

    #[test]
    fn huge_exponents_stay_compact() {
        assert_eq!(plain("1e1000000000"), "1e1000000000");
        assert_eq!(plain("-2.5e-1000000000"), "-25e-1000000001");
        assert_eq!(plain("1e64"), format!("1{}", "0".repeat(64)));
        assert_eq!(plain("1e65"), "1e65");
    }

    #[test]
    fn floats_use_shortest_form() {
        assert_eq!(format_decimal(&from_f64(1.5).unwrap()), "1.5");
        assert_eq!(format_decimal(&from_f64(0.1).unwrap()), "0.1");
        assert_eq!(format_decimal(&from_f64(1e21).unwrap()), "1000000000000000000000");
    }

    #[test]
    fn exact_integers() {
        assert_eq!(to_i64_exact(&num("12")), Some(12));
        assert_eq!(to_i64_exact(&num("12.000")), Some(12));
        assert_eq!(to_i64_exact(&num("-1200")), Some(-1200));
        assert_eq!(to_i64_exact(&num("9223372036854775807")), Some(i64::MAX));
        assert_eq!(to_i64_exact(&num("-9223372036854775808")), Some(i64::MIN));
        assert_eq!(to_i64_exact(&num("9223372036854775808")), None);
        assert_eq!(to_i64_exact(&num("1.5")), None);
        assert_eq!(to_i64_exact(&num("1e19")), None);
        assert_eq!(to_i64_exact(&num("1e1000000000")), None);
    }

    #[test]
    fn float_approximations() {
        assert_eq!(to_f64_approx(&num("1.5")), 1.5);
        assert_eq!(to_f64_approx(&num("-0.25")), -0.25);
        assert_eq!(to_f64_approx(&num("0")), 0.0);
        assert_eq!(to_f64_approx(&num("1e1000000000")), f64::INFINITY);
        assert_eq!(to_f64_approx(&num("-1e1000000000")), f64::NEG_INFINITY);
        assert_eq!(to_f64_approx(&num("1e-1000000000")), 0.0);
    }

    #[test]
    fn non_finite_floats_rejected() {
        assert!(from_f64(f64::NAN).is_err());
        assert!(from_f64(f64::INFINITY).is_err());
    }

    #[test]
    fn invalid_literals_rejected() {
        assert!(parse_number("abc").is_err());
        assert!(parse_number("").is_err());
    }
}
