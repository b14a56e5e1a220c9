//! The numeric boundary between arbitrary-precision decimals and JavaScript
//! numbers.
//!
//! JavaScript only has IEEE-754 doubles (QuickJS additionally stores small
//! integers untagged). A decimal that is an integer within `i64` range takes
//! the integer branch; every other decimal is approximated as the nearest
//! `f64`. The float branch does not round-trip: excess digits and integers
//! beyond 2^53 are lost.

use rquickjs::{Ctx, IntoJs, Value as JsValue};
use typed_value::number::{to_f64_approx, to_i64_exact};
use typed_value::BigDecimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberRepr {
    Int(i64),
    Float(f64),
}

impl NumberRepr {
    pub fn of(n: &BigDecimal) -> Self {
        match to_i64_exact(n) {
            Some(i) => NumberRepr::Int(i),
            None => NumberRepr::Float(to_f64_approx(n)),
        }
    }

    /// Whether the JavaScript number is guaranteed to hold the decimal exactly.
    pub fn is_exact(&self) -> bool {
        match *self {
            NumberRepr::Int(i) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
            NumberRepr::Float(_) => false,
        }
    }
}

/// Largest integer a double represents exactly along with all its
/// predecessors (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

impl<'js> IntoJs<'js> for NumberRepr {
    fn into_js(self, ctx: &Ctx<'js>) -> rquickjs::Result<JsValue<'js>> {
        Ok(match self {
            NumberRepr::Int(i) => match i32::try_from(i) {
                Ok(small) => JsValue::new_int(ctx.clone(), small),
                Err(_) => JsValue::new_float(ctx.clone(), i as f64),
            },
            NumberRepr::Float(f) => JsValue::new_float(ctx.clone(), f),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn repr(text: &str) -> NumberRepr {
        NumberRepr::of(&BigDecimal::from_str(text).unwrap())
    }

    #[test]
    fn integers_take_the_integer_branch() {
        assert_eq!(repr("0"), NumberRepr::Int(0));
        assert_eq!(repr("-5"), NumberRepr::Int(-5));
        assert_eq!(repr("12.000"), NumberRepr::Int(12));
        assert_eq!(repr("9007199254740991"), NumberRepr::Int(9_007_199_254_740_991));
        assert_eq!(repr("-9223372036854775808"), NumberRepr::Int(i64::MIN));
    }

    #[test]
    fn everything_else_is_a_float() {
        assert_eq!(repr("1.5"), NumberRepr::Float(1.5));
        assert_eq!(repr("9223372036854775808"), NumberRepr::Float(9_223_372_036_854_775_808.0));
    }

    #[test]
    fn exactness() {
        assert!(repr("9007199254740991").is_exact());
        assert!(!repr("9007199254740993").is_exact());
        assert!(!repr("1.5").is_exact());
    }

    #[test]
    fn huge_exponents_classify_without_expanding() {
        assert_eq!(repr("1e1000000000"), NumberRepr::Float(f64::INFINITY));
        assert_eq!(repr("-1e1000000000"), NumberRepr::Float(f64::NEG_INFINITY));
        assert_eq!(repr("1e-1000000000"), NumberRepr::Float(0.0));
    }
}
