//! Canonical ordering of values, used to lay out set elements.
//!
//! Within one element type the order is: null first, then known values,
//! then unknown values. Known values order as `false < true`, numbers
//! numerically, strings by their UTF-8 bytes, sequences element-wise and
//! attribute maps pair-wise over their sorted keys.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::value::Repr;
use crate::Value;

fn rank(repr: &Repr) -> u8 {
    match repr {
        Repr::Null => 0,
        Repr::Bool(_) => 1,
        Repr::Number(_) => 2,
        Repr::String(_) => 3,
        Repr::Seq(_) => 4,
        Repr::Attrs(_) => 5,
        Repr::Capsule(_) => 6,
        Repr::Unknown => 7,
    }
}

/// Total order over values. Two values compare equal exactly when they
/// would collapse into one set element.
pub fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    match (&a.repr, &b.repr) {
        (Repr::Bool(x), Repr::Bool(y)) => x.cmp(y),
        (Repr::Number(x), Repr::Number(y)) => x.cmp(y),
        (Repr::String(x), Repr::String(y)) => x.cmp(y),
        (Repr::Seq(x), Repr::Seq(y)) => {
            for (l, r) in x.iter().zip(y) {
                let ord = canonical_cmp(l, r);
                if ord.is_ne() {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Repr::Attrs(x), Repr::Attrs(y)) => {
            for ((lk, lv), (rk, rv)) in x.iter().zip(y) {
                let ord = lk.cmp(rk).then_with(|| canonical_cmp(lv, rv));
                if ord.is_ne() {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        (Repr::Capsule(x), Repr::Capsule(y)) => {
            let x = Arc::as_ptr(x) as *const () as usize;
            let y = Arc::as_ptr(y) as *const () as usize;
            x.cmp(&y)
        }
        (x, y) => rank(x).cmp(&rank(y)),
    }
}
