//! Typed values.
//!
//! A [`Value`] always carries its [`Type`]. Besides a concrete payload a
//! value may be *null* (no payload, any type) or *unknown* (a placeholder for
//! a result that has not been computed yet).

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use bigdecimal::BigDecimal;

use crate::error::ValueError;
use crate::iter::ElementIter;
use crate::number;
use crate::ordering::canonical_cmp;
use crate::ty::{CapsuleType, Type};

/// Payload of a capsule value.
pub type CapsulePayload = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Repr {
    Unknown,
    Null,
    Bool(bool),
    Number(BigDecimal),
    String(String),
    /// Elements of a list, set or tuple. Sets are kept in canonical order.
    Seq(Vec<Value>),
    /// Attributes of an object or elements of a map.
    Attrs(BTreeMap<String, Value>),
    Capsule(CapsulePayload),
}

#[derive(Clone)]
pub struct Value {
    ty: Type,
    pub(crate) repr: Repr,
}

// ── Construction ──────────────────────────────────────────────────────────

impl Value {
    pub fn null(ty: Type) -> Self {
        Value { ty, repr: Repr::Null }
    }

    pub fn unknown(ty: Type) -> Self {
        Value { ty, repr: Repr::Unknown }
    }

    pub fn bool(b: bool) -> Self {
        Value { ty: Type::Bool, repr: Repr::Bool(b) }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value { ty: Type::String, repr: Repr::String(s.into()) }
    }

    pub fn number(n: BigDecimal) -> Self {
        Value { ty: Type::Number, repr: Repr::Number(n) }
    }

    pub fn number_int(n: i64) -> Self {
        Self::number(BigDecimal::from(n))
    }

    pub fn number_float(n: f64) -> Result<Self, ValueError> {
        number::from_f64(n).map(Self::number)
    }

    /// Parses a decimal literal such as `"12.5"` or `"1e400"` without loss.
    pub fn number_parse(text: &str) -> Result<Self, ValueError> {
        number::parse_number(text).map(Self::number)
    }

    /// A list of one or more elements, all of the same type.
    pub fn list(elements: Vec<Value>) -> Result<Self, ValueError> {
        let ety = common_type("list", elements.iter())?;
        Ok(Value { ty: Type::list(ety), repr: Repr::Seq(elements) })
    }

    pub fn list_empty(element_type: Type) -> Self {
        Value { ty: Type::list(element_type), repr: Repr::Seq(Vec::new()) }
    }

    /// A set of one or more elements, all of the same type. Elements are
    /// stored in canonical order and duplicates are dropped, so the result
    /// does not depend on the order of `elements`.
    pub fn set(mut elements: Vec<Value>) -> Result<Self, ValueError> {
        let ety = common_type("set", elements.iter())?;
        elements.sort_by(canonical_cmp);
        elements.dedup_by(|a, b| canonical_cmp(a, b).is_eq());
        Ok(Value { ty: Type::set(ety), repr: Repr::Seq(elements) })
    }

    pub fn set_empty(element_type: Type) -> Self {
        Value { ty: Type::set(element_type), repr: Repr::Seq(Vec::new()) }
    }

    /// A map of one or more string-keyed elements, all of the same type.
    pub fn map<K: Into<String>>(
        elements: impl IntoIterator<Item = (K, Value)>,
    ) -> Result<Self, ValueError> {
        let elements: BTreeMap<String, Value> =
            elements.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let ety = common_type("map", elements.values())?;
        Ok(Value { ty: Type::map(ety), repr: Repr::Attrs(elements) })
    }

    pub fn map_empty(element_type: Type) -> Self {
        Value { ty: Type::map(element_type), repr: Repr::Attrs(BTreeMap::new()) }
    }

    /// An object whose type is derived from its attribute values.
    pub fn object<K: Into<String>>(attrs: impl IntoIterator<Item = (K, Value)>) -> Self {
        let attrs: BTreeMap<String, Value> =
            attrs.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let ty = Type::Object(attrs.iter().map(|(k, v)| (k.clone(), v.ty.clone())).collect());
        Value { ty, repr: Repr::Attrs(attrs) }
    }

    pub fn empty_object() -> Self {
        Value { ty: Type::empty_object(), repr: Repr::Attrs(BTreeMap::new()) }
    }

    pub fn tuple(elements: Vec<Value>) -> Self {
        let ty = Type::Tuple(elements.iter().map(|v| v.ty.clone()).collect());
        Value { ty, repr: Repr::Seq(elements) }
    }

    pub fn empty_tuple() -> Self {
        Value { ty: Type::empty_tuple(), repr: Repr::Seq(Vec::new()) }
    }

    pub fn capsule(ty: CapsuleType, payload: CapsulePayload) -> Self {
        Value { ty: Type::Capsule(ty), repr: Repr::Capsule(payload) }
    }
}

fn common_type<'a>(
    kind: &'static str,
    mut elements: impl Iterator<Item = &'a Value>,
) -> Result<Type, ValueError> {
    let first = elements.next().ok_or(ValueError::EmptyCollection { kind })?;
    for v in elements {
        if v.ty != first.ty {
            return Err(ValueError::InconsistentElementTypes {
                expected: first.ty.clone(),
                found: v.ty.clone(),
            });
        }
    }
    Ok(first.ty.clone())
}

// ── Introspection ─────────────────────────────────────────────────────────

impl Value {
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn is_known(&self) -> bool {
        !matches!(self.repr, Repr::Unknown)
    }

    /// Known all the way down: no unknown value is nested anywhere inside.
    pub fn is_wholly_known(&self) -> bool {
        match &self.repr {
            Repr::Unknown => false,
            Repr::Seq(elems) => elems.iter().all(Value::is_wholly_known),
            Repr::Attrs(attrs) => attrs.values().all(Value::is_wholly_known),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.repr, Repr::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.repr {
            Repr::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            Repr::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&BigDecimal> {
        match &self.repr {
            Repr::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_capsule(&self) -> Option<&CapsulePayload> {
        match &self.repr {
            Repr::Capsule(p) => Some(p),
            _ => None,
        }
    }

    /// Number of elements of a known, non-null collection or structural value.
    pub fn length(&self) -> Option<usize> {
        match &self.repr {
            Repr::Seq(elems) => Some(elems.len()),
            Repr::Attrs(attrs) => Some(attrs.len()),
            _ => None,
        }
    }

    /// Attribute of an object, or element of a map.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        match &self.repr {
            Repr::Attrs(attrs) => attrs.get(name),
            _ => None,
        }
    }

    /// Attributes of an object or elements of a map, by ascending name.
    pub fn attributes(&self) -> Option<impl ExactSizeIterator<Item = (&str, &Value)> + '_> {
        match &self.repr {
            Repr::Attrs(attrs) => Some(attrs.iter().map(|(k, v)| (k.as_str(), v))),
            _ => None,
        }
    }

    /// Element of a list, set or tuple by position in iteration order.
    pub fn index(&self, i: usize) -> Option<&Value> {
        match &self.repr {
            Repr::Seq(elems) => elems.get(i),
            _ => None,
        }
    }

    /// Ordered `(key, element)` pairs: ascending keys for objects and maps,
    /// declared order for lists and tuples, canonical order for sets.
    /// Keys are strings for objects and maps and numbers otherwise.
    /// Null, unknown and primitive values yield nothing.
    pub fn element_iter(&self) -> ElementIter<'_> {
        match &self.repr {
            Repr::Seq(elems) => ElementIter::seq(elems),
            Repr::Attrs(attrs) => ElementIter::attrs(attrs),
            _ => ElementIter::empty(),
        }
    }
}

// ── Equality and formatting ───────────────────────────────────────────────

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if self.ty != other.ty {
            return false;
        }
        match (&self.repr, &other.repr) {
            (Repr::Unknown, Repr::Unknown) | (Repr::Null, Repr::Null) => true,
            (Repr::Bool(a), Repr::Bool(b)) => a == b,
            (Repr::Number(a), Repr::Number(b)) => a == b,
            (Repr::String(a), Repr::String(b)) => a == b,
            (Repr::Seq(a), Repr::Seq(b)) => a == b,
            (Repr::Attrs(a), Repr::Attrs(b)) => a == b,
            (Repr::Capsule(a), Repr::Capsule(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Unknown => write!(f, "unknown({})", self.ty),
            Repr::Null => write!(f, "null({})", self.ty),
            Repr::Bool(b) => write!(f, "{b}"),
            Repr::Number(n) => write!(f, "{}", number::format_decimal(n)),
            Repr::String(s) => write!(f, "{s:?}"),
            Repr::Seq(elems) => {
                let prefix = match self.ty {
                    Type::Set(_) => "set",
                    Type::Tuple(_) => "tuple",
                    _ => "list",
                };
                write!(f, "{prefix}")?;
                f.debug_list().entries(elems).finish()
            }
            Repr::Attrs(attrs) => {
                let prefix = if self.ty.is_map_type() { "map" } else { "object" };
                write!(f, "{prefix}")?;
                f.debug_map().entries(attrs).finish()
            }
            Repr::Capsule(_) => write!(f, "capsule({})", self.ty),
        }
    }
}
