//! Ordered element iteration over collection and structural values.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Enumerate;
use std::slice;

use crate::Value;

/// Iterator returned by [`Value::element_iter`].
///
/// Yields `(key, element)` pairs. Sequence keys are number values holding
/// the element's position; attribute keys are string values.
pub struct ElementIter<'a> {
    inner: Inner<'a>,
}

enum Inner<'a> {
    Seq(Enumerate<slice::Iter<'a, Value>>),
    Attrs(btree_map::Iter<'a, String, Value>),
    Empty,
}

impl<'a> ElementIter<'a> {
    pub(crate) fn seq(elems: &'a [Value]) -> Self {
        ElementIter { inner: Inner::Seq(elems.iter().enumerate()) }
    }

    pub(crate) fn attrs(attrs: &'a BTreeMap<String, Value>) -> Self {
        ElementIter { inner: Inner::Attrs(attrs.iter()) }
    }

    pub(crate) fn empty() -> Self {
        ElementIter { inner: Inner::Empty }
    }
}

impl<'a> Iterator for ElementIter<'a> {
    type Item = (Value, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Seq(it) => it.next().map(|(i, v)| (Value::number_int(i as i64), v)),
            Inner::Attrs(it) => it.next().map(|(k, v)| (Value::string(k.as_str()), v)),
            Inner::Empty => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Seq(it) => it.size_hint(),
            Inner::Attrs(it) => it.size_hint(),
            Inner::Empty => (0, Some(0)),
        }
    }
}

impl ExactSizeIterator for ElementIter<'_> {}
