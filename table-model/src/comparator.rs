//! FILENAME: table-model/src/comparator.rs
//! PURPOSE: Comparator combinators for column sorting.
//! CONTEXT: Columns opt into sorting by supplying a `Comparator`. The
//! combinators here cover the common cases; hosts can also pass any closure
//! with the right signature. Comparators must be pure — they may be invoked
//! from several table instances over the same spec.

use std::cmp::Ordering;

use crate::value::CellValue;

/// A column-level ordering function. Boxed so specs can mix built-in and
/// host-supplied comparators freely.
pub type Comparator = Box<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// Rank used when comparing values of different variants, so the ordering
/// stays total: Empty < Bool < Number < Text.
fn variant_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Empty => 0,
        CellValue::Bool(_) => 1,
        CellValue::Number(_) => 2,
        CellValue::Text(_) => 3,
    }
}

/// Natural ordering over cell values. Numbers compare numerically with NaN
/// sorting last among numbers; text compares lexicographically; mixed
/// variants compare by a fixed rank.
pub fn natural_order(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => {
            x.partial_cmp(y).unwrap_or_else(|| match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                _ => Ordering::Less,
            })
        }
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Empty, CellValue::Empty) => Ordering::Equal,
        _ => variant_rank(a).cmp(&variant_rank(b)),
    }
}

/// The natural ordering as a boxed comparator.
pub fn natural() -> Comparator {
    Box::new(natural_order)
}

/// Wraps a comparator so its ordering is reversed.
pub fn reversed(inner: Comparator) -> Comparator {
    Box::new(move |a, b| inner(a, b).reverse())
}

/// Compares on a derived key.
pub fn comparing_on<F>(key: F, inner: Comparator) -> Comparator
where
    F: Fn(&CellValue) -> CellValue + Send + Sync + 'static,
{
    Box::new(move |a, b| inner(&key(a), &key(b)))
}

/// Tries each comparator in turn; the first non-equal outcome wins.
pub fn chained(comparators: Vec<Comparator>) -> Comparator {
    Box::new(move |a, b| {
        for cmp in &comparators {
            let ord = cmp(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    })
}
