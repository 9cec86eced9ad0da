use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::coerce::to_number;
use crate::dates;
use crate::models::{FieldKind, Value};

/// Only values of the same variant can be equal.
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

pub fn strict_ne(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => a != b,
        (Value::Number(a), Value::Number(b)) => a != b,
        (Value::Null, Value::Null) => false,
        _ => true,
    }
}

/// Order `left` against `right` for a field of the given kind.
///
/// Date fields compare chronologically. Otherwise two strings compare by
/// UTF-16 code units, any other pairing is compared numerically after
/// coercing strings, and a NaN on either side leaves the pair unordered.
/// `None` means the operands are unordered and every ordering operator must
/// report false.
pub fn order(kind: FieldKind, left: &Value, right: &Value) -> Option<Ordering> {
    if left.is_null() {
        return None;
    }

    match kind {
        FieldKind::Date => {
            let l = as_instant(left)?;
            let r = as_instant(right)?;
            Some(l.cmp(&r))
        }
        FieldKind::Plain => loose_order(left, right),
    }
}

pub fn greater_than(kind: FieldKind, left: &Value, right: &Value) -> bool {
    order(kind, left, right) == Some(Ordering::Greater)
}

pub fn less_than(kind: FieldKind, left: &Value, right: &Value) -> bool {
    order(kind, left, right) == Some(Ordering::Less)
}

fn loose_order(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Value::Text(a), Value::Text(b)) = (left, right) {
        return Some(a.encode_utf16().cmp(b.encode_utf16()));
    }

    let l = as_number(left);
    let r = as_number(right);
    l.partial_cmp(&r)
}

fn as_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        Value::Text(s) => to_number(s),
        Value::Null => 0.0,
    }
}

fn as_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Text(s) => dates::parse(s),
        Value::Number(ms) => dates::from_epoch_millis(*ms),
        Value::Null => None,
    }
}
