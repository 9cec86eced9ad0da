use std::cmp::Ordering;

use formfilter::coerce::to_number;
use formfilter::filter::compare::{order, strict_eq, strict_ne};
use formfilter::models::{FieldKind, Value};

#[test]
fn to_number_follows_loose_coercion() {
    assert_eq!(to_number(""), 0.0);
    assert_eq!(to_number("  42 "), 42.0);
    assert_eq!(to_number("1e3"), 1000.0);
    assert_eq!(to_number("-.5"), -0.5);
    assert_eq!(to_number("0x1F"), 31.0);
    assert_eq!(to_number("0b101"), 5.0);
    assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
    assert!(to_number("inf").is_nan());
    assert!(to_number("NaN").is_nan());
    assert!(to_number("12px").is_nan());
}

#[test]
fn radix_prefixes_need_matching_digits() {
    assert!(to_number("0x+1").is_nan());
    assert!(to_number("0x").is_nan());
    assert!(to_number("0b102").is_nan());
    assert!(to_number("0o-7").is_nan());
    assert_eq!(to_number("0o17"), 15.0);
}

#[test]
fn strings_order_by_code_unit() {
    let a = Value::from("Zebra");
    let b = Value::from("apple");
    assert_eq!(order(FieldKind::Plain, &a, &b), Some(Ordering::Less));
}

#[test]
fn epoch_millis_work_as_dates() {
    // 2023-01-01T00:00:00Z
    let millis = Value::from(1_672_531_200_000.0);
    let later = Value::from("2023-01-02");
    assert_eq!(order(FieldKind::Date, &millis, &later), Some(Ordering::Less));
}

#[test]
fn strict_ne_is_computed_independently() {
    let pairs = [
        (Value::from("a"), Value::from("a")),
        (Value::from("a"), Value::from("b")),
        (Value::from(1.0), Value::from(1.0)),
        (Value::from(1.0), Value::from("1")),
        (Value::Null, Value::from("")),
    ];
    for (l, r) in &pairs {
        assert_ne!(strict_eq(l, r), strict_ne(l, r), "{l} vs {r}");
    }
}
