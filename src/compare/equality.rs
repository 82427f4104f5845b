//! Scalar equivalence and type comparability.

use crate::options::Options;
use crate::value::Value;
use std::borrow::Cow;

/// Returns true when `a` and `b` can be compared structurally.
///
/// Two maps or two lists are always comparable, as are two numbers when
/// `strict` is off. Otherwise both must share a runtime type. Pairs that are
/// not comparable are reported as a single replacement.
pub fn comparable(a: &Value, b: &Value, strict: bool) -> bool {
    match (a, b) {
        (Value::Map(_), Value::Map(_)) | (Value::List(_), Value::List(_)) => true,
        _ if !strict && a.is_number() && b.is_number() => true,
        _ => std::mem::discriminant(a) == std::mem::discriminant(b),
    }
}

/// Checks two values for equality, or closeness within the configured
/// tolerance.
///
/// A numeric pair with a tolerance is compared by distance only. Otherwise
/// strings are normalized per `strip` and `case_insensitive` before an exact
/// comparison. Integers and floats of equal magnitude are equal.
pub fn values_equal(a: &Value, b: &Value, options: &Options) -> bool {
    if let Some(tolerance) = options.numeric_tolerance {
        if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
            return (x - y).abs() <= tolerance || x.total_cmp(&y).is_eq();
        }
    }

    match (a, b) {
        (Value::String(x), Value::String(y)) => normalize(x, options) == normalize(y, options),
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        (Value::Float(x), Value::Float(y)) => x == y || x.total_cmp(y).is_eq(),
        _ => a == b,
    }
}

fn normalize<'a>(s: &'a str, options: &Options) -> Cow<'a, str> {
    let s = if options.strip { s.trim() } else { s };
    if options.case_insensitive {
        Cow::Owned(s.to_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{from_json, Map};

    #[test]
    fn test_comparable() {
        assert!(comparable(&Value::Map(Map::new()), &from_json(r#"{"a":1}"#).unwrap(), true));
        assert!(comparable(&Value::List(vec![]), &Value::List(vec![Value::Int(1)]), true));
        assert!(!comparable(&Value::List(vec![]), &Value::Map(Map::new()), true));
        assert!(!comparable(&Value::Int(1), &Value::Float(1.0), true));
        assert!(comparable(&Value::Int(1), &Value::Float(1.0), false));
        assert!(comparable(&Value::Bool(true), &Value::Bool(false), true));
        assert!(!comparable(&Value::String("1".into()), &Value::Int(1), false));
    }

    #[test]
    fn test_numeric_values_exactly_without_tolerance() {
        let opts = Options::default();
        assert!(!values_equal(&Value::Float(10.004), &Value::Float(10.003), &opts));
        assert!(values_equal(&Value::Int(2), &Value::Float(2.0), &opts));
    }

    #[test]
    fn test_numeric_tolerance() {
        let opts = Options::new().numeric_tolerance(0.01);
        assert!(values_equal(&Value::Float(10.004), &Value::Float(10.003), &opts));
        assert!(!values_equal(&Value::Float(0.65), &Value::Float(0.67), &opts));
        assert!(values_equal(&Value::Int(35), &Value::Float(35.005), &opts));
    }

    #[test]
    fn test_nan_equals_itself() {
        let nan = Value::Float(f64::NAN);
        assert!(values_equal(&nan, &nan, &Options::default()));
        assert!(values_equal(&nan, &nan, &Options::new().numeric_tolerance(0.1)));
        assert!(!values_equal(&nan, &Value::Float(0.0), &Options::default()));
        assert!(values_equal(&Value::Float(0.0), &Value::Float(-0.0), &Options::default()));
    }

    #[test]
    fn test_other_values_ignore_tolerance() {
        let opts = Options::new().numeric_tolerance(0.01);
        assert!(!values_equal(&"hats".into(), &"ninjas".into(), &opts));
        assert!(values_equal(&"horse".into(), &"horse".into(), &opts));
    }

    #[test]
    fn test_strings_exact_by_default() {
        let opts = Options::default();
        assert!(!values_equal(&" horse".into(), &"horse".into(), &opts));
        assert!(!values_equal(&"horse".into(), &"Horse".into(), &opts));
    }

    #[test]
    fn test_strip_and_case() {
        assert!(values_equal(&" horse".into(), &"horse".into(), &Options::new().strip(true)));
        assert!(values_equal(
            &"horse".into(),
            &"Horse".into(),
            &Options::new().case_insensitive(true)
        ));
        let both = Options::new().strip(true).case_insensitive(true);
        assert!(values_equal(&" Foo".into(), &"foo".into(), &both));
        assert!(!values_equal(&"fizz buzz".into(), &"fizzBuzz".into(), &both));
    }
}
