//! Similarity module - Structural closeness of two values.
//!
//! Two values are similar when the structural weight of their diff is a
//! small enough fraction of their combined weight. The list aligner uses this
//! to decide whether two elements correspond.

use crate::compare::values_equal;
use crate::diff::{Change, Differ};
use crate::options::Options;
use crate::path::Path;
use crate::value::Value;

/// Returns the structural size of a value.
///
/// Scalars, null included, weigh 1. Containers weigh the sum of their
/// children, so an empty container weighs 0 and nested structure counts more
/// than a flat container of the same length.
pub fn node_count(value: &Value) -> usize {
    match value {
        Value::List(items) => items.iter().map(node_count).sum(),
        Value::Map(map) => map.node_count_with(|m| m.iter().map(|(_, v)| node_count(v)).sum()),
        _ => 1,
    }
}

/// Sums the structural size of everything a changeset removes and adds.
pub fn diff_weight<'a>(changes: impl IntoIterator<Item = &'a Change>) -> usize {
    changes
        .into_iter()
        .map(|change| match change {
            Change::Added { value, .. } | Change::Removed { value, .. } => node_count(value),
            Change::Replaced { old, new, .. } => node_count(old) + node_count(new),
        })
        .sum()
}

/// Judges whether two values are similar at `options.similarity`.
pub fn similar(a: &Value, b: &Value, options: &Options) -> bool {
    similar_at(&Path::new(), a, b, options)
}

/// Like [`similar`], reporting `path` to the custom comparator.
pub(crate) fn similar_at(path: &Path, a: &Value, b: &Value, options: &Options) -> bool {
    if !a.is_container() && !b.is_container() {
        return values_equal(a, b, options);
    }

    let total = node_count(a) + node_count(b);
    if total == 0 {
        return true;
    }

    let changes = Differ::new(options).diff_at(path, a, b);
    let weight = diff_weight(&changes);
    1.0 - weight as f64 / total as f64 >= options.similarity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::from_json;

    fn v(json: &str) -> Value {
        from_json(json).unwrap()
    }

    #[test]
    fn test_node_count() {
        assert_eq!(node_count(&Value::Null), 1);
        assert_eq!(node_count(&Value::Int(3)), 1);
        assert_eq!(node_count(&v("[]")), 0);
        assert_eq!(node_count(&v("{}")), 0);
        assert_eq!(node_count(&v(r#"[1, null, "x"]"#)), 3);
        assert_eq!(node_count(&v(r#"{"a":1,"b":{"c":[1,2,3]},"d":[]}"#)), 4);
    }

    #[test]
    fn test_similar_hash() {
        let a = v(r#"{"a":1,"b":2,"c":3,"d":4,"e":5}"#);
        let b = v(r#"{"a":1,"b":2,"c":3,"e":5}"#);
        assert!(similar(&a, &b, &Options::default()));
        assert!(!similar(&a, &b, &Options::new().similarity(1.0)));
    }

    #[test]
    fn test_similar_hash_within_tolerance() {
        let a = v(r#"{"a":1.5,"b":2.25,"c":3,"d":4,"e":5}"#);
        let b = v(r#"{"a":1.503,"b":2.22,"c":3,"e":5}"#);
        assert!(similar(&a, &b, &Options::new().numeric_tolerance(0.05)));
        assert!(!similar(&a, &b, &Options::default()));
    }

    #[test]
    fn test_numbers_and_strings() {
        let opts = Options::default();
        assert!(!similar(&Value::Int(1), &Value::Int(2), &opts));
        assert!(!similar(&"a".into(), &"b".into(), &opts));
        assert!(!similar(&"a".into(), &v("[1,2,3]"), &opts));
        assert!(!similar(&Value::Int(1), &v(r#"{"a":1,"b":2,"c":3,"e":5}"#), &opts));
    }

    #[test]
    fn test_half_similarity() {
        let a = v(r#"{"value":"New1","onclick":"CreateNewDoc()"}"#);
        let b = v(r#"{"value":"New","onclick":"CreateNewDoc()"}"#);
        assert!(similar(&a, &b, &Options::new().similarity(0.5)));

        let c = v(r#"{"value":"New1","onclick":"open()"}"#);
        assert!(!similar(&c, &b, &Options::new().similarity(0.5)));
    }

    #[test]
    fn test_empty_containers_are_similar() {
        assert!(similar(&v("{}"), &v("[]"), &Options::new().similarity(1.0)));
    }

    #[test]
    fn test_diff_weight() {
        let changes = vec![
            Change::removed(crate::path!["a"], v(r#"{"x":1,"y":[1,2]}"#)),
            Change::replaced(crate::path!["b"], Value::Int(1), Value::Null),
        ];
        assert_eq!(diff_weight(&changes), 5);
    }
}
