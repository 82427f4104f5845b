//! Sort module - Canonical ordering of values.
//!
//! Map keys are ordered lexically. Lists whose elements all share one scalar
//! type are sorted; lists of maps are ordered by each map's first key (then
//! by content). Lists of lists keep their order but their elements are still
//! canonicalized. Diffing two canonical values ignores ordering differences.

use crate::error::{Error, Result};
use crate::path::Path;
use crate::value::{Map, Value};

/// Returns a canonically ordered copy of `value`.
///
/// Fails when a list mixes element types, since there is no canonical order
/// between them.
pub fn sort(value: &Value) -> Result<Value> {
    sort_at(&Path::new(), value)
}

fn sort_at(path: &Path, value: &Value) -> Result<Value> {
    match value {
        Value::Map(map) => {
            let mut sorted = map
                .iter()
                .map(|(k, v)| Ok((k.clone(), sort_at(&path.with_key(k), v)?)))
                .collect::<Result<Map>>()?;
            sorted.sort_keys();
            Ok(Value::Map(sorted))
        }
        Value::List(items) if !items.is_empty() => sort_list(path, items),
        other => Ok(other.clone()),
    }
}

fn sort_list(path: &Path, items: &[Value]) -> Result<Value> {
    let mut types: Vec<&'static str> = Vec::new();
    for item in items {
        let name = item.type_name();
        if !types.contains(&name) {
            types.push(name);
        }
    }
    if types.len() > 1 {
        return Err(Error::mixed_array_types(
            path.to_string(),
            types.into_iter().map(String::from).collect(),
        ));
    }

    let mut sorted = items
        .iter()
        .enumerate()
        .map(|(i, item)| sort_at(&path.with_index(i), item))
        .collect::<Result<Vec<_>>>()?;

    match types[0] {
        "list" => {}
        "map" => sorted.sort_by(|a, b| first_key(a).cmp(&first_key(b)).then_with(|| a.cmp(b))),
        _ => sorted.sort(),
    }
    Ok(Value::List(sorted))
}

fn first_key(value: &Value) -> Option<&str> {
    value.as_map().and_then(Map::first_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff;
    use crate::options::Options;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    fn v(json: &str) -> Value {
        from_json(json).unwrap()
    }

    #[test]
    fn test_sort_keys_and_strings() {
        let sorted = sort(&v(r#"{"c":["b","a"],"a":"b"}"#)).unwrap();
        assert_eq!(crate::value::to_json(&sorted).unwrap(), r#"{"a":"b","c":["a","b"]}"#);
    }

    #[test]
    fn test_sort_numbers_and_nested_lists() {
        let sorted = sort(&v(r#"[[3,1],[2,0]]"#)).unwrap();
        assert_eq!(sorted, v(r#"[[1,3],[0,2]]"#));
        assert_eq!(sort(&v("[2.5, 1.5]")).unwrap(), v("[1.5, 2.5]"));
    }

    #[test]
    fn test_sort_maps_by_first_key() {
        let sorted = sort(&v(r#"[{"b":1},{"a":2},{"a":1}]"#)).unwrap();
        assert_eq!(sorted, v(r#"[{"a":1},{"a":2},{"b":1}]"#));
    }

    #[test]
    fn test_sort_leaves_scalars_and_empty_lists() {
        assert_eq!(sort(&Value::Null).unwrap(), Value::Null);
        assert_eq!(sort(&"x".into()).unwrap(), Value::from("x"));
        assert_eq!(sort(&v("[]")).unwrap(), v("[]"));
    }

    #[test]
    fn test_sort_mixed_types_fails() {
        let err = sort(&v(r#"{"a":{"b":[1,"x"]}}"#)).unwrap_err();
        match err {
            Error::MixedArrayTypes { path, types } => {
                assert_eq!(path, "a.b");
                assert_eq!(types, vec!["int".to_string(), "string".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(sort(&v("[1, 2.5]")).is_err());
    }

    #[test]
    fn test_sort_is_idempotent() {
        let value = v(r#"{"z":[{"y":[3,1]},{"c":2,"a":1}],"b":["q","p"]}"#);
        let once = sort(&value).unwrap();
        assert_eq!(sort(&once).unwrap(), once);
    }

    #[test]
    fn test_unsorted_diff() {
        let a = v(r#"{"a":"b","c":["a","b"]}"#);
        let b = v(r#"{"a":"b","c":["b","a"]}"#);
        let changes = diff(&a, &b, &Options::default()).unwrap();
        assert_eq!(
            changes.to_json(&Default::default()).unwrap(),
            r#"[["+","c[0]","b"],["-","c[2]","b"]]"#
        );
    }

    #[test]
    fn test_sorted_diff() {
        let a = v(r#"{"a":"b","c":["a","b"]}"#);
        let b = v(r#"{"a":"b","c":["b","a"]}"#);
        assert!(diff(&a, &b, &Options::new().sort(true)).unwrap().is_empty());
    }

    #[test]
    fn test_sorted_diff_for_complex_nested_structure() {
        let a = v(r#"{"a":"b","c":["a","b"],"d":{"a":"b","c":["b","a"]}}"#);
        let b = v(r#"{"c":["b","a"],"a":"b","d":{"a":"b","c":["a","b"]}}"#);
        assert!(diff(&a, &b, &Options::new().sort(true)).unwrap().is_empty());
    }

    #[test]
    fn test_sort_on_array_of_hashes() {
        let a = v(r#"{"a":"b","c":[{"a":"b","c":["a","b"],"d":{"a":"b","c":["b","a"]}},{"a":"b","c":["b","a"],"d":{"a":"b","c":["a","b"]}}],"d":{"a":"b","c":["b","a"]}}"#);
        let b = v(r#"{"a":"b","c":[{"c":["b","a"],"a":"b","d":{"a":"b","c":["a","b"]}},{"a":"b","c":["a","b"],"d":{"a":"b","c":["b","a"]}}],"d":{"a":"b","c":["a","b"]}}"#);
        assert!(diff(&a, &b, &Options::new().sort(true)).unwrap().is_empty());
    }

    #[test]
    fn test_difference_survives_sorting() {
        let a = v(r#"{"a":"b","c":[{"a":"b","c":["a","b"],"d":{"a":"X","c":["b","a"]}},{"a":"b","c":["b","a"],"d":{"a":"b","c":["a","b"]}}],"d":{"a":"b","c":["b","a"]}}"#);
        let b = v(r#"{"a":"b","c":[{"c":["b","a"],"a":"b","d":{"a":"b","c":["a","b"]}},{"a":"b","c":["a","b"],"d":{"a":"b","c":["b","a"]}}],"d":{"a":"b","c":["a","b"]}}"#);
        let changes = diff(&a, &b, &Options::new().sort(true)).unwrap();
        assert_eq!(
            changes.to_json(&Default::default()).unwrap(),
            r#"[["~","c[0].d.a","X","b"]]"#
        );
    }
}
