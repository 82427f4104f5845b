//! Tests for best-diff threshold selection.

#[cfg(test)]
mod tests {
    use crate::diff::{best_diff, diff, BEST_DIFF_SIMILARITIES};
    use crate::options::Options;
    use crate::value::{from_json, Value};
    use pretty_assertions::assert_eq;

    fn v(json: &str) -> Value {
        from_json(json).unwrap()
    }

    fn best(a: &str, b: &str, options: &Options) -> serde_json::Value {
        best_diff(&v(a), &v(b), options)
            .unwrap()
            .to_json_value(&options.path_style)
            .unwrap()
    }

    fn json(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(BEST_DIFF_SIMILARITIES, [0.3, 0.5, 0.8]);
    }

    #[test]
    fn test_best_diff() {
        let a = r#"{"x":[{"a":1,"c":3,"e":5},{"y":3}]}"#;
        let b = r#"{"x":[{"a":1,"b":2,"e":5}]}"#;
        assert_eq!(
            best(a, b, &Options::default()),
            json(r#"[["-","x[0].c",3],["+","x[0].b",2],["-","x[1]",{"y":3}]]"#)
        );
    }

    #[test]
    fn test_best_diff_custom_delimiter() {
        let a = r#"{"x":[{"a":1,"c":3,"e":5},{"y":3}]}"#;
        let b = r#"{"x":[{"a":1,"b":2,"e":5}]}"#;
        assert_eq!(
            best(a, b, &Options::new().delimiter("\t")),
            json(r#"[["-","x[0]\tc",3],["+","x[0]\tb",2],["-","x[1]",{"y":3}]]"#)
        );
    }

    #[test]
    fn test_best_diff_list_in_map() {
        let a = r#"{"menu":{"id":"file","value":"File","popup":{"menuitem":[
            {"value":"New","onclick":"CreateNewDoc()"},
            {"value":"Close","onclick":"CloseDoc()"}]}}}"#;
        let b = r#"{"menu":{"id":"file 2","value":"File","popup":{"menuitem":[
            {"value":"New1","onclick":"CreateNewDoc()"},
            {"value":"Open","onclick":"OpenDoc()"},
            {"value":"Close","onclick":"CloseDoc()"}]}}}"#;
        assert_eq!(
            best(a, b, &Options::default()),
            json(
                r#"[["~","menu.id","file","file 2"],
                    ["~","menu.popup.menuitem[0].value","New","New1"],
                    ["+","menu.popup.menuitem[1]",{"value":"Open","onclick":"OpenDoc()"}]]"#
            )
        );
    }

    #[test]
    fn test_best_diff_similar_objects() {
        let a = r#"{"a":[{"x":2,"y":3,"z":4},{"x":11,"y":22,"z":33}],"b":{"x":3,"z":45}}"#;
        let b = r#"{"a":[{"y":3},{"x":11,"z":33}],"b":{"y":22}}"#;
        assert_eq!(
            best(a, b, &Options::default()),
            json(
                r#"[["-","a[0].x",2],["-","a[0].z",4],["-","a[1].y",22],
                    ["-","b.x",3],["-","b.z",45],["+","b.y",22]]"#
            )
        );
    }

    #[test]
    fn test_best_diff_never_longer_than_plain_diff() {
        let a = v(r#"{"x":[{"a":1,"c":3,"e":5},{"y":3}],"z":[1,2,3]}"#);
        let b = v(r#"{"x":[{"a":1,"b":2,"e":5}],"z":[3,2,1]}"#);
        let opts = Options::default();
        let plain = diff(&a, &b, &opts).unwrap();
        let tuned = best_diff(&a, &b, &opts).unwrap();
        assert!(tuned.len() <= plain.len());
    }

    #[test]
    fn test_best_diff_of_equal_values() {
        let a = v(r#"{"a":[1,{"b":2}]}"#);
        assert!(best_diff(&a, &a, &Options::default()).unwrap().is_empty());
    }

    #[test]
    fn test_best_diff_tie_keeps_lower_threshold() {
        // Half of each element survives: aligned at 0.3 and 0.5, replaced
        // wholesale at 0.8, two entries either way.
        let a = v(r#"[{"a":1,"b":2}]"#);
        let b = v(r#"[{"a":1,"c":3}]"#);
        let [low, mid, high] = BEST_DIFF_SIMILARITIES
            .map(|similarity| diff(&a, &b, &Options::new().similarity(similarity)).unwrap());

        assert_eq!(low, mid);
        assert_eq!(low.len(), high.len());
        assert_ne!(low, high);
        assert_eq!(
            low.to_json_value(&Default::default()).unwrap(),
            json(r#"[["-","[0].b",2],["+","[0].c",3]]"#)
        );

        assert_eq!(best_diff(&a, &b, &Options::default()).unwrap(), low);
    }
}
