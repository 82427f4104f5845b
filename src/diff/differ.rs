//! Recursive structural diff.

use super::change::{Change, Changeset};
use crate::align::{gap_edits, lcs, linear_compare, Edit};
use crate::compare::{comparable, custom_compare, values_equal, Comparator};
use crate::error::Result;
use crate::options::Options;
use crate::path::Path;
use crate::similarity::similar_at;
use crate::sort::sort;
use crate::value::{Map, Value};
use std::borrow::Cow;
use tracing::debug;

/// Similarity thresholds tried by [`best_diff`], lowest first.
pub const BEST_DIFF_SIMILARITIES: [f64; 3] = [0.3, 0.5, 0.8];

/// Stand-in for the missing side of an added or deleted map key.
static NULL: Value = Value::Null;

/// Computes the changes that turn `a` into `b`.
///
/// Fails only when `options.sort` is set and an input cannot be
/// canonicalized.
///
/// # Example
///
/// ```
/// use structured_diff::{diff, from_json, Options};
///
/// let a = from_json(r#"{"a":2,"b":[1,2,3]}"#).unwrap();
/// let b = from_json(r#"{"a":2,"b":[1,3,4]}"#).unwrap();
/// let changes = diff(&a, &b, &Options::default()).unwrap();
/// assert_eq!(changes.to_json(&Default::default()).unwrap(), r#"[["-","b[1]",2],["+","b[2]",4]]"#);
/// ```
pub fn diff(a: &Value, b: &Value, options: &Options) -> Result<Changeset> {
    let (a, b) = prepare(a, b, options)?;
    Ok(Differ::new(options).diff_at(&Path::new(), &a, &b).into())
}

/// Diffs at several similarity thresholds and keeps the smallest result.
///
/// The 0.3 and 0.5 results are compared first, then the winner against 0.8;
/// each comparison keeps the lower threshold when both have as many changes.
pub fn best_diff(a: &Value, b: &Value, options: &Options) -> Result<Changeset> {
    let (a, b) = prepare(a, b, options)?;

    let [low, mid, high] = BEST_DIFF_SIMILARITIES.map(|similarity| {
        let opts = options.clone().similarity(similarity);
        Changeset::from(Differ::new(&opts).diff_at(&Path::new(), &a, &b))
    });
    debug!(low = low.len(), mid = mid.len(), high = high.len(), "best diff candidates");

    let (first, first_similarity) = if low.len() <= mid.len() {
        (low, BEST_DIFF_SIMILARITIES[0])
    } else {
        (mid, BEST_DIFF_SIMILARITIES[1])
    };
    let (best, similarity) = if first.len() <= high.len() {
        (first, first_similarity)
    } else {
        (high, BEST_DIFF_SIMILARITIES[2])
    };
    debug!(similarity, changes = best.len(), "best diff selected");
    Ok(best)
}

fn prepare<'v>(a: &'v Value, b: &'v Value, options: &Options) -> Result<(Cow<'v, Value>, Cow<'v, Value>)> {
    if options.sort {
        Ok((Cow::Owned(sort(a)?), Cow::Owned(sort(b)?)))
    } else {
        Ok((Cow::Borrowed(a), Cow::Borrowed(b)))
    }
}

/// Differ walks two values in lock-step under one set of options.
pub struct Differ<'a> {
    options: &'a Options,
}

impl<'a> Differ<'a> {
    pub fn new(options: &'a Options) -> Self {
        Differ { options }
    }

    /// Returns the changes that turn `a` into `b`, with paths under `path`.
    pub fn diff_at(&self, path: &Path, a: &Value, b: &Value) -> Vec<Change> {
        let mut out = Vec::new();
        self.walk(path, a, b, &mut out);
        out
    }

    fn comparator(&self) -> Option<&dyn Comparator> {
        self.options.comparator.as_deref()
    }

    fn walk(&self, path: &Path, a: &Value, b: &Value, out: &mut Vec<Change>) {
        if let Some(changes) = custom_compare(self.comparator(), path, a, b) {
            out.extend(changes);
            return;
        }

        match (a, b) {
            (Value::Null, Value::Null) => {}
            (Value::Null, _) | (_, Value::Null) => {
                out.push(Change::replaced(path.clone(), a.clone(), b.clone()));
            }
            _ if !comparable(a, b, self.options.strict) => {
                out.push(Change::replaced(path.clone(), a.clone(), b.clone()));
            }
            (Value::Map(x), Value::Map(y)) => self.walk_maps(path, x, y, out),
            (Value::List(x), Value::List(y)) => self.walk_lists(path, x, y, out),
            _ => {
                if !values_equal(a, b, self.options) {
                    out.push(Change::replaced(path.clone(), a.clone(), b.clone()));
                }
            }
        }
    }

    fn walk_maps(&self, path: &Path, x: &Map, y: &Map, out: &mut Vec<Change>) {
        let mut deleted: Vec<(&String, &Value)> = x.iter().filter(|(k, _)| !y.has(k)).collect();
        let mut common: Vec<(&String, &Value, &Value)> = x
            .iter()
            .filter_map(|(k, v)| y.get(k).map(|w| (k, v, w)))
            .collect();
        let mut added: Vec<(&String, &Value)> = y.iter().filter(|(k, _)| !x.has(k)).collect();

        deleted.sort_by(|a, b| a.0.cmp(b.0));
        common.sort_by(|a, b| a.0.cmp(b.0));
        added.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in deleted {
            let key_path = path.with_key(key);
            match custom_compare(self.comparator(), &key_path, value, &NULL) {
                Some(changes) => out.extend(changes),
                None => out.push(Change::removed(key_path, value.clone())),
            }
        }

        for (key, old, new) in common {
            self.walk(&path.with_key(key), old, new, out);
        }

        for (key, value) in added {
            let key_path = path.with_key(key);
            match custom_compare(self.comparator(), &key_path, &NULL, value) {
                Some(changes) => out.extend(changes),
                None => out.push(Change::added(key_path, value.clone())),
            }
        }
    }

    fn walk_lists(&self, path: &Path, x: &[Value], y: &[Value], out: &mut Vec<Change>) {
        if !self.options.use_lcs {
            out.extend(linear_compare(path, x, y, |p, a, b| self.diff_at(p, a, b)));
            return;
        }

        let pairs = lcs(x.len(), y.len(), |i, j| {
            similar_at(&path.with_index(i), &x[i], &y[j], self.options)
        });

        // aligned elements are addressed by their old index
        for &(i, j) in &pairs {
            self.walk(&path.with_index(i), &x[i], &y[j], out);
        }

        for edit in gap_edits(x.len(), y.len(), &pairs) {
            match edit {
                Edit::Remove { index, source } => {
                    out.push(Change::removed(path.with_index(index), x[source].clone()));
                }
                Edit::Insert { index } => {
                    out.push(Change::added(path.with_index(index), y[index].clone()));
                }
            }
        }
    }
}
