//! The custom comparator hook.

use crate::diff::Change;
use crate::path::Path;
use crate::value::Value;

/// Verdict is the answer of a custom comparator for one pair of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The values are equal; nothing below this path is compared.
    Equal,
    /// The values differ; the pair is reported as replaced.
    NotEqual,
    /// No opinion; the default rules apply.
    Undetermined,
}

/// Comparator trait for overriding equality at chosen paths.
///
/// `old` is `Null` for a key only present on the new side, and `new` is
/// `Null` for a key only present on the old side.
pub trait Comparator: Send + Sync {
    fn compare(&self, path: &Path, old: &Value, new: &Value) -> Verdict;
}

impl<F> Comparator for F
where
    F: Fn(&Path, &Value, &Value) -> Verdict + Send + Sync,
{
    fn compare(&self, path: &Path, old: &Value, new: &Value) -> Verdict {
        self(path, old, new)
    }
}

/// Consults the comparator, if any.
///
/// Returns `None` when there is no comparator or it has no opinion, which is
/// distinct from `Some(vec![])` for values declared equal.
pub fn custom_compare(
    comparator: Option<&dyn Comparator>,
    path: &Path,
    old: &Value,
    new: &Value,
) -> Option<Vec<Change>> {
    match comparator?.compare(path, old, new) {
        Verdict::Equal => Some(Vec::new()),
        Verdict::NotEqual => Some(vec![Change::replaced(path.clone(), old.clone(), new.clone())]),
        Verdict::Undetermined => None,
    }
}
