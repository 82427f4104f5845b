//! Resolving paths against a value tree.

use super::path::Step;
use crate::value::Value;

/// Returns the node reached by following `steps` from `root`.
///
/// Returns `None` when a step names a missing key, an out-of-range index,
/// or indexes into a node of the wrong kind.
pub fn resolve<'a>(root: &'a Value, steps: &[Step]) -> Option<&'a Value> {
    let mut node = root;
    for step in steps {
        node = match (step, node) {
            (Step::Key(name), Value::Map(map)) => map.get(name)?,
            (Step::Index(i), Value::List(list)) => list.get(*i)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(root: &'a mut Value, steps: &[Step]) -> Option<&'a mut Value> {
    let mut node = root;
    for step in steps {
        node = match (step, node) {
            (Step::Key(name), Value::Map(map)) => map.get_mut(name)?,
            (Step::Index(i), Value::List(list)) => list.get_mut(*i)?,
            _ => return None,
        };
    }
    Some(node)
}
