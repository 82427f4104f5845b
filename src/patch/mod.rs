//! Patch module - Replaying changesets against a value tree.
//!
//! [`patch`] applies a changeset front to back; [`unpatch`] walks it back to
//! front and inverts every entry. Entries are never reordered: list edits rely
//! on the order in which the differ emitted them.

use crate::diff::{Change, Changeset};
use crate::error::{Error, Result};
use crate::path::{resolve, resolve_mut, Path, Step};
use crate::value::{Map, Value};
use tracing::debug;


/// Applies `changes` to `root` in place.
///
/// Fails with [`Error::MalformedPath`] when an entry's path does not resolve
/// against `root`. Entries before the failing one stay applied.
pub fn patch(root: &mut Value, changes: &Changeset) -> Result<()> {
    for change in changes {
        apply(root, change, false)?;
    }
    debug!(changes = changes.len(), "patch applied");
    Ok(())
}

/// Reverts `changes` on `root` in place.
///
/// `unpatch(patch(a, diff(a, b)), diff(a, b))` restores `a`.
pub fn unpatch(root: &mut Value, changes: &Changeset) -> Result<()> {
    for change in changes.iter().rev() {
        apply(root, change, true)?;
    }
    debug!(changes = changes.len(), "patch reverted");
    Ok(())
}

fn apply(root: &mut Value, change: &Change, reverse: bool) -> Result<()> {
    match (change, reverse) {
        (Change::Added { path, value }, false) | (Change::Removed { path, value }, true) => {
            insert(root, path, value.clone())
        }
        (Change::Removed { path, .. }, false) | (Change::Added { path, .. }, true) => remove(root, path),
        (Change::Replaced { path, new, .. }, false) => assign(root, path, path.as_slice(), new.clone()),
        (Change::Replaced { path, old, .. }, true) => assign(root, path, path.as_slice(), old.clone()),
    }
}

fn insert(root: &mut Value, path: &Path, value: Value) -> Result<()> {
    let (last, parent_steps) = path
        .split_last()
        .ok_or_else(|| Error::malformed_path(path.to_string(), "cannot insert at the root"))?;

    // a missing or null parent is created to match the inserted step
    if resolve(root, parent_steps).map_or(true, Value::is_null) {
        let empty = match last {
            Step::Index(_) => Value::List(Vec::new()),
            Step::Key(_) => Value::Map(Map::new()),
        };
        assign(root, path, parent_steps, empty)?;
    }

    match (last, parent_mut(root, path, parent_steps)?) {
        (Step::Index(i), Value::List(list)) if *i <= list.len() => list.insert(*i, value),
        (Step::Index(i), Value::List(list)) => {
            return Err(out_of_range(path, *i, list.len()));
        }
        (Step::Key(key), Value::Map(map)) => map.set(key.clone(), value),
        (step, node) => return Err(wrong_container(path, step, node)),
    }
    Ok(())
}

fn remove(root: &mut Value, path: &Path) -> Result<()> {
    let (last, parent_steps) = path
        .split_last()
        .ok_or_else(|| Error::malformed_path(path.to_string(), "cannot remove the root"))?;

    match (last, parent_mut(root, path, parent_steps)?) {
        (Step::Index(i), Value::List(list)) if *i < list.len() => {
            list.remove(*i);
        }
        (Step::Index(i), Value::List(list)) => {
            return Err(out_of_range(path, *i, list.len()));
        }
        (Step::Key(key), Value::Map(map)) => {
            if map.delete(key).is_none() {
                return Err(Error::malformed_path(path.to_string(), format!("no key {:?}", key)));
            }
        }
        (step, node) => return Err(wrong_container(path, step, node)),
    }
    Ok(())
}

/// Overwrites the slot addressed by `steps`, a prefix of `path`.
fn assign(root: &mut Value, path: &Path, steps: &[Step], value: Value) -> Result<()> {
    let Some((last, parent_steps)) = steps.split_last() else {
        *root = value;
        return Ok(());
    };

    match (last, parent_mut(root, path, parent_steps)?) {
        (Step::Index(i), Value::List(list)) if *i < list.len() => list[*i] = value,
        (Step::Index(i), Value::List(list)) => {
            return Err(out_of_range(path, *i, list.len()));
        }
        (Step::Key(key), Value::Map(map)) => map.set(key.clone(), value),
        (step, node) => return Err(wrong_container(path, step, node)),
    }
    Ok(())
}

fn parent_mut<'a>(root: &'a mut Value, path: &Path, steps: &[Step]) -> Result<&'a mut Value> {
    resolve_mut(root, steps).ok_or_else(|| {
        Error::malformed_path(
            path.to_string(),
            format!("{} does not resolve", Path::from_steps(steps.to_vec())),
        )
    })
}

fn out_of_range(path: &Path, index: usize, len: usize) -> Error {
    Error::malformed_path(path.to_string(), format!("index {} out of range for length {}", index, len))
}

fn wrong_container(path: &Path, step: &Step, node: &Value) -> Error {
    let expected = match step {
        Step::Index(_) => "list",
        Step::Key(_) => "map",
    };
    Error::malformed_path(
        path.to_string(),
        format!("expected a {} but found {}", expected, node.type_name()),
    )
}
