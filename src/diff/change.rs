//! Change and changeset types.

use crate::error::{Error, Result};
use crate::path::{decode_json, encode_json, Path, PathStyle};
use crate::similarity::diff_weight;
use crate::value::Value;
use std::fmt;

/// Change is one edit of a changeset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A value was added at `path`.
    Added { path: Path, value: Value },
    /// The value at `path` was removed.
    Removed { path: Path, value: Value },
    /// The value at `path` was replaced.
    Replaced { path: Path, old: Value, new: Value },
}

impl Change {
    pub fn added(path: Path, value: Value) -> Self {
        Change::Added { path, value }
    }

    pub fn removed(path: Path, value: Value) -> Self {
        Change::Removed { path, value }
    }

    pub fn replaced(path: Path, old: Value, new: Value) -> Self {
        Change::Replaced { path, old, new }
    }

    pub fn path(&self) -> &Path {
        match self {
            Change::Added { path, .. } | Change::Removed { path, .. } | Change::Replaced { path, .. } => path,
        }
    }

    /// Returns the wire symbol of the change: `+`, `-` or `~`.
    pub fn symbol(&self) -> &'static str {
        match self {
            Change::Added { .. } => "+",
            Change::Removed { .. } => "-",
            Change::Replaced { .. } => "~",
        }
    }

    /// Encodes the change as `[symbol, path, value]` or
    /// `["~", path, old, new]`.
    pub fn to_json_value(&self, style: &PathStyle) -> Result<serde_json::Value> {
        let mut entry = vec![
            serde_json::Value::from(self.symbol()),
            encode_json(self.path(), style),
        ];
        match self {
            Change::Added { value, .. } | Change::Removed { value, .. } => {
                entry.push(serde_json::to_value(value)?);
            }
            Change::Replaced { old, new, .. } => {
                entry.push(serde_json::to_value(old)?);
                entry.push(serde_json::to_value(new)?);
            }
        }
        Ok(serde_json::Value::Array(entry))
    }

    /// Decodes a change from its wire form, validating the path.
    pub fn from_json_value(raw: &serde_json::Value, style: &PathStyle) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidChange(format!("{}: {}", reason, raw));

        let entry = raw.as_array().ok_or_else(|| invalid("expected an array"))?;
        let symbol = entry
            .first()
            .and_then(|s| s.as_str())
            .ok_or_else(|| invalid("missing change symbol"))?;
        let path = decode_json(entry.get(1).ok_or_else(|| invalid("missing path"))?, style)?;
        let value_at = |i: usize| -> Result<Value> {
            let raw_value = entry.get(i).ok_or_else(|| invalid("missing value"))?;
            Ok(serde_json::from_value(raw_value.clone())?)
        };

        match (symbol, entry.len()) {
            ("+", 3) => Ok(Change::added(path, value_at(2)?)),
            ("-", 3) => Ok(Change::removed(path, value_at(2)?)),
            ("~", 4) => Ok(Change::replaced(path, value_at(2)?, value_at(3)?)),
            _ => Err(invalid("unknown change layout")),
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { path, value } | Change::Removed { path, value } => {
                write!(f, "{} {} {}", self.symbol(), path, value)
            }
            Change::Replaced { path, old, new } => {
                write!(f, "~ {} {} -> {}", path, old, new)
            }
        }
    }
}

/// Changeset is the ordered list of changes produced by a diff.
///
/// Order matters: list edits are emitted so that replaying them front to back
/// keeps every index valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changeset {
    changes: Vec<Change>,
}

impl Changeset {
    pub fn new() -> Self {
        Changeset::default()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Change> {
        self.changes.iter()
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    pub fn as_slice(&self) -> &[Change] {
        &self.changes
    }

    /// Structural weight of everything removed and added.
    pub fn weight(&self) -> usize {
        diff_weight(&self.changes)
    }

    /// Encodes the changeset as a JSON array of change tuples.
    pub fn to_json_value(&self, style: &PathStyle) -> Result<serde_json::Value> {
        Ok(serde_json::Value::Array(
            self.changes
                .iter()
                .map(|c| c.to_json_value(style))
                .collect::<Result<Vec<_>>>()?,
        ))
    }

    pub fn to_json(&self, style: &PathStyle) -> Result<String> {
        Ok(serde_json::to_string(&self.to_json_value(style)?)?)
    }

    /// Decodes a changeset from JSON text, using the same path style that
    /// produced it.
    pub fn from_json(json: &str, style: &PathStyle) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        let entries = raw
            .as_array()
            .ok_or_else(|| Error::InvalidChange(format!("expected an array of changes: {}", raw)))?;
        entries
            .iter()
            .map(|entry| Change::from_json_value(entry, style))
            .collect()
    }
}

impl From<Vec<Change>> for Changeset {
    fn from(changes: Vec<Change>) -> Self {
        Changeset { changes }
    }
}

impl FromIterator<Change> for Changeset {
    fn from_iter<T: IntoIterator<Item = Change>>(iter: T) -> Self {
        Changeset {
            changes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Changeset {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Changeset {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}

impl fmt::Display for Changeset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, change) in self.changes.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", change)?;
        }
        Ok(())
    }
}
