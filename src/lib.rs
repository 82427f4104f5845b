//! # Structured Diff
//!
//! Path-addressed structural diff, patch and unpatch for nested data.
//!
//! This library compares two trees of maps, lists and scalars and produces a
//! changeset: an ordered list of additions, removals and replacements, each
//! addressed by a path. List elements are aligned with a similarity-tolerant
//! longest common subsequence, so an element that changed a little is diffed
//! in place instead of being removed and re-added. A changeset can be applied
//! to the old tree, or reverted on the new one.
//!
//! ## Modules
//!
//! - [`value`] - In-memory representation of JSON/YAML documents
//! - [`path`] - Paths into a value and their text and list encodings
//! - [`compare`] - Scalar equivalence rules and the custom comparator hook
//! - [`similarity`] - Structural weight and similarity scoring
//! - [`align`] - List alignment (LCS and linear)
//! - [`diff`] - The recursive differ and best-diff threshold search
//! - [`patch`] - Applying and reverting changesets
//! - [`sort`] - Canonical ordering of values

pub mod align;
pub mod compare;
pub mod diff;
pub mod error;
pub mod options;
pub mod path;
pub mod patch;
pub mod similarity;
pub mod sort;
pub mod value;

pub use compare::{Comparator, Verdict};
pub use diff::{best_diff, diff, Change, Changeset, Differ};
pub use error::{Error, Result};
pub use options::Options;
pub use path::{Path, PathStyle, Step};
pub use patch::{patch, unpatch};
pub use similarity::similar;
pub use sort::sort;
pub use value::{from_json, from_yaml, to_json, to_yaml, Map, Value};
