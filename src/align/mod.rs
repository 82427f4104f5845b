//! Align module - Pairing up elements of two lists.
//!
//! The default aligner finds a longest common subsequence under the
//! similarity predicate and reports what is left over as edits. The linear
//! comparison is a cheaper alternative that never reorders.

mod lcs;
mod linear;
mod sequence;

pub use lcs::*;
pub use linear::*;
pub use sequence::*;
