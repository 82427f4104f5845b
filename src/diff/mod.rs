//! Diff module - Computing changesets between two values.

mod change;
mod differ;


#[cfg(test)]
mod best_diff_test;


pub use change::*;
pub use differ::*;
