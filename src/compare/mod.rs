//! Compare module - Scalar equality, comparability and the custom comparator hook.

mod comparator;
mod equality;

pub use comparator::*;
pub use equality::*;
