//! Path module - Locations inside a value tree and their external encodings.

mod codec;
mod path;
mod resolve;

pub use codec::*;
pub use path::*;
pub use resolve::*;
