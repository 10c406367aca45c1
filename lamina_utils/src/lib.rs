//! General utilities.

#[macro_use]
mod macros;

mod hash;
mod ordered_map;

pub use hash::{Hash64, StringHash64, compute_hash_str_64};
pub use ordered_map::InsertionOrderedMap;
