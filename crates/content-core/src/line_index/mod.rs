//! # Line Index Module.
//!
//! A B-Tree of line lengths. Each line's length includes its delimiter, so a
//! line's starting offset is the sum of the lengths before it.
pub mod btree;
pub mod line_iter;
pub mod line_summary;
pub mod node;
pub mod search_cache;

pub use btree::BTreeLineIndex;

pub const MAX_CHILDREN: usize = 16;
