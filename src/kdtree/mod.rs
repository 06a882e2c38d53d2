//! An implementation of an immutable k-d tree supporting exact
//! nearest-neighbor queries.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;

pub use builder::KdTreeBuilder;
pub use index::KdTree;
pub use r#trait::KdPoint;
