//! walking times between every pair of stations close enough to walk.
mod walk_edge;
mod walk_ops;
mod walk_table;

pub use walk_edge::WalkEdge;
pub use walk_ops::{run_walk_table, write_walk_table};
pub use walk_table::{build_walk_table, walking_time};
