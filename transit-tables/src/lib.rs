//! builds the lookup tables consumed by a trip planner from preprocessed GTFS
//! tables: station sequences per trip, next stations per station pair, the
//! transport table of scheduled (departure, arrival) pairs and a walking-time
//! table between nearby stations.
//!
//! the scans over trips and stop_times are checkpointed through a
//! [`checkpoint::CheckpointStore`] so that an interrupted build resumes where
//! it stopped.
pub mod adjacency;
pub mod app;
pub mod checkpoint;
pub mod config;
pub mod model;
pub mod sequence;
pub mod transport;
pub mod util;
pub mod walk;

mod tables_error;

pub use tables_error::{invalid_rows_error, TablesError};
