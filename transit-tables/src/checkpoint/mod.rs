//! persistence of intermediate scan state so that a long build can be stopped
//! and resumed from the last saved cursor.
mod checkpoint_record;
mod checkpoint_store;
mod checkpointed_scan;
mod file_checkpoint_store;
mod memory_checkpoint_store;

pub use checkpoint_record::Checkpoint;
pub use checkpoint_store::CheckpointStore;
pub use checkpointed_scan::{CheckpointedScan, ScanOutcome, ScanStep};
pub use file_checkpoint_store::FileCheckpointStore;
pub use memory_checkpoint_store::MemoryCheckpointStore;
