use serde::{de::DeserializeOwned, Serialize};

use crate::{checkpoint::Checkpoint, TablesError};

/// persists [`Checkpoint`]s keyed by a run identifier.
///
/// a store has a single writer per run id. implementations must never hand back
/// results and a cursor from different saves.
pub trait CheckpointStore {
    /// returns the last saved checkpoint for this run, or `None` when there is
    /// no complete checkpoint to resume from.
    fn load<R, A>(&self, run_id: &str) -> Result<Option<Checkpoint<R, A>>, TablesError>
    where
        R: DeserializeOwned,
        A: DeserializeOwned;

    /// replaces the saved checkpoint for this run.
    fn save<R, A>(&self, run_id: &str, checkpoint: &Checkpoint<R, A>) -> Result<(), TablesError>
    where
        R: Serialize,
        A: Serialize;

    /// removes every saved artifact of this run.
    fn clear(&self, run_id: &str) -> Result<(), TablesError>;
}
