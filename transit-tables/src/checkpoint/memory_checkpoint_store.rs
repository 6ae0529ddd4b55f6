use std::{cell::RefCell, collections::HashMap};

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    checkpoint::{Checkpoint, CheckpointStore},
    TablesError,
};

/// keeps checkpoints in memory as serialized JSON, for dry runs and tests.
/// values still round trip through serde so resumed state matches what a
/// [`super::FileCheckpointStore`] would return.
#[derive(Default)]
pub struct MemoryCheckpointStore {
    checkpoints: RefCell<HashMap<String, serde_json::Value>>,
    saves: RefCell<usize>,
}

impl MemoryCheckpointStore {
    pub fn new() -> MemoryCheckpointStore {
        MemoryCheckpointStore::default()
    }

    /// number of saves performed across all runs.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn load<R, A>(&self, run_id: &str) -> Result<Option<Checkpoint<R, A>>, TablesError>
    where
        R: DeserializeOwned,
        A: DeserializeOwned,
    {
        match self.checkpoints.borrow().get(run_id) {
            None => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                TablesError::CheckpointRead {
                    path: format!("memory://{run_id}"),
                    msg: e.to_string(),
                }
            }),
        }
    }

    fn save<R, A>(&self, run_id: &str, checkpoint: &Checkpoint<R, A>) -> Result<(), TablesError>
    where
        R: Serialize,
        A: Serialize,
    {
        let value =
            serde_json::to_value(checkpoint).map_err(|e| TablesError::CheckpointWrite {
                path: format!("memory://{run_id}"),
                msg: e.to_string(),
            })?;
        self.checkpoints
            .borrow_mut()
            .insert(run_id.to_string(), value);
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn clear(&self, run_id: &str) -> Result<(), TablesError> {
        self.checkpoints.borrow_mut().remove(run_id);
        Ok(())
    }
}
