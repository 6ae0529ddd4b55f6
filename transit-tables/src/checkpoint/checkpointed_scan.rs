use kdam::{Bar, BarExt};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    checkpoint::{Checkpoint, CheckpointStore},
    TablesError,
};

/// one step of a resumable scan: folds a single input row into the scan state.
///
/// a step only reads the row and mutates the state it is handed, so feeding the
/// same (state, row) pair always yields the same new state. this is what makes
/// reprocessing the rows after the last checkpoint safe.
pub trait ScanStep {
    type Item;
    type Results: Serialize + DeserializeOwned + Default;
    type Auxiliary: Serialize + DeserializeOwned + Default;

    fn step(
        &self,
        state: &mut Checkpoint<Self::Results, Self::Auxiliary>,
        item: &Self::Item,
    ) -> Result<(), TablesError>;
}

/// how a [`CheckpointedScan`] ended.
#[derive(Debug)]
pub enum ScanOutcome<R, A> {
    /// every input row is reflected in the state.
    Complete(Checkpoint<R, A>),
    /// the row limit was reached first. the state was saved and a later run
    /// with the same run id resumes from it.
    Interrupted(Checkpoint<R, A>),
}

impl<R, A> ScanOutcome<R, A> {
    pub fn is_complete(&self) -> bool {
        matches!(self, ScanOutcome::Complete(_))
    }

    /// the final state of a complete scan.
    pub fn complete(self) -> Option<Checkpoint<R, A>> {
        match self {
            ScanOutcome::Complete(state) => Some(state),
            ScanOutcome::Interrupted(_) => None,
        }
    }
}

/// drives a [`ScanStep`] over an input table, persisting the state to a
/// [`CheckpointStore`] every `checkpoint_interval` rows.
///
/// checkpoints land on absolute cursor positions that are multiples of the
/// interval, plus once when the scan stops. after an unclean termination at most
/// `checkpoint_interval` rows are processed again.
pub struct CheckpointedScan {
    pub run_id: String,
    pub checkpoint_interval: usize,
    /// stop after this many rows in this process.
    pub row_limit: Option<usize>,
}

impl CheckpointedScan {
    pub fn new(run_id: &str, checkpoint_interval: usize) -> CheckpointedScan {
        CheckpointedScan {
            run_id: run_id.to_string(),
            checkpoint_interval,
            row_limit: None,
        }
    }

    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> CheckpointedScan {
        self.row_limit = row_limit;
        self
    }

    pub fn run<S, C>(
        &self,
        step: &S,
        items: &[S::Item],
        store: &C,
    ) -> Result<ScanOutcome<S::Results, S::Auxiliary>, TablesError>
    where
        S: ScanStep,
        C: CheckpointStore,
    {
        if self.checkpoint_interval == 0 {
            return Err(TablesError::Configuration(format!(
                "checkpoint interval for run '{}' must be positive",
                self.run_id
            )));
        }
        let mut state: Checkpoint<S::Results, S::Auxiliary> =
            match store.load(&self.run_id)? {
                Some(loaded) => loaded,
                None => Checkpoint::default(),
            };
        if state.cursor > items.len() {
            return Err(TablesError::CheckpointMismatch(
                self.run_id.clone(),
                format!(
                    "checkpoint cursor {} is past the end of the {} input rows",
                    state.cursor,
                    items.len()
                ),
            ));
        }

        let start = state.cursor;
        let end = match self.row_limit {
            Some(limit) => start.saturating_add(limit).min(items.len()),
            None => items.len(),
        };
        if start > 0 {
            log::info!(
                "run '{}' resuming at row {start} of {}",
                self.run_id,
                items.len()
            );
        }

        let mut bar = Bar::builder()
            .total(end - start)
            .desc(self.run_id.clone())
            .build()
            .map_err(|e| TablesError::Internal(format!("error building progress bar: {e}")))?;
        let mut unsaved = false;
        for (idx, item) in items.iter().enumerate().take(end).skip(start) {
            step.step(&mut state, item)?;
            state.cursor = idx + 1;
            unsaved = true;
            if state.cursor % self.checkpoint_interval == 0 {
                log::debug!("saving checkpoint at row {}", state.cursor);
                store.save(&self.run_id, &state)?;
                unsaved = false;
            }
            let _ = bar.update(1);
        }
        eprintln!();

        if unsaved || (start == 0 && end == 0) {
            store.save(&self.run_id, &state)?;
        }

        if state.cursor < items.len() {
            log::info!(
                "run '{}' stopped at row {} of {}, checkpoint saved",
                self.run_id,
                state.cursor,
                items.len()
            );
            Ok(ScanOutcome::Interrupted(state))
        } else {
            log::info!("run '{}' scanned all {} rows", self.run_id, items.len());
            Ok(ScanOutcome::Complete(state))
        }
    }
}
