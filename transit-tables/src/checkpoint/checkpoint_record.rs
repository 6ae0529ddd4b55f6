use serde::{Deserialize, Serialize};

/// the state of a checkpointed scan: the accumulated result rows, auxiliary
/// dictionaries and counters, and the cursor.
///
/// `cursor` is the index of the next input row to process, so every row before
/// it is reflected in `results` and `auxiliary` and no row at or after it is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Checkpoint<R, A> {
    pub results: R,
    pub auxiliary: A,
    pub cursor: usize,
}

impl<R, A> Checkpoint<R, A> {
    pub fn new(results: R, auxiliary: A, cursor: usize) -> Checkpoint<R, A> {
        Checkpoint {
            results,
            auxiliary,
            cursor,
        }
    }
}
