use serde::{Deserialize, Serialize};

use crate::sequence::SequenceId;

/// a row of `full_trips.csv`: the station sequence a trip follows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FullTripRow {
    pub trip_id: String,
    pub station_seq_id: SequenceId,
}

/// a row of `station_seqs.csv`: a distinct station sequence with its station
/// ids joined by the configured delimiter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StationSeqRow {
    pub station_seq_id: SequenceId,
    pub station_seq: String,
}
