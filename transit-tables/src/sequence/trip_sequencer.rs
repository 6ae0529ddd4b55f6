use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    checkpoint::{Checkpoint, ScanStep},
    model::{InputTables, Trip},
    sequence::{FullTripRow, SequenceRegistry, StationSequence},
    TablesError,
};

/// dictionaries carried between checkpoints of the trip sequencing scan.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SequencerAuxiliary {
    /// distinct station sequences discovered so far
    pub registry: SequenceRegistry,
    /// trips that already have a [`FullTripRow`]
    pub processed_trips: HashSet<String>,
}

/// scans the trips table and assigns each trip the id of its station sequence.
///
/// stop events are grouped by trip once up front so each trip only sorts its
/// own events.
pub struct TripSequencer<'a> {
    tables: &'a InputTables,
    events_by_trip: HashMap<&'a str, Vec<usize>>,
}

impl<'a> TripSequencer<'a> {
    pub fn new(tables: &'a InputTables) -> TripSequencer<'a> {
        let mut events_by_trip: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, event) in tables.stop_times.iter().enumerate() {
            events_by_trip
                .entry(event.trip_id.as_str())
                .or_default()
                .push(idx);
        }
        TripSequencer {
            tables,
            events_by_trip,
        }
    }

    /// the stations of a trip ordered by ascending stop sequence. a trip without
    /// stop events has an empty sequence.
    pub fn sequence_for(&self, trip_id: &str) -> Result<StationSequence, TablesError> {
        let indices = match self.events_by_trip.get(trip_id) {
            Some(indices) => indices,
            None => return Ok(StationSequence::default()),
        };
        // (stop_sequence, event index) pairs, popped in ascending order
        let stop_queue_order: BinaryHeap<(u32, usize)> = indices
            .iter()
            .map(|idx| (self.tables.stop_times[*idx].stop_sequence, *idx))
            .collect();

        stop_queue_order
            .into_sorted_vec()
            .iter()
            .map(|(_, idx)| {
                let event = &self.tables.stop_times[*idx];
                self.tables.resolve_station(event).map(String::from)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(StationSequence::new)
    }
}

impl ScanStep for TripSequencer<'_> {
    type Item = Trip;
    type Results = Vec<FullTripRow>;
    type Auxiliary = SequencerAuxiliary;

    fn step(
        &self,
        state: &mut Checkpoint<Self::Results, Self::Auxiliary>,
        trip: &Trip,
    ) -> Result<(), TablesError> {
        if state.auxiliary.processed_trips.contains(&trip.trip_id) {
            return Ok(());
        }
        let sequence = self.sequence_for(&trip.trip_id)?;
        if sequence.is_empty() {
            log::debug!("trip '{}' has no stop events", trip.trip_id);
        }
        let station_seq_id = state.auxiliary.registry.assign(sequence);
        state
            .auxiliary
            .processed_trips
            .insert(trip.trip_id.clone());
        state.results.push(FullTripRow {
            trip_id: trip.trip_id.clone(),
            station_seq_id,
        });
        Ok(())
    }
}
