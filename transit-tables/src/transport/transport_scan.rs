use serde::{Deserialize, Serialize};

use crate::{
    checkpoint::{Checkpoint, ScanStep},
    transport::ScanEvent,
    TablesError,
};

/// a hop between two consecutive stops of one trip, before it is joined to
/// its route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    pub start_station: String,
    pub next_station: String,
    pub trip_id: String,
    /// departure from `start_station`
    pub departure_time: String,
    /// arrival at `next_station`
    pub arrival_time: String,
}

/// state carried between checkpoints of the transport scan.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TransportAuxiliary {
    /// the last event scanned. kept in the checkpoint so a hop whose two stops
    /// fall on either side of a save is emitted exactly once.
    pub previous: Option<ScanEvent>,
}

/// scans the ordered stop event log and emits one [`RawEdge`] per pair of
/// consecutive events that belong to the same trip.
pub struct TransportScan;

impl ScanStep for TransportScan {
    type Item = ScanEvent;
    type Results = Vec<RawEdge>;
    type Auxiliary = TransportAuxiliary;

    fn step(
        &self,
        state: &mut Checkpoint<Self::Results, Self::Auxiliary>,
        event: &ScanEvent,
    ) -> Result<(), TablesError> {
        if let Some(previous) = &state.auxiliary.previous {
            if previous.trip_id == event.trip_id {
                state.results.push(RawEdge {
                    start_station: previous.station.clone(),
                    next_station: event.station.clone(),
                    trip_id: event.trip_id.clone(),
                    departure_time: previous.departure_time.clone(),
                    arrival_time: event.arrival_time.clone(),
                });
            }
        }
        state.auxiliary.previous = Some(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{RawEdge, TransportAuxiliary, TransportScan};
    use crate::checkpoint::{Checkpoint, ScanStep};
    use crate::transport::ScanEvent;

    fn event(trip_id: &str, station: &str, arrival: &str, departure: &str) -> ScanEvent {
        ScanEvent {
            trip_id: trip_id.to_string(),
            station: station.to_string(),
            arrival_time: arrival.to_string(),
            departure_time: departure.to_string(),
        }
    }

    #[test]
    fn test_no_edge_crosses_a_trip_boundary() {
        let events = vec![
            event("A", "s1", "", "t1"),
            event("A", "s2", "t2'", "t2"),
            event("B", "s3", "", "t3"),
        ];
        let mut state = Checkpoint::default();
        for e in events.iter() {
            TransportScan.step(&mut state, e).expect("step");
        }
        assert_eq!(
            state.results,
            vec![RawEdge {
                start_station: String::from("s1"),
                next_station: String::from("s2"),
                trip_id: String::from("A"),
                departure_time: String::from("t1"),
                arrival_time: String::from("t2'"),
            }]
        );
        assert_eq!(state.auxiliary.previous, Some(events[2].clone()));
    }

    #[test]
    fn test_resumed_state_emits_the_spanning_edge_once() {
        let events = vec![
            event("A", "s1", "08:00:00", "08:00:00"),
            event("A", "s2", "08:05:00", "08:06:00"),
            event("A", "s3", "08:10:00", "08:10:00"),
        ];
        let mut state = Checkpoint::default();
        TransportScan.step(&mut state, &events[0]).expect("step");
        state.cursor = 1;
        let json = serde_json::to_string(&state).expect("serialize");
        let mut resumed: Checkpoint<Vec<RawEdge>, TransportAuxiliary> =
            serde_json::from_str(&json).expect("deserialize");
        for e in events[1..].iter() {
            TransportScan.step(&mut resumed, e).expect("step");
        }
        let hops: Vec<_> = resumed
            .results
            .iter()
            .map(|e| (e.start_station.as_str(), e.next_station.as_str()))
            .collect();
        assert_eq!(hops, vec![("s1", "s2"), ("s2", "s3")]);
    }
}
