use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{invalid_rows_error, model::InputTables, TablesError};

/// a stop event reduced to what the transport scan needs, with its station
/// already resolved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub trip_id: String,
    pub station: String,
    pub arrival_time: String,
    pub departure_time: String,
}

/// orders the stop_times log for the transport scan: events are grouped by trip
/// with trips in the order they first appear, and each trip's events are sorted
/// by stop sequence. the sort is stable, so the result depends only on the
/// input table.
///
/// every event whose station cannot be resolved is reported in a single error.
pub fn order_stop_events(tables: &InputTables) -> Result<Vec<ScanEvent>, TablesError> {
    let mut trip_groups: Vec<Vec<usize>> = vec![];
    let mut group_of_trip: HashMap<&str, usize> = HashMap::new();
    for (idx, event) in tables.stop_times.iter().enumerate() {
        let group = *group_of_trip
            .entry(event.trip_id.as_str())
            .or_insert_with(|| {
                trip_groups.push(vec![]);
                trip_groups.len() - 1
            });
        trip_groups[group].push(idx);
    }
    log::debug!(
        "ordering {} stop events across {} trips",
        tables.stop_times.len(),
        trip_groups.len()
    );

    let mut ordered = Vec::with_capacity(tables.stop_times.len());
    let mut errors = vec![];
    for mut group in trip_groups.into_iter() {
        group.sort_by_key(|idx| tables.stop_times[*idx].stop_sequence);
        for idx in group {
            let event = &tables.stop_times[idx];
            match tables.resolve_station(event) {
                Ok(station) => ordered.push(ScanEvent {
                    trip_id: event.trip_id.clone(),
                    station: station.to_string(),
                    arrival_time: event.arrival_time.clone(),
                    departure_time: event.departure_time.clone(),
                }),
                Err(e) => errors.push(e),
            }
        }
    }
    if !errors.is_empty() {
        return Err(invalid_rows_error(&errors));
    }
    Ok(ordered)
}

#[cfg(test)]
mod test {
    use super::order_stop_events;
    use crate::model::{InputTables, StopEvent};

    fn event(trip_id: &str, stop_sequence: u32, stop_id: Option<&str>) -> StopEvent {
        StopEvent {
            trip_id: trip_id.to_string(),
            stop_id: stop_id.map(String::from),
            stop_sequence,
            parent_station: None,
            arrival_time: format!("08:0{stop_sequence}:00"),
            departure_time: format!("08:0{stop_sequence}:30"),
        }
    }

    #[test]
    fn test_interleaved_trips_are_grouped_in_first_appearance_order() {
        let tables = InputTables::new(
            vec![],
            vec![],
            vec![],
            vec![
                event("b", 2, Some("Y")),
                event("a", 3, Some("C")),
                event("b", 1, Some("X")),
                event("a", 1, Some("A")),
                event("c", 1, Some("Z")),
                event("a", 2, Some("B")),
            ],
        );
        let ordered = order_stop_events(&tables).expect("order");
        let stations: Vec<_> = ordered
            .iter()
            .map(|e| (e.trip_id.as_str(), e.station.as_str()))
            .collect();
        assert_eq!(
            stations,
            vec![
                ("b", "X"),
                ("b", "Y"),
                ("a", "A"),
                ("a", "B"),
                ("a", "C"),
                ("c", "Z"),
            ]
        );
        assert_eq!(ordered[0].departure_time, "08:01:30");
    }

    #[test]
    fn test_unresolvable_events_are_all_reported() {
        let tables = InputTables::new(
            vec![],
            vec![],
            vec![],
            vec![
                event("a", 1, None),
                event("a", 2, Some("B")),
                event("b", 7, None),
            ],
        );
        let error = order_stop_events(&tables).expect_err("should fail");
        let msg = error.to_string();
        assert!(msg.contains("stop event 1 of trip 'a'"), "{msg}");
        assert!(msg.contains("stop event 7 of trip 'b'"), "{msg}");
    }
}
