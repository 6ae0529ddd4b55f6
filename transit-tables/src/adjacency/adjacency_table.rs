use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    adjacency::NextStationRow, sequence::FullTrips, transport::TransportTable, TablesError,
};

/// for each (from, to) station pair that appears consecutively in some trip,
/// the set of routes whose trips make that hop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdjacencyTable {
    edges: BTreeMap<(String, String), BTreeSet<String>>,
}

impl AdjacencyTable {
    /// walks every distinct station sequence pairwise and unions into each hop
    /// the routes of all trips that follow that sequence.
    ///
    /// trips missing from `trip_routes` contribute no route. their count is
    /// returned alongside the table.
    pub fn build(
        full_trips: &FullTrips,
        trip_routes: &HashMap<String, String>,
    ) -> Result<(AdjacencyTable, usize), TablesError> {
        let mut routes_by_sequence: Vec<BTreeSet<&str>> =
            vec![BTreeSet::new(); full_trips.registry.len()];
        let mut unmatched_trips = 0;
        for row in full_trips.trips.iter() {
            let routes = routes_by_sequence
                .get_mut(row.station_seq_id)
                .ok_or_else(|| {
                    TablesError::InvalidData(format!(
                        "trip '{}' references unknown station_seq_id {}",
                        row.trip_id, row.station_seq_id
                    ))
                })?;
            match trip_routes.get(&row.trip_id) {
                Some(route_id) => {
                    routes.insert(route_id.as_str());
                }
                None => unmatched_trips += 1,
            }
        }
        if unmatched_trips > 0 {
            log::warn!("{unmatched_trips} trips have no route in the trips table and were skipped");
        }

        let mut edges: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
        for (station_seq_id, sequence) in full_trips.registry.iter() {
            let routes = &routes_by_sequence[station_seq_id];
            for (from, to) in sequence.pairs() {
                edges
                    .entry((from.to_string(), to.to_string()))
                    .or_default()
                    .extend(routes.iter().map(|r| r.to_string()));
            }
        }
        Ok((AdjacencyTable { edges }, unmatched_trips))
    }

    /// the same mapping read off a transport table, whose edges already hold
    /// the route of every consecutive stop pair in the stop_times log.
    pub fn from_transport_table(table: &TransportTable) -> AdjacencyTable {
        let mut edges: BTreeMap<(String, String), BTreeSet<String>> = BTreeMap::new();
        for key in table.keys() {
            edges
                .entry((key.start_station.clone(), key.next_station.clone()))
                .or_default()
                .insert(key.route_id.clone());
        }
        AdjacencyTable { edges }
    }

    pub fn routes(&self, from: &str, to: &str) -> Option<&BTreeSet<String>> {
        self.edges.get(&(from.to_string(), to.to_string()))
    }

    /// number of station pairs.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// one row per route per station pair, ordered by (from, to, route_id).
    pub fn rows(&self) -> impl Iterator<Item = NextStationRow> + '_ {
        self.edges.iter().flat_map(|((from, to), routes)| {
            routes.iter().map(move |route_id| NextStationRow {
                from: from.clone(),
                to: to.clone(),
                route_id: route_id.clone(),
            })
        })
    }
}

#[cfg(test)]
mod test {
    use super::AdjacencyTable;
    use crate::sequence::{FullTripRow, FullTrips, SequenceRegistry, StationSequence};
    use std::collections::{BTreeSet, HashMap};

    fn full_trips(trips: &[(&str, &[&str])]) -> FullTrips {
        let mut registry = SequenceRegistry::default();
        let rows = trips
            .iter()
            .map(|(trip_id, stations)| {
                let sequence: StationSequence = stations.iter().copied().collect();
                FullTripRow {
                    trip_id: trip_id.to_string(),
                    station_seq_id: registry.assign(sequence),
                }
            })
            .collect();
        FullTrips {
            trips: rows,
            registry,
        }
    }

    fn trip_routes(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(t, r)| (t.to_string(), r.to_string()))
            .collect()
    }

    fn set(routes: &[&str]) -> BTreeSet<String> {
        routes.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn test_routes_are_unioned_across_sequences() {
        let trips = full_trips(&[
            ("t1", &["A", "B", "C"]),
            ("t2", &["A", "B", "C"]),
            ("t3", &["X", "A", "B"]),
            ("t4", &["C", "B"]),
        ]);
        let routes = trip_routes(&[("t1", "R1"), ("t2", "R2"), ("t3", "R3"), ("t4", "R1")]);
        let (table, unmatched) = AdjacencyTable::build(&trips, &routes).expect("build");
        assert_eq!(unmatched, 0);
        assert_eq!(table.routes("A", "B"), Some(&set(&["R1", "R2", "R3"])));
        assert_eq!(table.routes("B", "C"), Some(&set(&["R1", "R2"])));
        assert_eq!(table.routes("X", "A"), Some(&set(&["R3"])));
        assert_eq!(table.routes("C", "B"), Some(&set(&["R1"])));
        assert_eq!(table.routes("B", "A"), None);
        assert_eq!(table.len(), 4);
        assert_eq!(table.rows().count(), 7);
    }

    #[test]
    fn test_trip_without_route_is_counted() {
        let trips = full_trips(&[("t1", &["A", "B"]), ("t2", &["A", "B"]), ("t3", &["B", "C"])]);
        let routes = trip_routes(&[("t1", "R1")]);
        let (table, unmatched) = AdjacencyTable::build(&trips, &routes).expect("build");
        assert_eq!(unmatched, 2);
        assert_eq!(table.routes("A", "B"), Some(&set(&["R1"])));
        // the hop is known but no route is recorded, so no rows are written
        assert_eq!(table.routes("B", "C"), Some(&set(&[])));
        let rows: Vec<_> = table.rows().map(|r| (r.from, r.to, r.route_id)).collect();
        assert_eq!(
            rows,
            vec![(String::from("A"), String::from("B"), String::from("R1"))]
        );
    }

    #[test]
    fn test_empty_and_single_station_sequences_add_no_hops() {
        let trips = full_trips(&[("t1", &[]), ("t2", &["A"])]);
        let routes = trip_routes(&[("t1", "R1"), ("t2", "R1")]);
        let (table, _) = AdjacencyTable::build(&trips, &routes).expect("build");
        assert!(table.is_empty());
    }
}
