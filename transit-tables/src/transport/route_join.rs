use crate::{
    model::InputTables,
    transport::{RawEdge, TimePair},
};

/// a raw edge with the route of its trip attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdge {
    pub start_station: String,
    pub next_station: String,
    pub route_id: String,
    pub route_desc: String,
    pub route_short_name: String,
    pub time_pair: TimePair,
}

/// counts of raw edges kept and dropped by [`join_routes`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinReport {
    pub joined: usize,
    /// trip id not found in the trips table
    pub missing_trip: usize,
    /// route id of the trip not found in the routes table
    pub missing_route: usize,
}

impl JoinReport {
    pub fn dropped(&self) -> usize {
        self.missing_trip + self.missing_route
    }
}

/// inner joins raw edges to trips and then to routes. edges that fail either
/// join are dropped and counted in the returned report.
pub fn join_routes(raw_edges: &[RawEdge], tables: &InputTables) -> (Vec<RoutedEdge>, JoinReport) {
    let mut report = JoinReport::default();
    let mut routed = Vec::with_capacity(raw_edges.len());
    for edge in raw_edges.iter() {
        let route_id = match tables.route_for_trip(&edge.trip_id) {
            Some(route_id) => route_id,
            None => {
                report.missing_trip += 1;
                continue;
            }
        };
        let route = match tables.route(route_id) {
            Some(route) => route,
            None => {
                report.missing_route += 1;
                continue;
            }
        };
        report.joined += 1;
        routed.push(RoutedEdge {
            start_station: edge.start_station.clone(),
            next_station: edge.next_station.clone(),
            route_id: route.route_id.clone(),
            route_desc: route.route_desc.clone(),
            route_short_name: route.route_short_name.clone(),
            time_pair: TimePair::new(&edge.departure_time, &edge.arrival_time),
        });
    }
    if report.dropped() > 0 {
        log::warn!(
            "dropped {} of {} transport edges: {} with an unknown trip, {} with an unknown route",
            report.dropped(),
            raw_edges.len(),
            report.missing_trip,
            report.missing_route
        );
    }
    (routed, report)
}

#[cfg(test)]
mod test {
    use super::{join_routes, JoinReport};
    use crate::model::{InputTables, Route, Trip};
    use crate::transport::RawEdge;

    fn raw(trip_id: &str) -> RawEdge {
        RawEdge {
            start_station: String::from("A"),
            next_station: String::from("B"),
            trip_id: trip_id.to_string(),
            departure_time: String::from("08:00:00"),
            arrival_time: String::from("08:05:00"),
        }
    }

    #[test]
    fn test_unmatched_edges_are_dropped_and_counted() {
        let routes = vec![Route {
            route_id: String::from("R1"),
            route_desc: String::from("Metro"),
            route_short_name: String::from("M1"),
        }];
        let trips = vec![
            Trip {
                trip_id: String::from("t1"),
                route_id: String::from("R1"),
            },
            Trip {
                trip_id: String::from("t2"),
                route_id: String::from("RX"),
            },
        ];
        let tables = InputTables::new(vec![], routes, trips, vec![]);
        let edges = vec![raw("t1"), raw("t2"), raw("t3"), raw("t3"), raw("t1")];
        let (routed, report) = join_routes(&edges, &tables);
        assert_eq!(
            report,
            JoinReport {
                joined: 2,
                missing_trip: 2,
                missing_route: 1,
            }
        );
        assert_eq!(routed.len(), 2);
        assert_eq!(routed[0].route_desc, "Metro");
        assert_eq!(routed[0].route_short_name, "M1");
    }
}
