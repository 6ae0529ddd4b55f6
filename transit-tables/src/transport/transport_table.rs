use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::transport::{RoutedEdge, TimePair, TimePairList};

/// groups transport edges: a hop between two stations on one route.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransportKey {
    pub start_station: String,
    pub next_station: String,
    pub route_id: String,
    pub route_desc: String,
    pub route_short_name: String,
}

/// a row of `transport_table.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TransportTableRow {
    pub start_station: String,
    pub next_station: String,
    pub route_id: String,
    pub route_desc: String,
    pub route_short_name: String,
    pub departure_arrival_time: TimePairList,
}

/// every scheduled (departure, arrival) pair per hop and route, without
/// duplicates and in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportTable {
    edges: BTreeMap<TransportKey, BTreeSet<TimePair>>,
}

impl TransportTable {
    pub fn aggregate(routed_edges: impl IntoIterator<Item = RoutedEdge>) -> TransportTable {
        let mut edges: BTreeMap<TransportKey, BTreeSet<TimePair>> = BTreeMap::new();
        for edge in routed_edges {
            let key = TransportKey {
                start_station: edge.start_station,
                next_station: edge.next_station,
                route_id: edge.route_id,
                route_desc: edge.route_desc,
                route_short_name: edge.route_short_name,
            };
            edges.entry(key).or_default().insert(edge.time_pair);
        }
        TransportTable { edges }
    }

    /// rebuilds a table from previously written rows. rows repeating a key
    /// are merged.
    pub fn from_rows(rows: impl IntoIterator<Item = TransportTableRow>) -> TransportTable {
        let mut edges: BTreeMap<TransportKey, BTreeSet<TimePair>> = BTreeMap::new();
        for row in rows {
            let key = TransportKey {
                start_station: row.start_station,
                next_station: row.next_station,
                route_id: row.route_id,
                route_desc: row.route_desc,
                route_short_name: row.route_short_name,
            };
            edges
                .entry(key)
                .or_default()
                .extend(row.departure_arrival_time.0);
        }
        TransportTable { edges }
    }

    pub fn keys(&self) -> impl Iterator<Item = &TransportKey> {
        self.edges.keys()
    }

    pub fn time_pairs(&self, key: &TransportKey) -> Option<&BTreeSet<TimePair>> {
        self.edges.get(key)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = TransportTableRow> + '_ {
        self.edges.iter().map(|(key, pairs)| TransportTableRow {
            start_station: key.start_station.clone(),
            next_station: key.next_station.clone(),
            route_id: key.route_id.clone(),
            route_desc: key.route_desc.clone(),
            route_short_name: key.route_short_name.clone(),
            departure_arrival_time: TimePairList(pairs.iter().cloned().collect()),
        })
    }
}
