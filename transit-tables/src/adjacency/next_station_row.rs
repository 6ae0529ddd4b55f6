use serde::{Deserialize, Serialize};

/// a row of `next_stations.csv`: one route serving the hop from one station to
/// the next.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NextStationRow {
    pub from: String,
    pub to: String,
    pub route_id: String,
}
