use serde::{Deserialize, Serialize};

/// a row of `walk_table.csv`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WalkEdge {
    pub start_station: String,
    pub next_station: String,
    /// minutes
    pub walk_time: f64,
}
