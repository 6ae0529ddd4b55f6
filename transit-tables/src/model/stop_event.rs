use serde::{Deserialize, Serialize};

/// a row of the preprocessed `stop_times` table: one vehicle visit at a stop
/// during a trip.
///
/// within a trip, `stop_sequence` values are unique and give the visit order.
/// the table itself carries no ordering guarantee across trips.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StopEvent {
    pub trip_id: String,
    #[serde(default)]
    pub stop_id: Option<String>,
    pub stop_sequence: u32,
    #[serde(default)]
    pub parent_station: Option<String>,
    /// GTFS `H:MM:SS` time, may exceed 24 hours. empty for untimed stops.
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub departure_time: String,
}
