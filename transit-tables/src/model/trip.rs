use serde::{Deserialize, Serialize};

/// a row of the preprocessed `trips` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub trip_id: String,
    pub route_id: String,
}
