use geo::Point;
use serde::{Deserialize, Serialize};

/// a row of the preprocessed `stations` table. platforms and boarding areas
/// reference the station they belong to via `parent_station`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Station {
    pub stop_id: String,
    #[serde(default)]
    pub stop_name: Option<String>,
    #[serde(default)]
    pub parent_station: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
}

impl Station {
    pub fn point(&self) -> Point<f64> {
        Point::new(self.stop_lon, self.stop_lat)
    }
}
