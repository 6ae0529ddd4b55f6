use serde::{Deserialize, Serialize};

/// a row of the preprocessed `routes` table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub route_id: String,
    /// long description of the route, such as the transport mode. may be empty.
    #[serde(default)]
    pub route_desc: String,
    /// name shown to riders, such as a line number. may be empty.
    #[serde(default)]
    pub route_short_name: String,
}
