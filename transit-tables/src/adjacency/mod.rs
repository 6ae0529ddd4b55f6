//! reachable next stations per station, with the routes serving each hop.
mod adjacency_ops;
mod adjacency_table;
mod next_station_row;
mod route_variant;

pub use adjacency_ops::{run_next_stations, write_next_stations};
pub use adjacency_table::AdjacencyTable;
pub use next_station_row::NextStationRow;
pub use route_variant::{find_route_variants, RouteVariant};
