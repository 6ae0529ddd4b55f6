use std::{collections::HashMap, path::Path};

use crate::{
    model::{Route, Station, StopEvent, Trip},
    util::csv_ops,
    TablesError,
};

mod filenames {
    pub const STATIONS: &str = "stations.csv";
    pub const ROUTES: &str = "routes.csv";
    pub const TRIPS: &str = "trips.csv";
    pub const STOP_TIMES: &str = "stop_times.csv";
}

/// the four preprocessed tables of a dataset along with the lookups used to
/// join them by id.
///
/// when an id appears more than once in a table, the first row wins.
pub struct InputTables {
    pub stations: Vec<Station>,
    pub routes: Vec<Route>,
    pub trips: Vec<Trip>,
    pub stop_times: Vec<StopEvent>,
    station_parents: HashMap<String, Option<String>>,
    trip_routes: HashMap<String, String>,
    route_lookup: HashMap<String, usize>,
}

impl InputTables {
    pub fn new(
        stations: Vec<Station>,
        routes: Vec<Route>,
        trips: Vec<Trip>,
        stop_times: Vec<StopEvent>,
    ) -> InputTables {
        let mut station_parents = HashMap::with_capacity(stations.len());
        for station in stations.iter() {
            station_parents
                .entry(station.stop_id.clone())
                .or_insert_with(|| station.parent_station.clone());
        }
        let mut trip_routes = HashMap::with_capacity(trips.len());
        for trip in trips.iter() {
            trip_routes
                .entry(trip.trip_id.clone())
                .or_insert_with(|| trip.route_id.clone());
        }
        let mut route_lookup = HashMap::with_capacity(routes.len());
        for (idx, route) in routes.iter().enumerate() {
            route_lookup.entry(route.route_id.clone()).or_insert(idx);
        }
        InputTables {
            stations,
            routes,
            trips,
            stop_times,
            station_parents,
            trip_routes,
            route_lookup,
        }
    }

    /// loads `stations.csv`, `routes.csv`, `trips.csv` and `stop_times.csv` from
    /// a dataset directory.
    pub fn from_directory(directory: &Path) -> Result<InputTables, TablesError> {
        log::info!("loading input tables from {}", directory.to_string_lossy());
        let stations = Self::read_stations(directory)?;
        let routes = csv_ops::read_rows(&directory.join(filenames::ROUTES))?;
        let trips = Self::read_trips(directory)?;
        let stop_times = csv_ops::read_rows(&directory.join(filenames::STOP_TIMES))?;
        let tables = InputTables::new(stations, routes, trips, stop_times);
        log::info!(
            "loaded {} stations, {} routes, {} trips, {} stop times",
            tables.stations.len(),
            tables.routes.len(),
            tables.trips.len(),
            tables.stop_times.len()
        );
        Ok(tables)
    }

    /// loads only `trips.csv`, for operations that work from previously written
    /// outputs.
    pub fn read_trips(directory: &Path) -> Result<Vec<Trip>, TablesError> {
        csv_ops::read_rows(&directory.join(filenames::TRIPS))
    }

    pub fn read_stations(directory: &Path) -> Result<Vec<Station>, TablesError> {
        csv_ops::read_rows(&directory.join(filenames::STATIONS))
    }

    /// the route id serving each trip id.
    pub fn trip_routes(&self) -> &HashMap<String, String> {
        &self.trip_routes
    }

    pub fn route_for_trip(&self, trip_id: &str) -> Option<&str> {
        self.trip_routes.get(trip_id).map(String::as_str)
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.route_lookup
            .get(route_id)
            .and_then(|idx| self.routes.get(*idx))
    }

    /// the station a stop event rolls up to: its own `parent_station` column,
    /// then the parent of its stop in the stations table, then the stop itself.
    pub fn resolve_station<'a>(&'a self, event: &'a StopEvent) -> Result<&'a str, TablesError> {
        if let Some(parent) = non_empty(event.parent_station.as_deref()) {
            return Ok(parent);
        }
        match non_empty(event.stop_id.as_deref()) {
            Some(stop_id) => {
                let parent = self
                    .station_parents
                    .get(stop_id)
                    .and_then(|p| non_empty(p.as_deref()));
                Ok(parent.unwrap_or(stop_id))
            }
            None => Err(TablesError::InvalidData(format!(
                "stop event {} of trip '{}' has neither a parent_station nor a stop_id",
                event.stop_sequence, event.trip_id
            ))),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod test {
    use super::InputTables;
    use crate::model::{Route, Station, StopEvent, Trip};

    fn event(stop_id: Option<&str>, parent_station: Option<&str>) -> StopEvent {
        StopEvent {
            trip_id: String::from("t1"),
            stop_id: stop_id.map(String::from),
            stop_sequence: 1,
            parent_station: parent_station.map(String::from),
            arrival_time: String::from("08:00:00"),
            departure_time: String::from("08:00:00"),
        }
    }

    fn tables() -> InputTables {
        let stations = vec![
            Station {
                stop_id: String::from("A"),
                stop_name: None,
                parent_station: None,
                stop_lat: 46.52,
                stop_lon: 6.63,
            },
            Station {
                stop_id: String::from("A:1"),
                stop_name: None,
                parent_station: Some(String::from("A")),
                stop_lat: 46.52,
                stop_lon: 6.63,
            },
        ];
        let routes = vec![
            Route {
                route_id: String::from("R1"),
                route_desc: String::from("Metro"),
                route_short_name: String::from("M1"),
            },
            Route {
                route_id: String::from("R1"),
                route_desc: String::from("duplicate"),
                route_short_name: String::from("X"),
            },
        ];
        let trips = vec![Trip {
            trip_id: String::from("t1"),
            route_id: String::from("R1"),
        }];
        InputTables::new(stations, routes, trips, vec![])
    }

    #[test]
    fn test_resolve_station() {
        let tables = tables();
        let explicit = event(Some("A:1"), Some("Z"));
        assert_eq!(tables.resolve_station(&explicit).unwrap(), "Z");
        let platform = event(Some("A:1"), None);
        assert_eq!(tables.resolve_station(&platform).unwrap(), "A");
        let blank_parent = event(Some("A:1"), Some(""));
        assert_eq!(tables.resolve_station(&blank_parent).unwrap(), "A");
        let unknown = event(Some("Q"), None);
        assert_eq!(tables.resolve_station(&unknown).unwrap(), "Q");
        assert!(tables.resolve_station(&event(None, None)).is_err());
    }

    #[test]
    fn test_first_route_row_wins() {
        let tables = tables();
        let route = tables.route("R1").expect("route R1");
        assert_eq!(route.route_desc, "Metro");
        assert_eq!(tables.route_for_trip("t1"), Some("R1"));
        assert_eq!(tables.route_for_trip("t2"), None);
    }
}
