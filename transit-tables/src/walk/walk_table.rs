use geo::{Distance, Geodesic};
use kdam::{Bar, BarExt};
use uom::si::f64::{Length, Time, Velocity};

use crate::{model::Station, walk::WalkEdge, TablesError};

/// time to walk `distance` at a constant `speed`.
pub fn walking_time(distance: Length, speed: Velocity) -> Time {
    distance / speed
}

/// walking edges for every ordered pair of distinct stations whose geodesic
/// walking time is at most `threshold`. both directions of a pair are listed.
pub fn build_walk_table(
    stations: &[Station],
    speed: Velocity,
    threshold: Time,
) -> Result<Vec<WalkEdge>, TablesError> {
    let points: Vec<_> = stations.iter().map(|s| s.point()).collect();
    let mut bar = Bar::builder()
        .total(stations.len())
        .desc("walk table")
        .build()
        .map_err(|e| TablesError::Internal(format!("error building progress bar: {e}")))?;
    let mut edges = vec![];
    for (i, start) in stations.iter().enumerate() {
        for (j, next) in stations.iter().enumerate() {
            if i == j {
                continue;
            }
            let meters = Geodesic.distance(points[i], points[j]);
            let time = walking_time(Length::new::<uom::si::length::meter>(meters), speed);
            if time <= threshold {
                edges.push(WalkEdge {
                    start_station: start.stop_id.clone(),
                    next_station: next.stop_id.clone(),
                    walk_time: time.get::<uom::si::time::minute>(),
                });
            }
        }
        let _ = bar.update(1);
    }
    eprintln!();
    log::info!(
        "{} walking edges among {} stations",
        edges.len(),
        stations.len()
    );
    Ok(edges)
}

#[cfg(test)]
mod test {
    use super::{build_walk_table, walking_time};
    use crate::model::Station;
    use uom::si::f64::{Length, Time, Velocity};
    use uom::si::{length::kilometer, time::minute, velocity::kilometer_per_hour};

    /// longitude span of 100 meters along the equator of the WGS84 ellipsoid.
    const DEGREES_PER_100_METERS: f64 = 100.0 / 6378137.0 * 180.0 / std::f64::consts::PI;

    fn station(stop_id: &str, lon: f64) -> Station {
        Station {
            stop_id: stop_id.to_string(),
            stop_name: None,
            parent_station: None,
            stop_lat: 0.0,
            stop_lon: lon,
        }
    }

    fn speed() -> Velocity {
        Velocity::new::<kilometer_per_hour>(4.0)
    }

    #[test]
    fn test_walking_time() {
        let short = walking_time(Length::new::<kilometer>(0.1), speed());
        assert!((short.get::<minute>() - 1.5).abs() < 1e-9);
        let long = walking_time(Length::new::<kilometer>(3.0), speed());
        assert!((long.get::<minute>() - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_threshold_keeps_short_walks_only() {
        let stations = vec![
            station("A", 0.0),
            station("B", DEGREES_PER_100_METERS),
            station("C", 30.0 * DEGREES_PER_100_METERS),
        ];
        let edges = build_walk_table(&stations, speed(), Time::new::<minute>(30.0)).expect("walk");
        let pairs: Vec<_> = edges
            .iter()
            .map(|e| (e.start_station.as_str(), e.next_station.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "B"), ("B", "A")]);
        for edge in edges.iter() {
            assert!((edge.walk_time - 1.5).abs() < 1e-3, "{}", edge.walk_time);
        }
    }

    #[test]
    fn test_colocated_stations_are_both_listed() {
        let stations = vec![station("A", 0.0), station("A2", 0.0)];
        let edges = build_walk_table(&stations, speed(), Time::new::<minute>(30.0)).expect("walk");
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].walk_time, 0.0);
    }
}
