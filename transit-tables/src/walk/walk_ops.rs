use std::path::Path;

use uom::si::f64::{Time, Velocity};

use crate::{
    config::TablesConfig,
    model::Station,
    util::csv_ops,
    walk::{build_walk_table, WalkEdge},
    TablesError,
};

pub const WALK_TABLE: &str = "walk_table";

/// builds the walk table with the configured walking speed and threshold.
pub fn run_walk_table(
    stations: &[Station],
    config: &TablesConfig,
) -> Result<Vec<WalkEdge>, TablesError> {
    let speed = Velocity::new::<uom::si::velocity::kilometer_per_hour>(config.walking_speed_kmph);
    let threshold = Time::new::<uom::si::time::minute>(config.walk_threshold_minutes);
    log::info!(
        "building walk table at {} km/h, up to {} minutes",
        config.walking_speed_kmph,
        config.walk_threshold_minutes
    );
    build_walk_table(stations, speed, threshold)
}

/// writes `walk_table.csv`.
pub fn write_walk_table(
    edges: &[WalkEdge],
    directory: &Path,
    config: &TablesConfig,
) -> Result<(), TablesError> {
    csv_ops::write_rows(
        directory,
        &config.output_filename(WALK_TABLE),
        edges,
        config.overwrite,
    )?;
    Ok(())
}
