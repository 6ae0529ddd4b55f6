use std::path::Path;

use crate::{
    adjacency::{find_route_variants, AdjacencyTable},
    config::TablesConfig,
    model::InputTables,
    sequence::FullTrips,
    util::csv_ops,
    TablesError,
};

pub const NEXT_STATIONS: &str = "next_stations";

/// builds the adjacency table from sequenced trips, reporting routes that
/// follow more than one station sequence along the way.
pub fn run_next_stations(
    full_trips: &FullTrips,
    tables: &InputTables,
) -> Result<AdjacencyTable, TablesError> {
    let variants = find_route_variants(&full_trips.trips, tables.trip_routes());
    if !variants.is_empty() {
        log::info!("{} routes have more than one station sequence", variants.len());
    }
    let (table, unmatched_trips) = AdjacencyTable::build(full_trips, tables.trip_routes())?;
    log::info!(
        "found {} station pairs, {} trips without a route",
        table.len(),
        unmatched_trips
    );
    Ok(table)
}

/// writes `next_stations.csv`.
pub fn write_next_stations(
    table: &AdjacencyTable,
    directory: &Path,
    config: &TablesConfig,
) -> Result<(), TablesError> {
    csv_ops::write_rows(
        directory,
        &config.output_filename(NEXT_STATIONS),
        table.rows(),
        config.overwrite,
    )?;
    Ok(())
}
