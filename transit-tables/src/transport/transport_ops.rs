use std::path::Path;

use crate::{
    checkpoint::{CheckpointStore, CheckpointedScan},
    config::TablesConfig,
    model::InputTables,
    transport::{join_routes, order_stop_events, TransportScan, TransportTable, TransportTableRow},
    util::csv_ops,
    TablesError,
};

pub const TRANSPORT_TABLE: &str = "transport_table";

/// scans the stop_times log through a checkpointed scan, then joins the hops to
/// their routes and aggregates their time pairs. returns `None` when the scan
/// stopped at its row limit before the last event.
pub fn run_transport_table<C: CheckpointStore>(
    tables: &InputTables,
    scan: &CheckpointedScan,
    store: &C,
) -> Result<Option<TransportTable>, TablesError> {
    let events = order_stop_events(tables)?;
    log::info!("scanning {} stop events for transport edges", events.len());
    let state = match scan.run(&TransportScan, &events, store)?.complete() {
        Some(state) => state,
        None => return Ok(None),
    };
    let (routed, report) = join_routes(&state.results, tables);
    log::info!(
        "{} raw edges, {} joined to a route",
        state.results.len(),
        report.joined
    );
    let table = TransportTable::aggregate(routed);
    log::info!("transport table has {} rows", table.len());
    Ok(Some(table))
}

/// writes `transport_table.csv`.
pub fn write_transport_table(
    table: &TransportTable,
    directory: &Path,
    config: &TablesConfig,
) -> Result<(), TablesError> {
    csv_ops::write_rows(
        directory,
        &config.output_filename(TRANSPORT_TABLE),
        table.rows(),
        config.overwrite,
    )?;
    Ok(())
}

/// reads back `transport_table.csv` written by [`write_transport_table`].
pub fn read_transport_table(
    directory: &Path,
    config: &TablesConfig,
) -> Result<TransportTable, TablesError> {
    let rows: Vec<TransportTableRow> =
        csv_ops::read_rows(&directory.join(config.output_filename(TRANSPORT_TABLE)))?;
    Ok(TransportTable::from_rows(rows))
}
