use clap::Subcommand;
use serde::{Deserialize, Serialize};

use crate::{
    adjacency::{self, AdjacencyTable},
    checkpoint::{CheckpointStore, CheckpointedScan, FileCheckpointStore},
    config::TablesConfig,
    model::InputTables,
    sequence::{self, FullTrips},
    transport::{self, TransportTable},
    walk, TablesError,
};

mod pipelines {
    pub const FULL_TRIPS: &str = "full-trips";
    pub const TRANSPORT_TABLE: &str = "transport-table";
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum TablesOperation {
    /// sequence the stations of every trip into station_seqs and full_trips
    FullTrips {
        /// discard saved checkpoints and start from the first trip
        #[arg(long, default_value_t = false)]
        fresh: bool,
        /// stop after this many trips, saving a checkpoint to resume from
        #[arg(long)]
        row_limit: Option<usize>,
    },
    /// list the routes serving each pair of consecutive stations
    NextStations {
        /// derive from transport_table instead of station_seqs and full_trips
        #[arg(long, default_value_t = false)]
        from_transport_table: bool,
    },
    /// aggregate scheduled (departure, arrival) pairs per station hop and route
    TransportTable {
        /// discard saved checkpoints and start from the first stop event
        #[arg(long, default_value_t = false)]
        fresh: bool,
        /// stop after this many stop events, saving a checkpoint to resume from
        #[arg(long)]
        row_limit: Option<usize>,
    },
    /// walking times between stations within the walking threshold
    WalkTable,
    /// build every table from a single load of the input tables
    All {
        /// discard saved checkpoints of both scans
        #[arg(long, default_value_t = false)]
        fresh: bool,
    },
}

impl TablesOperation {
    pub fn run(&self, dataset: &str, config: &TablesConfig) -> Result<(), TablesError> {
        let input_directory = config.input_directory(dataset);
        let output_directory = config.dataset_output_directory(dataset);
        let store = FileCheckpointStore::new(config.checkpoint_directory());
        match self {
            TablesOperation::FullTrips { fresh, row_limit } => {
                let tables = InputTables::from_directory(&input_directory)?;
                if let Some(full_trips) =
                    full_trips(&tables, dataset, config, &store, *fresh, *row_limit)?
                {
                    sequence::write_full_trips(&full_trips, &output_directory, config)?;
                    finish_run(&store, &run_id(dataset, pipelines::FULL_TRIPS), config)?;
                }
                Ok(())
            }
            TablesOperation::NextStations {
                from_transport_table,
            } => {
                let table = if *from_transport_table {
                    let transport_table =
                        transport::read_transport_table(&output_directory, config)?;
                    AdjacencyTable::from_transport_table(&transport_table)
                } else {
                    let full_trips = sequence::read_full_trips(&output_directory, config)?;
                    let trips = InputTables::read_trips(&input_directory)?;
                    let tables = InputTables::new(vec![], vec![], trips, vec![]);
                    adjacency::run_next_stations(&full_trips, &tables)?
                };
                adjacency::write_next_stations(&table, &output_directory, config)
            }
            TablesOperation::TransportTable { fresh, row_limit } => {
                let tables = InputTables::from_directory(&input_directory)?;
                if let Some(table) =
                    transport_table(&tables, dataset, config, &store, *fresh, *row_limit)?
                {
                    transport::write_transport_table(&table, &output_directory, config)?;
                    finish_run(&store, &run_id(dataset, pipelines::TRANSPORT_TABLE), config)?;
                }
                Ok(())
            }
            TablesOperation::WalkTable => {
                let stations = InputTables::read_stations(&input_directory)?;
                let edges = walk::run_walk_table(&stations, config)?;
                walk::write_walk_table(&edges, &output_directory, config)
            }
            TablesOperation::All { fresh } => {
                let tables = InputTables::from_directory(&input_directory)?;
                let full_trips = full_trips(&tables, dataset, config, &store, *fresh, None)?
                    .ok_or_else(|| incomplete_scan(pipelines::FULL_TRIPS))?;
                sequence::write_full_trips(&full_trips, &output_directory, config)?;
                let adjacency_table = adjacency::run_next_stations(&full_trips, &tables)?;
                adjacency::write_next_stations(&adjacency_table, &output_directory, config)?;
                finish_run(&store, &run_id(dataset, pipelines::FULL_TRIPS), config)?;

                let table = transport_table(&tables, dataset, config, &store, *fresh, None)?
                    .ok_or_else(|| incomplete_scan(pipelines::TRANSPORT_TABLE))?;
                transport::write_transport_table(&table, &output_directory, config)?;
                finish_run(&store, &run_id(dataset, pipelines::TRANSPORT_TABLE), config)?;

                let edges = walk::run_walk_table(&tables.stations, config)?;
                walk::write_walk_table(&edges, &output_directory, config)
            }
        }
    }
}

/// checkpoints of a dataset's pipeline live under their own run id, such as
/// `zurich-transport-table`.
pub fn run_id(dataset: &str, pipeline: &str) -> String {
    format!("{dataset}-{pipeline}")
}

fn full_trips<C: CheckpointStore>(
    tables: &InputTables,
    dataset: &str,
    config: &TablesConfig,
    store: &C,
    fresh: bool,
    row_limit: Option<usize>,
) -> Result<Option<FullTrips>, TablesError> {
    let scan = prepare_scan(
        run_id(dataset, pipelines::FULL_TRIPS),
        config.full_trips_checkpoint_interval,
        store,
        fresh,
        row_limit,
    )?;
    let result = sequence::run_full_trips(tables, &scan, store)?;
    if result.is_none() {
        log::info!("run again to resume sequencing trips");
    }
    Ok(result)
}

fn transport_table<C: CheckpointStore>(
    tables: &InputTables,
    dataset: &str,
    config: &TablesConfig,
    store: &C,
    fresh: bool,
    row_limit: Option<usize>,
) -> Result<Option<TransportTable>, TablesError> {
    let scan = prepare_scan(
        run_id(dataset, pipelines::TRANSPORT_TABLE),
        config.transport_checkpoint_interval,
        store,
        fresh,
        row_limit,
    )?;
    let result = transport::run_transport_table(tables, &scan, store)?;
    if result.is_none() {
        log::info!("run again to resume scanning stop events");
    }
    Ok(result)
}

fn prepare_scan<C: CheckpointStore>(
    run_id: String,
    checkpoint_interval: usize,
    store: &C,
    fresh: bool,
    row_limit: Option<usize>,
) -> Result<CheckpointedScan, TablesError> {
    if fresh {
        log::info!("clearing checkpoints of run '{run_id}'");
        store.clear(&run_id)?;
    }
    Ok(CheckpointedScan::new(&run_id, checkpoint_interval).with_row_limit(row_limit))
}

fn finish_run<C: CheckpointStore>(
    store: &C,
    run_id: &str,
    config: &TablesConfig,
) -> Result<(), TablesError> {
    if !config.keep_checkpoints {
        log::debug!("removing checkpoints of completed run '{run_id}'");
        store.clear(run_id)?;
    }
    Ok(())
}

fn incomplete_scan(pipeline: &str) -> TablesError {
    TablesError::Internal(format!(
        "{pipeline} scan stopped before the end of its input without a row limit"
    ))
}
