use std::path::Path;

use crate::{
    checkpoint::{CheckpointStore, CheckpointedScan},
    config::TablesConfig,
    model::InputTables,
    sequence::{FullTripRow, SequenceRegistry, StationSeqRow, StationSequence, TripSequencer},
    util::csv_ops,
    TablesError,
};

pub mod tables {
    pub const STATION_SEQS: &str = "station_seqs";
    pub const FULL_TRIPS: &str = "full_trips";
}

/// the result of sequencing every trip: one row per trip plus the distinct
/// station sequences they reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FullTrips {
    pub trips: Vec<FullTripRow>,
    pub registry: SequenceRegistry,
}

impl FullTrips {
    /// rows of `station_seqs.csv` in id order.
    pub fn station_seq_rows(&self, delimiter: &str) -> Result<Vec<StationSeqRow>, TablesError> {
        self.registry
            .iter()
            .map(|(station_seq_id, sequence)| {
                Ok(StationSeqRow {
                    station_seq_id,
                    station_seq: sequence.join(delimiter)?,
                })
            })
            .collect()
    }
}

/// sequences every trip of the trips table through a checkpointed scan.
/// returns `None` when the scan stopped at its row limit before the last trip.
pub fn run_full_trips<C: CheckpointStore>(
    tables: &InputTables,
    scan: &CheckpointedScan,
    store: &C,
) -> Result<Option<FullTrips>, TablesError> {
    let sequencer = TripSequencer::new(tables);
    log::info!("sequencing {} trips", tables.trips.len());
    let state = match scan.run(&sequencer, &tables.trips, store)?.complete() {
        Some(state) => state,
        None => return Ok(None),
    };
    let full_trips = FullTrips {
        trips: state.results,
        registry: state.auxiliary.registry,
    };
    log::info!(
        "{} trips follow {} distinct station sequences",
        full_trips.trips.len(),
        full_trips.registry.len()
    );
    Ok(Some(full_trips))
}

/// writes `station_seqs.csv` and `full_trips.csv`.
pub fn write_full_trips(
    full_trips: &FullTrips,
    directory: &Path,
    config: &TablesConfig,
) -> Result<(), TablesError> {
    let seq_rows = full_trips.station_seq_rows(&config.sequence_delimiter)?;
    csv_ops::write_rows(
        directory,
        &config.output_filename(tables::STATION_SEQS),
        seq_rows,
        config.overwrite,
    )?;
    csv_ops::write_rows(
        directory,
        &config.output_filename(tables::FULL_TRIPS),
        &full_trips.trips,
        config.overwrite,
    )?;
    Ok(())
}

/// reads back `station_seqs.csv` and `full_trips.csv` written by
/// [`write_full_trips`].
pub fn read_full_trips(directory: &Path, config: &TablesConfig) -> Result<FullTrips, TablesError> {
    let mut seq_rows: Vec<StationSeqRow> =
        csv_ops::read_rows(&directory.join(config.output_filename(tables::STATION_SEQS)))?;
    seq_rows.sort_by_key(|r| r.station_seq_id);
    let mut sequences = Vec::with_capacity(seq_rows.len());
    for (expected_id, row) in seq_rows.into_iter().enumerate() {
        if row.station_seq_id != expected_id {
            return Err(TablesError::InvalidData(format!(
                "station_seq_id values must run from 0 without gaps, expected {expected_id} but found {}",
                row.station_seq_id
            )));
        }
        sequences.push(StationSequence::split(
            &row.station_seq,
            &config.sequence_delimiter,
        ));
    }
    let registry = SequenceRegistry::from(sequences);
    let trips: Vec<FullTripRow> =
        csv_ops::read_rows(&directory.join(config.output_filename(tables::FULL_TRIPS)))?;
    if let Some(row) = trips.iter().find(|r| r.station_seq_id >= registry.len()) {
        return Err(TablesError::InvalidData(format!(
            "trip '{}' references unknown station_seq_id {}",
            row.trip_id, row.station_seq_id
        )));
    }
    Ok(FullTrips { trips, registry })
}

#[cfg(test)]
mod test {
    use super::{read_full_trips, write_full_trips, FullTrips};
    use crate::config::TablesConfig;
    use crate::sequence::{FullTripRow, SequenceRegistry, StationSequence};

    fn full_trips() -> FullTrips {
        let mut registry = SequenceRegistry::default();
        let abc: StationSequence = ["A", "B", "C"].into_iter().collect();
        let id = registry.assign(abc);
        let empty = registry.assign(StationSequence::default());
        FullTrips {
            trips: vec![
                FullTripRow {
                    trip_id: String::from("t1"),
                    station_seq_id: id,
                },
                FullTripRow {
                    trip_id: String::from("t2"),
                    station_seq_id: empty,
                },
            ],
            registry,
        }
    }

    #[test]
    fn test_written_tables_read_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = TablesConfig::default();
        let expected = full_trips();
        write_full_trips(&expected, dir.path(), &config).expect("write");
        let station_seqs =
            std::fs::read_to_string(dir.path().join("station_seqs.csv")).expect("station_seqs");
        assert!(station_seqs.starts_with("station_seq_id,station_seq\n0,\"A,B,C\"\n"));
        let read = read_full_trips(dir.path(), &config).expect("read");
        assert_eq!(read, expected);
    }
}
