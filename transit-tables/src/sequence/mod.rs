//! canonical station sequences per trip, deduplicated into shared sequence ids.
mod full_trip_row;
mod sequence_ops;
mod sequence_registry;
mod station_sequence;
mod trip_sequencer;

pub use full_trip_row::{FullTripRow, StationSeqRow};
pub use sequence_ops::{read_full_trips, run_full_trips, write_full_trips, FullTrips};
pub use sequence_registry::SequenceRegistry;
pub use station_sequence::{SequenceId, StationSequence};
pub use trip_sequencer::{SequencerAuxiliary, TripSequencer};
