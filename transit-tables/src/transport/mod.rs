//! scheduled (departure, arrival) time pairs per station hop and route, built
//! from a checkpointed scan over the stop_times log.
mod route_join;
mod scan_event;
mod time_pair;
mod transport_ops;
mod transport_scan;
mod transport_table;

pub use route_join::{join_routes, JoinReport, RoutedEdge};
pub use scan_event::{order_stop_events, ScanEvent};
pub use time_pair::{TimePair, TimePairList};
pub use transport_ops::{read_transport_table, run_transport_table, write_transport_table};
pub use transport_scan::{RawEdge, TransportAuxiliary, TransportScan};
pub use transport_table::{TransportKey, TransportTable, TransportTableRow};
