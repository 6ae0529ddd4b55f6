pub mod gtfs_time;
mod input_tables;
mod route;
mod station;
mod stop_event;
mod trip;

pub use input_tables::InputTables;
pub use route::Route;
pub use station::Station;
pub use stop_event::StopEvent;
pub use trip::Trip;
