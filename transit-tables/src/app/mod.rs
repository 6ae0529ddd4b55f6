mod operation;
mod tables_app;

pub use operation::{run_id, TablesOperation};
pub use tables_app::TablesApp;
