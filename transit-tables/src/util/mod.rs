pub mod csv_ops;
