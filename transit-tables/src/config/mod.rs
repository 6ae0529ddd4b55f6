mod tables_config;

pub use tables_config::{TablesConfig, ENV_PREFIX};
