use super::TablesOperation;
use clap::Parser;

/// command line tool that builds trip planner lookup tables from a
/// preprocessed GTFS dataset
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TablesApp {
    #[command(subcommand)]
    pub op: TablesOperation,
    /// dataset name, selects the input, output and checkpoint subdirectories
    #[arg(long)]
    pub dataset: String,
    /// TOML file overriding the default configuration
    #[arg(long)]
    pub config_file: Option<String>,
}
