//! builds the station sequence, next station, transport and walk tables of a
//! preprocessed GTFS dataset. set RUST_LOG=info to follow progress.
use clap::Parser;
use transit_tables::{app::TablesApp, config::TablesConfig};

fn main() {
    env_logger::init();
    let args = TablesApp::parse();
    let result = TablesConfig::load(args.config_file.as_deref())
        .and_then(|config| args.op.run(&args.dataset, &config));
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
