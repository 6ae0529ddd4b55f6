use std::path::{Path, PathBuf};

use config::Config;
use serde::{Deserialize, Serialize};

use crate::TablesError;

/// prefix of environment variables that override configuration values, such as
/// `TRANSIT_TABLES_TRANSPORT_CHECKPOINT_INTERVAL=50000`.
pub const ENV_PREFIX: &str = "TRANSIT_TABLES";

/// defines directories, checkpoint cadence and table parameters for a build.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct TablesConfig {
    /// root of the preprocessed input tables, one subdirectory per dataset
    pub data_directory: PathBuf,
    /// root of the written tables, one subdirectory per dataset
    pub output_directory: PathBuf,
    /// root of the checkpoint store, one subdirectory per run
    pub checkpoint_directory: PathBuf,
    /// trips sequenced between checkpoints
    pub full_trips_checkpoint_interval: usize,
    /// stop events scanned between checkpoints
    pub transport_checkpoint_interval: usize,
    pub walking_speed_kmph: f64,
    /// walking edges longer than this are left out of the walk table
    pub walk_threshold_minutes: f64,
    /// joins station ids in `station_seqs.csv`
    pub sequence_delimiter: String,
    /// write `.csv.gz` instead of `.csv`
    pub gzip_output: bool,
    pub overwrite: bool,
    /// keep the final checkpoint of a completed run. when false, the run's
    /// checkpoints are removed once its table is written.
    pub keep_checkpoints: bool,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data/preprocessed"),
            output_directory: PathBuf::from("data/preprocessed"),
            checkpoint_directory: PathBuf::from("checkpoints"),
            full_trips_checkpoint_interval: 100,
            transport_checkpoint_interval: 20000,
            walking_speed_kmph: 4.0,
            walk_threshold_minutes: 30.0,
            sequence_delimiter: String::from(","),
            gzip_output: false,
            overwrite: true,
            keep_checkpoints: true,
        }
    }
}

impl TablesConfig {
    /// builds the configuration from defaults, an optional TOML file and
    /// `TRANSIT_TABLES_*` environment variables, in increasing precedence.
    pub fn load(config_file: Option<&str>) -> Result<TablesConfig, TablesError> {
        let mut builder = Config::builder();
        if let Some(f) = config_file {
            log::info!("reading transit-tables configuration from {f}");
            builder = builder.add_source(config::File::new(f, config::FileFormat::Toml));
        }
        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(|e| TablesError::ConfigRead {
                msg: format!("failed reading configuration {}", config_file.unwrap_or("")),
                source: e,
            })?;
        let tables_config = config
            .try_deserialize::<TablesConfig>()
            .map_err(|e| TablesError::ConfigRead {
                msg: String::from("failed decoding configuration"),
                source: e,
            })?;
        tables_config.validate()?;
        Ok(tables_config)
    }

    pub fn validate(&self) -> Result<(), TablesError> {
        if self.full_trips_checkpoint_interval == 0 || self.transport_checkpoint_interval == 0 {
            return Err(TablesError::Configuration(String::from(
                "checkpoint intervals must be positive",
            )));
        }
        if self.walking_speed_kmph.is_nan() || self.walking_speed_kmph <= 0.0 {
            return Err(TablesError::Configuration(format!(
                "walking speed must be positive, found {}",
                self.walking_speed_kmph
            )));
        }
        if self.walk_threshold_minutes.is_nan() || self.walk_threshold_minutes < 0.0 {
            return Err(TablesError::Configuration(format!(
                "walk threshold must be non-negative, found {}",
                self.walk_threshold_minutes
            )));
        }
        if self.sequence_delimiter.is_empty() {
            return Err(TablesError::Configuration(String::from(
                "sequence delimiter must not be empty",
            )));
        }
        Ok(())
    }

    pub fn input_directory(&self, dataset: &str) -> PathBuf {
        self.data_directory.join(dataset)
    }

    pub fn dataset_output_directory(&self, dataset: &str) -> PathBuf {
        self.output_directory.join(dataset)
    }

    pub fn checkpoint_directory(&self) -> &Path {
        &self.checkpoint_directory
    }

    /// filename of an output table, such as `transport_table.csv`.
    pub fn output_filename(&self, table: &str) -> String {
        if self.gzip_output {
            format!("{table}.csv.gz")
        } else {
            format!("{table}.csv")
        }
    }
}

#[cfg(test)]
mod test {
    use super::TablesConfig;
    use std::io::Write;

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            "transport_checkpoint_interval = 500\nwalk_threshold_minutes = 15.0\ngzip_output = true"
        )
        .expect("write");
        let path = file.path().to_string_lossy().to_string();
        let conf = TablesConfig::load(Some(&path)).expect("load");
        assert_eq!(conf.transport_checkpoint_interval, 500);
        assert_eq!(conf.walk_threshold_minutes, 15.0);
        assert_eq!(conf.full_trips_checkpoint_interval, 100);
        assert_eq!(conf.output_filename("walk_table"), "walk_table.csv.gz");
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let conf = TablesConfig {
            full_trips_checkpoint_interval: 0,
            ..Default::default()
        };
        assert!(conf.validate().is_err());
        assert!(TablesConfig::default().validate().is_ok());
    }
}
