use itertools::Itertools;

#[derive(thiserror::Error, Debug)]
pub enum TablesError {
    #[error("failure reading '{0}': {1}")]
    InputRead(String, String),
    #[error("failure reading csv row from {0}: {1}")]
    CsvRead(String, csv::Error),
    #[error("failure writing to file {0}: {1}")]
    CsvWrite(String, csv::Error),
    #[error("failure reading checkpoint '{path}': {msg}")]
    CheckpointRead { path: String, msg: String },
    #[error("failure writing checkpoint '{path}': {msg}")]
    CheckpointWrite { path: String, msg: String },
    #[error("checkpoint for run '{0}' does not match the current input: {1}")]
    CheckpointMismatch(String, String),
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("{msg}: {source}")]
    ConfigRead {
        msg: String,
        source: config::ConfigError,
    },
    #[error("error due to dataset contents: {0}")]
    InvalidData(String),
    #[error("Internal Error: {0}")]
    Internal(String),
}

/// collapses the errors of several stop events or rows into a single
/// [`TablesError::InvalidData`] so a bad input table reports every offending
/// row at once.
pub fn invalid_rows_error(errors: &[TablesError]) -> TablesError {
    let concatenated = errors.iter().map(|e| e.to_string()).join("\n  ");
    TablesError::InvalidData(format!("[\n  {concatenated}\n]"))
}
