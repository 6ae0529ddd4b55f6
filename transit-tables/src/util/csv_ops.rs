use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use csv::QuoteStyle;
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use kdam::tqdm;
use serde::{de::DeserializeOwned, Serialize};

use crate::TablesError;

/// reads every row of a CSV file with headers into typed records. files ending
/// in `.gz` are decompressed on the fly.
pub fn read_rows<T: DeserializeOwned>(filepath: &Path) -> Result<Vec<T>, TablesError> {
    let filename = filepath.to_string_lossy().to_string();
    let file = File::open(filepath)
        .map_err(|e| TablesError::InputRead(filename.clone(), e.to_string()))?;
    let reader: Box<dyn Read> = if filename.ends_with(".gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let row_iter = tqdm!(
        csv_reader.into_deserialize::<T>(),
        desc = format!("read {filename}")
    );
    let rows = row_iter
        .map(|r| r.map_err(|e| TablesError::CsvRead(filename.clone(), e)))
        .collect::<Result<Vec<T>, TablesError>>();
    eprintln!();
    rows
}

/// writes rows to a CSV file with headers in `directory`, creating the
/// directory if needed. returns `Ok(false)` without writing when the file exists
/// and `overwrite` is false.
pub fn write_rows<T: Serialize>(
    directory: &Path,
    filename: &str,
    rows: impl IntoIterator<Item = T>,
    overwrite: bool,
) -> Result<bool, TablesError> {
    let mut writer = match create_writer(
        directory,
        filename,
        true,
        QuoteStyle::Necessary,
        overwrite,
    )? {
        Some(writer) => writer,
        None => {
            log::warn!(
                "{} already exists and overwrite is disabled, skipping write",
                directory.join(filename).to_string_lossy()
            );
            return Ok(false);
        }
    };
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| TablesError::CsvWrite(String::from(filename), e))?;
    }
    writer.flush().map_err(|e| {
        TablesError::CsvWrite(String::from(filename), csv::Error::from(e))
    })?;
    log::info!("wrote {}", directory.join(filename).to_string_lossy());
    Ok(true)
}

/// helper function to build a filewriter for writing either .csv or .csv.gz
/// files while respecting the user's overwrite preferences.
fn create_writer(
    directory: &Path,
    filename: &str,
    has_headers: bool,
    quote_style: QuoteStyle,
    overwrite: bool,
) -> Result<Option<csv::Writer<Box<dyn Write>>>, TablesError> {
    let filepath = directory.join(filename);
    if filepath.exists() && !overwrite {
        return Ok(None);
    }
    if !directory.is_dir() {
        std::fs::create_dir_all(directory).map_err(|e| {
            let dirname = directory.to_string_lossy();
            TablesError::Internal(format!("unable to create directory {dirname}: {e}"))
        })?;
    }
    let file = File::create(&filepath).map_err(|e| {
        TablesError::CsvWrite(String::from(filename), csv::Error::from(e))
    })?;
    let buffer: Box<dyn Write> = if filename.ends_with(".gz") {
        Box::new(GzEncoder::new(file, Compression::default()))
    } else {
        Box::new(file)
    };
    let writer = csv::WriterBuilder::new()
        .has_headers(has_headers)
        .quote_style(quote_style)
        .from_writer(buffer);
    Ok(Some(writer))
}
