use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    checkpoint::{Checkpoint, CheckpointStore},
    TablesError,
};

mod filenames {
    pub const RESULTS: &str = "results.json.gz";
    pub const AUXILIARY: &str = "auxiliary.json.gz";
    pub const CURSOR: &str = "cursor.json";
    pub const CURRENT: &str = "CURRENT";
    pub const CURRENT_TMP: &str = "CURRENT.tmp";
    pub const GENERATION_PREFIX: &str = "gen-";
}

/// stores checkpoints on the local filesystem.
///
/// each run gets a directory under the store root. every save writes a new
/// generation directory holding the three checkpoint artifacts, then swaps the
/// `CURRENT` pointer file to it with a rename:
///
/// ```text
/// <root>/<run_id>/CURRENT          # generation number of the live checkpoint
/// <root>/<run_id>/gen-<N>/results.json.gz
/// <root>/<run_id>/gen-<N>/auxiliary.json.gz
/// <root>/<run_id>/gen-<N>/cursor.json
/// ```
///
/// a process killed mid-save leaves `CURRENT` on the previous generation, so a
/// load never mixes the results of one save with the cursor of another.
pub struct FileCheckpointStore {
    directory: PathBuf,
}

/// contents of `cursor.json`.
#[derive(Serialize, Deserialize, Debug)]
struct CursorRecord {
    run_id: String,
    generation: u64,
    cursor: usize,
}

impl FileCheckpointStore {
    pub fn new(directory: &Path) -> FileCheckpointStore {
        FileCheckpointStore {
            directory: directory.to_path_buf(),
        }
    }

    pub fn run_directory(&self, run_id: &str) -> PathBuf {
        self.directory.join(run_id)
    }

    fn generation_directory(&self, run_id: &str, generation: u64) -> PathBuf {
        self.run_directory(run_id)
            .join(format!("{}{generation}", filenames::GENERATION_PREFIX))
    }

    /// reads the live generation number from `CURRENT`, if any.
    fn current_generation(&self, run_id: &str) -> Result<Option<u64>, TablesError> {
        let path = self.run_directory(run_id).join(filenames::CURRENT);
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(&path).map_err(|e| read_error(&path, e))?;
        let generation = text.trim().parse::<u64>().map_err(|e| {
            read_error(&path, format!("invalid generation '{}': {e}", text.trim()))
        })?;
        Ok(Some(generation))
    }

    /// removes generation directories other than `keep`. failures are logged
    /// since stale generations never affect a load.
    fn remove_stale_generations(&self, run_id: &str, keep: u64) {
        let run_dir = self.run_directory(run_id);
        let entries = match std::fs::read_dir(&run_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("unable to list {}: {e}", run_dir.to_string_lossy());
                return;
            }
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            let generation = name
                .strip_prefix(filenames::GENERATION_PREFIX)
                .and_then(|g| g.parse::<u64>().ok());
            match generation {
                Some(g) if g != keep => {
                    if let Err(e) = std::fs::remove_dir_all(entry.path()) {
                        log::warn!("unable to remove stale checkpoint {name}: {e}");
                    }
                }
                _ => {}
            }
        }
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load<R, A>(&self, run_id: &str) -> Result<Option<Checkpoint<R, A>>, TablesError>
    where
        R: DeserializeOwned,
        A: DeserializeOwned,
    {
        let generation = match self.current_generation(run_id)? {
            Some(generation) => generation,
            None => {
                log::warn!("no checkpoint found for run '{run_id}'. Nothing was loaded.");
                return Ok(None);
            }
        };
        let gen_dir = self.generation_directory(run_id, generation);
        let results_path = gen_dir.join(filenames::RESULTS);
        let auxiliary_path = gen_dir.join(filenames::AUXILIARY);
        let cursor_path = gen_dir.join(filenames::CURSOR);
        let all_present = [&results_path, &auxiliary_path, &cursor_path]
            .iter()
            .all(|p| p.exists());
        if !all_present {
            log::warn!(
                "one or more checkpoint files are missing in {}. Nothing was loaded.",
                gen_dir.to_string_lossy()
            );
            return Ok(None);
        }

        let cursor_file = File::open(&cursor_path).map_err(|e| read_error(&cursor_path, e))?;
        let record: CursorRecord = serde_json::from_reader(BufReader::new(cursor_file))
            .map_err(|e| read_error(&cursor_path, e))?;
        if record.run_id != run_id || record.generation != generation {
            return Err(TablesError::CheckpointMismatch(
                run_id.to_string(),
                format!(
                    "{} belongs to run '{}' generation {}",
                    cursor_path.to_string_lossy(),
                    record.run_id,
                    record.generation
                ),
            ));
        }
        let results = read_gz_json(&results_path)?;
        let auxiliary = read_gz_json(&auxiliary_path)?;
        log::info!(
            "loaded checkpoint for run '{run_id}' at cursor {} (generation {generation})",
            record.cursor
        );
        Ok(Some(Checkpoint::new(results, auxiliary, record.cursor)))
    }

    fn save<R, A>(&self, run_id: &str, checkpoint: &Checkpoint<R, A>) -> Result<(), TablesError>
    where
        R: Serialize,
        A: Serialize,
    {
        let run_dir = self.run_directory(run_id);
        std::fs::create_dir_all(&run_dir).map_err(|e| write_error(&run_dir, e))?;
        let generation = self.current_generation(run_id)?.map(|g| g + 1).unwrap_or(0);
        let gen_dir = self.generation_directory(run_id, generation);
        // leftover from a save that died before the pointer swap
        if gen_dir.exists() {
            std::fs::remove_dir_all(&gen_dir).map_err(|e| write_error(&gen_dir, e))?;
        }
        std::fs::create_dir(&gen_dir).map_err(|e| write_error(&gen_dir, e))?;

        write_gz_json(&gen_dir.join(filenames::RESULTS), &checkpoint.results)?;
        write_gz_json(&gen_dir.join(filenames::AUXILIARY), &checkpoint.auxiliary)?;
        let record = CursorRecord {
            run_id: run_id.to_string(),
            generation,
            cursor: checkpoint.cursor,
        };
        let cursor_path = gen_dir.join(filenames::CURSOR);
        let cursor_json =
            serde_json::to_vec(&record).map_err(|e| write_error(&cursor_path, e))?;
        write_synced(&cursor_path, &cursor_json)?;

        let tmp_path = run_dir.join(filenames::CURRENT_TMP);
        write_synced(&tmp_path, generation.to_string().as_bytes())?;
        let current_path = run_dir.join(filenames::CURRENT);
        std::fs::rename(&tmp_path, &current_path).map_err(|e| write_error(&current_path, e))?;
        log::debug!(
            "saved checkpoint for run '{run_id}' at cursor {} (generation {generation})",
            checkpoint.cursor
        );

        self.remove_stale_generations(run_id, generation);
        Ok(())
    }

    fn clear(&self, run_id: &str) -> Result<(), TablesError> {
        let run_dir = self.run_directory(run_id);
        if run_dir.exists() {
            std::fs::remove_dir_all(&run_dir).map_err(|e| write_error(&run_dir, e))?;
            log::info!("cleared checkpoints for run '{run_id}'");
        }
        Ok(())
    }
}

fn read_gz_json<T: DeserializeOwned>(path: &Path) -> Result<T, TablesError> {
    let file = File::open(path).map_err(|e| read_error(path, e))?;
    let decoder = GzDecoder::new(BufReader::new(file));
    serde_json::from_reader(decoder).map_err(|e| read_error(path, e))
}

fn write_gz_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TablesError> {
    let file = File::create(path).map_err(|e| write_error(path, e))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    serde_json::to_writer(&mut encoder, value).map_err(|e| write_error(path, e))?;
    let file = encoder.finish().map_err(|e| write_error(path, e))?;
    file.sync_all().map_err(|e| write_error(path, e))
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), TablesError> {
    let mut file = File::create(path).map_err(|e| write_error(path, e))?;
    file.write_all(bytes).map_err(|e| write_error(path, e))?;
    file.sync_all().map_err(|e| write_error(path, e))
}

fn read_error(path: &Path, e: impl ToString) -> TablesError {
    TablesError::CheckpointRead {
        path: path.to_string_lossy().to_string(),
        msg: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl ToString) -> TablesError {
    TablesError::CheckpointWrite {
        path: path.to_string_lossy().to_string(),
        msg: e.to_string(),
    }
}
