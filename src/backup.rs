//! Backup pipeline: load recordings and folders, then copy each recording into
//! its date-stamped destination.
//!
//! Recordings are processed one at a time, in database order. Each copy is on
//! disk before the next destination is resolved, which is what keeps the
//! ` (n)` disambiguation collision-free.

use filetime::FileTime;
use log::{debug, error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::BackupConfig;
use crate::db::SyncDb;
use crate::destination;
use crate::entities::{Folder, Recording};
use crate::error::{BackupError, Result};
use crate::queries::{folders, recordings};

/// Everything loaded from the recording database
#[derive(Debug, Default)]
pub struct Library {
    pub recordings: Vec<Recording>,
    pub folders: Vec<Folder>,
}

impl Library {
    /// Folder names keyed by folder id; the first folder wins when ids repeat
    pub fn folder_names(&self) -> HashMap<i64, Option<&str>> {
        let mut names = HashMap::with_capacity(self.folders.len());
        for folder in &self.folders {
            if let Some(id) = folder.id {
                names.entry(id).or_insert(folder.name.as_deref());
            }
        }
        names
    }
}

/// A recording copied into the output tree
#[derive(Debug, Clone)]
pub struct MovedRecording {
    pub label: String,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// A recording skipped because its media file is not on disk
#[derive(Debug, Clone)]
pub struct MissingSource {
    pub label: String,
    pub filename: Option<String>,
}

/// A recording whose copy failed
#[derive(Debug, Clone)]
pub struct FailedRecording {
    pub label: String,
    pub error: String,
}

/// Outcome of a backup run
#[derive(Debug, Default)]
pub struct BackupSummary {
    pub moved: Vec<MovedRecording>,
    pub missing: Vec<MissingSource>,
    pub failed: Vec<FailedRecording>,
}

impl BackupSummary {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Load every recording and folder with one query each
///
/// The connection is closed before returning, whether or not the queries succeeded.
pub fn load_library(config: &BackupConfig) -> Result<Library> {
    let db_path = config.database_path();
    info!("Reading recording database {}", db_path.display());

    let db = SyncDb::connect(&db_path)?;
    let recording_rows = db.fetch_all(&recordings::select_all());
    let folder_rows = db.fetch_all(&folders::select_all());
    db.close();

    let recordings = recording_rows?
        .iter()
        .map(|row| Recording::from_db_row(row, &config.voice_notes_location))
        .collect::<Vec<_>>();
    let folders = folder_rows?
        .iter()
        .map(Folder::from_db_row)
        .collect::<Vec<_>>();

    info!(
        "Loaded {} recordings and {} folders",
        recordings.len(),
        folders.len()
    );
    Ok(Library {
        recordings,
        folders,
    })
}

/// Run a full backup with the given configuration
pub fn run(config: &BackupConfig) -> Result<BackupSummary> {
    let library = load_library(config)?;
    let summary = backup_recordings(&library, &config.output_location);

    info!(
        "Backup finished: {} moved, {} missing, {} failed",
        summary.moved.len(),
        summary.missing.len(),
        summary.failed.len()
    );
    Ok(summary)
}

/// Copy every recording of `library` under `output_root`
///
/// Missing media files and per-recording failures are recorded in the summary;
/// the loop always runs to the end.
pub fn backup_recordings(library: &Library, output_root: &Path) -> BackupSummary {
    let folder_names = library.folder_names();
    let mut summary = BackupSummary::default();

    for recording in &library.recordings {
        let label = recording.display_name().to_string();

        let source = match &recording.source_path {
            Some(path) if path.exists() => path,
            _ => {
                let filename = recording.filename.clone();
                println!(
                    "Missing source: {} ({})",
                    label,
                    filename.as_deref().unwrap_or("no file name")
                );
                warn!("Skipping {}: media file not found", recording);
                summary.missing.push(MissingSource { label, filename });
                continue;
            }
        };

        let folder_name = match recording.folder_id {
            Some(id) => match folder_names.get(&id) {
                Some(name) => *name,
                None => {
                    debug!("No folder with id {} for {}", id, label);
                    None
                }
            },
            None => None,
        };

        match copy_recording(recording, source, folder_name, output_root) {
            Ok(destination) => {
                println!("Moved: {} -> {}", label, destination.display());
                summary.moved.push(MovedRecording {
                    label,
                    source: source.clone(),
                    destination,
                });
            }
            Err(e) => {
                error!("Failed to back up {}: {}", label, e);
                summary.failed.push(FailedRecording {
                    label,
                    error: e.to_string(),
                });
            }
        }
    }

    summary
}

/// Copy one recording to its resolved destination and stamp its modification time
pub fn copy_recording(
    recording: &Recording,
    source: &Path,
    folder_name: Option<&str>,
    output_root: &Path,
) -> Result<PathBuf> {
    let destination = destination::resolve(recording, folder_name, output_root)?;
    debug!("Copying {} to {}", source.display(), destination.display());

    std::fs::copy(source, &destination).map_err(|e| BackupError::io(&destination, e))?;

    match &recording.localized_timestamp {
        Some(timestamp) => {
            // Whole seconds only, same as `touch -t`
            let time = FileTime::from_unix_time(timestamp.timestamp(), 0);
            filetime::set_file_times(&destination, time, time)
                .map_err(|e| BackupError::io(&destination, e))?;
        }
        None => debug!(
            "{} has no recording date, keeping copy time",
            destination.display()
        ),
    }

    Ok(destination)
}
