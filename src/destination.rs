//! Destination paths for copied recordings.
//!
//! Layout: `<output>/<folder>/<label> - <YYYY-MM-DD>.m4a`, with ` (n)` appended to
//! the stem until the path is free. The existence probe is not atomic with the
//! later copy, so callers must materialize each file before resolving the next.

use std::path::{Path, PathBuf};

use crate::constants::{OUTPUT_EXTENSION, UNDATED_LABEL, UNKNOWN_FOLDER_NAME};
use crate::entities::Recording;
use crate::error::{BackupError, Result};
use crate::sanitize::sanitize;
use crate::timestamp;

/// Directory a recording goes into
///
/// Missing, empty or dot-only folder names map to "Unknown"; names are sanitized
/// so they can't escape the output root.
pub fn folder_directory(output_root: &Path, folder_name: Option<&str>) -> PathBuf {
    let name = folder_name
        .map(sanitize)
        .filter(|n| !n.is_empty() && !n.chars().all(|c| c == '.'))
        .unwrap_or_else(|| UNKNOWN_FOLDER_NAME.to_string());
    output_root.join(name)
}

/// File stem: `<sanitized label> - <sanitized local date>`
pub fn destination_stem(recording: &Recording) -> String {
    let date = recording
        .localized_timestamp
        .as_ref()
        .map(timestamp::local_date)
        .unwrap_or_else(|| UNDATED_LABEL.to_string());
    format!(
        "{} - {}",
        sanitize(recording.display_name()),
        sanitize(&date)
    )
}

/// Candidate file path for a stem; `attempt` 0 is the bare stem, n > 0 adds ` (n)`
pub fn candidate_path(directory: &Path, stem: &str, attempt: u32) -> PathBuf {
    let file_name = if attempt == 0 {
        format!("{}.{}", stem, OUTPUT_EXTENSION)
    } else {
        format!("{} ({}).{}", stem, attempt, OUTPUT_EXTENSION)
    };
    directory.join(file_name)
}

/// First candidate path under `directory` that does not exist yet
pub fn first_free_path(directory: &Path, stem: &str) -> Result<PathBuf> {
    let mut attempt = 0;
    loop {
        let candidate = candidate_path(directory, stem, attempt);
        let taken = candidate
            .try_exists()
            .map_err(|e| BackupError::io(&candidate, e))?;
        if !taken {
            return Ok(candidate);
        }
        attempt += 1;
    }
}

/// Resolve a collision-free destination for `recording`, creating its folder
pub fn resolve(
    recording: &Recording,
    folder_name: Option<&str>,
    output_root: &Path,
) -> Result<PathBuf> {
    let directory = folder_directory(output_root, folder_name);
    std::fs::create_dir_all(&directory).map_err(|e| BackupError::io(&directory, e))?;

    let stem = destination_stem(recording);
    first_free_path(&directory, &stem)
}
