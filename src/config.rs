use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants::DEFAULT_DATABASE_FILE;
use crate::error::{BackupError, Result};

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

/// Backup configuration file structure
///
/// Format:
/// ```toml
/// voice_notes_location = "/Users/me/Library/Group Containers/group.com.apple.VoiceMemos.shared/Recordings"
/// output_location = "/Volumes/Backup/Voice Memos"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct BackupConfig {
    /// Directory holding the recordings and the recording database (required)
    pub voice_notes_location: PathBuf,
    /// Root directory the recordings are copied into (required)
    pub output_location: PathBuf,
    /// Database file name, relative to voice_notes_location unless absolute
    /// (default: CloudRecordings.db)
    #[serde(default = "default_database_file")]
    pub database_file: String,
}

impl BackupConfig {
    /// Load and validate the configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BackupError::ConfigRead(path.to_path_buf(), e))?;
        let config: BackupConfig = toml::from_str(&content)
            .map_err(|e| BackupError::ConfigParse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject required values that are present but empty
    pub fn validate(&self) -> Result<()> {
        if self.voice_notes_location.as_os_str().is_empty() {
            return Err(BackupError::ConfigInvalid(
                "Required parameter 'voice_notes_location' is empty".to_string(),
            ));
        }
        if self.output_location.as_os_str().is_empty() {
            return Err(BackupError::ConfigInvalid(
                "Required parameter 'output_location' is empty".to_string(),
            ));
        }
        if self.database_file.is_empty() {
            return Err(BackupError::ConfigInvalid(
                "Parameter 'database_file' is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of the recording database
    pub fn database_path(&self) -> PathBuf {
        // join() keeps an absolute database_file as-is
        self.voice_notes_location.join(&self.database_file)
    }
}
