use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/// Errors that stop a backup run
#[derive(Debug)]
pub enum BackupError {
    /// Configuration file missing or unreadable
    ConfigRead(PathBuf, std::io::Error),
    /// Configuration file is not valid TOML or lacks a required key
    ConfigParse(PathBuf, toml::de::Error),
    /// Configuration parsed but a value is unusable
    ConfigInvalid(String),
    /// Recording database could not be opened or queried
    Database(String),
    /// Filesystem operation failed
    Io { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for BackupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupError::ConfigRead(path, err) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), err)
            }
            BackupError::ConfigParse(path, err) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), err)
            }
            BackupError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            BackupError::Database(msg) => write!(f, "Database error: {}", msg),
            BackupError::Io { path, source } => {
                write!(f, "I/O error at '{}': {}", path.display(), source)
            }
        }
    }
}

impl StdError for BackupError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            BackupError::ConfigRead(_, err) => Some(err),
            BackupError::ConfigParse(_, err) => Some(err),
            BackupError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for BackupError {
    fn from(err: sqlx::Error) -> Self {
        BackupError::Database(err.to_string())
    }
}

impl BackupError {
    /// Wrap an I/O error with the path it happened at
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackupError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BackupError>;
