// Library interface for testing

pub mod backup;
pub mod config;
pub mod constants;
pub mod db;
pub mod destination;
pub mod entities;
pub mod error;
pub mod queries;
pub mod sanitize;
pub mod schema;
pub mod timestamp;

pub use constants::{DEFAULT_DATABASE_FILE, OUTPUT_EXTENSION, TARGET_TIMEZONE};
pub use error::{BackupError, Result};
