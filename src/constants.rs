use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Time zone every recording timestamp is localized into
pub const TARGET_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Extension given to every copied recording, whatever the source format
pub const OUTPUT_EXTENSION: &str = "m4a";

/// Database file name looked up inside the voice notes location
pub const DEFAULT_DATABASE_FILE: &str = "CloudRecordings.db";

/// Characters that are not allowed in a file name
pub const RESERVED_FILENAME_CHARS: [char; 8] = [':', '/', '\\', '?', '*', '<', '>', '|'];

/// Replacement for every reserved character
pub const FILENAME_REPLACEMENT: char = '-';

/// Folder name used when a recording has no matching (or an unnamed) folder
pub const UNKNOWN_FOLDER_NAME: &str = "Unknown";

/// Label used when a recording has neither a label nor an id
pub const UNNAMED_LABEL: &str = "Unnamed";

/// Date part of the file name for recordings without a timestamp
pub const UNDATED_LABEL: &str = "Undated";

/// Reference instant of the recording database: 2000-12-31T00:00:00Z
///
/// Raw `ZDATE` values are seconds elapsed since this instant.
pub fn custom_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 12, 31, 0, 0, 0)
        .single()
        .expect("custom epoch is a valid UTC instant")
}
