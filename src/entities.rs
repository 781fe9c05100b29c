//! Recording and folder entities built from database rows.
//!
//! Rows are first narrowed into typed column sets ([`RecordingRow`], [`FolderRow`])
//! so the column names live in one place; the entities only see typed optionals.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use sea_query::Iden;

use crate::constants::UNNAMED_LABEL;
use crate::db::DbRow;
use crate::schema::{CloudRecording, Folder as FolderColumns};
use crate::timestamp;

fn column(iden: impl Iden) -> String {
    iden.to_string()
}

/// Join a database file name under the memo root
///
/// Only normal components are kept, so root, prefix and `..` parts can't point
/// outside `memo_location`.
fn memo_file_path(memo_location: &Path, filename: &str) -> PathBuf {
    let mut path = memo_location.to_path_buf();
    for component in Path::new(filename).components() {
        if let Component::Normal(part) = component {
            path.push(part);
        }
    }
    path
}

/// Typed view of one ZCLOUDRECORDING row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingRow {
    pub path: Option<String>,
    pub date: Option<f64>,
    pub custom_label: Option<String>,
    pub custom_label_for_sorting: Option<String>,
    pub encrypted_title: Option<String>,
    pub unique_id: Option<String>,
    pub duration: Option<f64>,
    pub folder: Option<i64>,
}

impl RecordingRow {
    pub fn from_db_row(row: &DbRow) -> Self {
        Self {
            path: row.text(&column(CloudRecording::Path)),
            date: row.real(&column(CloudRecording::Date)),
            custom_label: row.text(&column(CloudRecording::CustomLabel)),
            custom_label_for_sorting: row.text(&column(CloudRecording::CustomLabelForSorting)),
            encrypted_title: row.text(&column(CloudRecording::EncryptedTitle)),
            unique_id: row.text(&column(CloudRecording::UniqueId)),
            duration: row.real(&column(CloudRecording::Duration)),
            folder: row.integer(&column(CloudRecording::Folder)),
        }
    }
}

/// Typed view of one ZFOLDER row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FolderRow {
    pub pk: Option<i64>,
    pub encrypted_name: Option<String>,
}

impl FolderRow {
    pub fn from_db_row(row: &DbRow) -> Self {
        Self {
            pk: row.integer(&column(FolderColumns::Pk)),
            encrypted_name: row.text(&column(FolderColumns::EncryptedName)),
        }
    }
}

/// A voice recording
#[derive(Debug, Clone, Serialize)]
pub struct Recording {
    /// Media file name relative to the voice notes location
    pub filename: Option<String>,
    /// Absolute path of the media file; present iff `filename` is
    pub source_path: Option<PathBuf>,
    /// Seconds since the custom epoch
    pub raw_timestamp: Option<f64>,
    /// `raw_timestamp` localized to the target time zone
    #[serde(serialize_with = "serialize_iso8601")]
    pub localized_timestamp: Option<DateTime<FixedOffset>>,
    /// Sortable display name, used for output file names
    pub label: Option<String>,
    pub custom_label: Option<String>,
    pub encrypted_title: Option<String>,
    pub id: Option<String>,
    pub duration_seconds: Option<f64>,
    pub folder_id: Option<i64>,
    /// Source row the recording was built from
    #[serde(skip)]
    pub raw: Option<DbRow>,
}

fn serialize_iso8601<S>(
    value: &Option<DateTime<FixedOffset>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(ts) => serializer.serialize_some(&timestamp::to_iso8601(ts)),
        None => serializer.serialize_none(),
    }
}

impl Recording {
    /// Build a recording from its typed row
    ///
    /// An empty file name is treated like a missing one.
    pub fn from_row(row: RecordingRow, memo_location: &Path) -> Self {
        let filename = row.path.filter(|p| !p.is_empty());
        let source_path = filename.as_deref().map(|f| memo_file_path(memo_location, f));

        let localized_timestamp = row.date.and_then(|seconds| {
            let localized = timestamp::localize(seconds);
            if localized.is_none() {
                log::warn!("Unrepresentable recording date {} ignored", seconds);
            }
            localized
        });

        Self {
            filename,
            source_path,
            raw_timestamp: row.date,
            localized_timestamp,
            label: row.custom_label_for_sorting,
            custom_label: row.custom_label,
            encrypted_title: row.encrypted_title,
            id: row.unique_id,
            duration_seconds: row.duration,
            folder_id: row.folder,
            raw: None,
        }
    }

    /// Build a recording straight from a database row, keeping the row
    pub fn from_db_row(row: &DbRow, memo_location: &Path) -> Self {
        let mut recording = Self::from_row(RecordingRow::from_db_row(row), memo_location);
        recording.raw = Some(row.clone());
        recording
    }

    /// Name for reports and file names: label, then id, then "Unnamed"
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .filter(|l| !l.is_empty())
            .or(self.id.as_deref().filter(|id| !id.is_empty()))
            .unwrap_or(UNNAMED_LABEL)
    }

    /// Duration as m:ss, or "Unknown"
    pub fn duration_display(&self) -> String {
        match self.duration_seconds {
            Some(d) if d > 0.0 => {
                let total = d as u64;
                format!("{}:{:02}", total / 60, total % 60)
            }
            _ => "Unknown".to_string(),
        }
    }
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self
            .localized_timestamp
            .as_ref()
            .map(timestamp::to_iso8601)
            .unwrap_or_else(|| "No date".to_string());
        write!(
            f,
            "Recording: {} ({})",
            self.label.as_deref().unwrap_or(UNNAMED_LABEL),
            date
        )
    }
}

/// A folder grouping recordings
#[derive(Debug, Clone, Serialize)]
pub struct Folder {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(skip)]
    pub raw: Option<DbRow>,
}

impl Folder {
    pub fn from_row(row: FolderRow) -> Self {
        Self {
            id: row.pk,
            name: row.encrypted_name,
            raw: None,
        }
    }

    pub fn from_db_row(row: &DbRow) -> Self {
        let mut folder = Self::from_row(FolderRow::from_db_row(row));
        folder.raw = Some(row.clone());
        folder
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "None".to_string());
        write!(
            f,
            "Folder: {} (ID: {})",
            self.name.as_deref().unwrap_or(UNNAMED_LABEL),
            id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbValue;

    fn recording_db_row() -> DbRow {
        DbRow::new()
            .with("Z_PK", DbValue::Integer(1))
            .with("ZPATH", DbValue::Text("20210704 120000.m4a".to_string()))
            .with("ZDATE", DbValue::Real(0.0))
            .with("ZCUSTOMLABEL", DbValue::Text("Memo 1".to_string()))
            .with("ZCUSTOMLABELFORSORTING", DbValue::Text("Memo 1".to_string()))
            .with("ZENCRYPTEDTITLE", DbValue::Null)
            .with("ZUNIQUEID", DbValue::Text("ABC-123".to_string()))
            .with("ZDURATION", DbValue::Real(125.4))
            .with("ZFOLDER", DbValue::Integer(5))
    }

    #[test]
    fn test_recording_from_db_row() {
        let recording = Recording::from_db_row(&recording_db_row(), Path::new("/memos"));

        assert_eq!(recording.filename.as_deref(), Some("20210704 120000.m4a"));
        assert_eq!(
            recording.source_path,
            Some(PathBuf::from("/memos/20210704 120000.m4a"))
        );
        assert_eq!(recording.raw_timestamp, Some(0.0));
        assert_eq!(
            recording.localized_timestamp.map(|ts| timestamp::to_iso8601(&ts)),
            Some("2000-12-30T19:00:00-05:00".to_string())
        );
        assert_eq!(recording.label.as_deref(), Some("Memo 1"));
        assert_eq!(recording.id.as_deref(), Some("ABC-123"));
        assert_eq!(recording.encrypted_title, None);
        assert_eq!(recording.folder_id, Some(5));
        assert!(recording.raw.is_some());
    }

    #[test]
    fn test_missing_optional_fields() {
        let recording = Recording::from_db_row(&DbRow::new(), Path::new("/memos"));

        assert!(recording.filename.is_none());
        assert!(recording.source_path.is_none());
        assert!(recording.raw_timestamp.is_none());
        assert!(recording.localized_timestamp.is_none());
        assert!(recording.folder_id.is_none());
    }

    #[test]
    fn test_empty_path_counts_as_missing() {
        let row = RecordingRow {
            path: Some(String::new()),
            ..Default::default()
        };
        let recording = Recording::from_row(row, Path::new("/memos"));
        assert!(recording.filename.is_none());
        assert!(recording.source_path.is_none());
    }

    #[test]
    fn test_absolute_path_stays_under_memo_root() {
        let row = RecordingRow {
            path: Some("/etc/passwd".to_string()),
            ..Default::default()
        };
        let recording = Recording::from_row(row, Path::new("/memos"));

        assert_eq!(recording.filename.as_deref(), Some("/etc/passwd"));
        assert_eq!(
            recording.source_path,
            Some(PathBuf::from("/memos/etc/passwd"))
        );
    }

    #[test]
    fn test_parent_components_dropped() {
        let row = RecordingRow {
            path: Some("../../secret/./a.m4a".to_string()),
            ..Default::default()
        };
        let recording = Recording::from_row(row, Path::new("/memos"));

        let source = recording.source_path.unwrap();
        assert_eq!(source, PathBuf::from("/memos/secret/a.m4a"));
        assert!(source.starts_with("/memos"));
        assert!(!source.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut recording = Recording::from_row(RecordingRow::default(), Path::new("/m"));
        assert_eq!(recording.display_name(), "Unnamed");

        recording.id = Some("ABC-123".to_string());
        assert_eq!(recording.display_name(), "ABC-123");

        recording.label = Some("Standup".to_string());
        assert_eq!(recording.display_name(), "Standup");
    }

    #[test]
    fn test_recording_display_and_duration() {
        let recording = Recording::from_db_row(&recording_db_row(), Path::new("/memos"));
        assert_eq!(
            recording.to_string(),
            "Recording: Memo 1 (2000-12-30T19:00:00-05:00)"
        );
        assert_eq!(recording.duration_display(), "2:05");

        let undated = Recording::from_row(RecordingRow::default(), Path::new("/m"));
        assert_eq!(undated.to_string(), "Recording: Unnamed (No date)");
        assert_eq!(undated.duration_display(), "Unknown");
    }

    #[test]
    fn test_folder_from_db_row() {
        let row = DbRow::new()
            .with("Z_PK", DbValue::Integer(5))
            .with("ZENCRYPTEDNAME", DbValue::Text("Work".to_string()));
        let folder = Folder::from_db_row(&row);

        assert_eq!(folder.id, Some(5));
        assert_eq!(folder.name.as_deref(), Some("Work"));
        assert_eq!(folder.to_string(), "Folder: Work (ID: 5)");
    }

    #[test]
    fn test_recording_serializes_iso_timestamp() {
        let recording = Recording::from_db_row(&recording_db_row(), Path::new("/memos"));
        let json = serde_json::to_value(&recording).unwrap();

        assert_eq!(json["localized_timestamp"], "2000-12-30T19:00:00-05:00");
        assert_eq!(json["label"], "Memo 1");
        assert!(json.get("raw").is_none());
    }
}
