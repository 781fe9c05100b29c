#![allow(dead_code)]

use sea_query::{Alias, ColumnDef, Query, SqliteQueryBuilder, Table};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use voice_memo_backup::config::BackupConfig;
use voice_memo_backup::schema::{CloudRecording, Folder};

/// One ZCLOUDRECORDING row to insert
#[derive(Debug, Clone, Default)]
pub struct RecordingFixture {
    pub path: Option<String>,
    pub date: Option<f64>,
    pub label: Option<String>,
    pub unique_id: Option<String>,
    pub duration: Option<f64>,
    pub folder: Option<i64>,
}

impl RecordingFixture {
    pub fn new(path: &str, label: &str, date: f64, folder: i64) -> Self {
        Self {
            path: Some(path.to_string()),
            date: Some(date),
            label: Some(label.to_string()),
            unique_id: Some(format!("{}-id", label)),
            duration: Some(42.0),
            folder: Some(folder),
        }
    }
}

fn create_recordings_table() -> String {
    Table::create()
        .table(CloudRecording::Table)
        .if_not_exists()
        .col(ColumnDef::new(Alias::new("Z_PK")).integer().primary_key())
        .col(ColumnDef::new(CloudRecording::Path).string())
        .col(ColumnDef::new(CloudRecording::Date).double())
        .col(ColumnDef::new(CloudRecording::CustomLabel).string())
        .col(ColumnDef::new(CloudRecording::CustomLabelForSorting).string())
        .col(ColumnDef::new(CloudRecording::EncryptedTitle).string())
        .col(ColumnDef::new(CloudRecording::UniqueId).string())
        .col(ColumnDef::new(CloudRecording::Duration).double())
        .col(ColumnDef::new(CloudRecording::Folder).integer())
        .to_string(SqliteQueryBuilder)
}

fn create_folders_table() -> String {
    Table::create()
        .table(Folder::Table)
        .if_not_exists()
        .col(ColumnDef::new(Folder::Pk).integer().primary_key())
        .col(ColumnDef::new(Folder::EncryptedName).string())
        .to_string(SqliteQueryBuilder)
}

fn insert_recording(recording: &RecordingFixture) -> String {
    Query::insert()
        .into_table(CloudRecording::Table)
        .columns([
            CloudRecording::Path,
            CloudRecording::Date,
            CloudRecording::CustomLabel,
            CloudRecording::CustomLabelForSorting,
            CloudRecording::UniqueId,
            CloudRecording::Duration,
            CloudRecording::Folder,
        ])
        .values_panic([
            recording.path.clone().into(),
            recording.date.into(),
            recording.label.clone().into(),
            recording.label.clone().into(),
            recording.unique_id.clone().into(),
            recording.duration.into(),
            recording.folder.into(),
        ])
        .to_string(SqliteQueryBuilder)
}

fn insert_folder(id: i64, name: &str) -> String {
    Query::insert()
        .into_table(Folder::Table)
        .columns([Folder::Pk, Folder::EncryptedName])
        .values_panic([id.into(), name.into()])
        .to_string(SqliteQueryBuilder)
}

/// Helper to create a recording database with the given rows
pub fn create_memo_database(
    db_path: &Path,
    recordings: &[RecordingFixture],
    folders: &[(i64, &str)],
) {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();

        sqlx::query(&create_recordings_table())
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(&create_folders_table())
            .execute(&pool)
            .await
            .unwrap();

        for recording in recordings {
            sqlx::query(&insert_recording(recording))
                .execute(&pool)
                .await
                .unwrap();
        }
        for (id, name) in folders {
            sqlx::query(&insert_folder(*id, name))
                .execute(&pool)
                .await
                .unwrap();
        }

        pool.close().await;
    });
}

/// Memo root + output root laid out inside one temp dir
pub struct TestLayout {
    pub memo_root: PathBuf,
    pub output_root: PathBuf,
    _guard: tempfile::TempDir,
}

impl TestLayout {
    pub fn new() -> Self {
        let guard = tempfile::tempdir().unwrap();
        let memo_root = guard.path().join("memos");
        let output_root = guard.path().join("backup");
        fs::create_dir_all(&memo_root).unwrap();
        Self {
            memo_root,
            output_root,
            _guard: guard,
        }
    }

    pub fn config(&self) -> BackupConfig {
        BackupConfig {
            voice_notes_location: self.memo_root.clone(),
            output_location: self.output_root.clone(),
            database_file: "CloudRecordings.db".to_string(),
        }
    }

    pub fn write_media(&self, name: &str, content: &[u8]) {
        fs::write(self.memo_root.join(name), content).unwrap();
    }

    pub fn create_database(&self, recordings: &[RecordingFixture], folders: &[(i64, &str)]) {
        create_memo_database(&self.config().database_path(), recordings, folders);
    }
}

/// All files below `root`, relative to it, sorted
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    fn walk(dir: &Path, root: &Path, out: &mut Vec<PathBuf>) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                walk(&path, root, out);
            } else {
                out.push(path.strip_prefix(root).unwrap().to_path_buf());
            }
        }
    }

    let mut files = Vec::new();
    walk(root, root, &mut files);
    files.sort();
    files
}
