use sea_query::{Asterisk, Query, SqliteQueryBuilder};

use crate::schema::CloudRecording;

/// SELECT * FROM ZCLOUDRECORDING
pub fn select_all() -> String {
    Query::select()
        .column(Asterisk)
        .from(CloudRecording::Table)
        .to_string(SqliteQueryBuilder)
}
