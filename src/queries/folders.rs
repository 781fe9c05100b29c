use sea_query::{Asterisk, Query, SqliteQueryBuilder};

use crate::schema::Folder;

/// SELECT * FROM ZFOLDER
pub fn select_all() -> String {
    Query::select()
        .column(Asterisk)
        .from(Folder::Table)
        .to_string(SqliteQueryBuilder)
}
