use sea_query::{Expr, Order, Query, SqliteQueryBuilder};

use crate::schema::SqliteMaster;

/// SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name
pub fn select_table_names() -> String {
    Query::select()
        .column(SqliteMaster::Name)
        .from(SqliteMaster::Table)
        .and_where(Expr::col(SqliteMaster::Type).eq("table"))
        .order_by(SqliteMaster::Name, Order::Asc)
        .to_string(SqliteQueryBuilder)
}

/// PRAGMA table_info("<table>")
///
/// PRAGMA statements can't be built with sea-query, so the identifier is quoted by hand.
pub fn table_info(table: &str) -> String {
    format!("PRAGMA table_info(\"{}\")", table.replace('"', "\"\""))
}
