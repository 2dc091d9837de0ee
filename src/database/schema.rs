/*!
 * Status table schema and SQL statement builders.
 *
 * Table and column names cannot be bound as parameters, so every name that
 * reaches a statement is validated and quoted here first. Values always go
 * through `?N` placeholders.
 */

use crate::errors::DatabaseError;

/// Longest accepted table or column name
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Query listing user tables of the connected database
pub const LIST_TABLES_SQL: &str = r#"
    SELECT name FROM sqlite_master
    WHERE type = 'table' AND name NOT LIKE 'sqlite\_%' ESCAPE '\'
    ORDER BY name
"#;

/// One column of the status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: &'static str,
    pub nullable: bool,
}

const fn column(name: &'static str, sql_type: &'static str, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        sql_type,
        nullable,
    }
}

/// Columns of the status table, in insert order
pub const STATUS_COLUMNS: [ColumnDef; 13] = [
    column("id", "BIGINT", false),
    column("createdAt", "DATE", false),
    column("userScreenName", "TINYTEXT", false),
    column("text", "VARCHAR(255)", false),
    column("editedText", "VARCHAR(255)", false),
    column("place", "VARCHAR(255)", true),
    column("userPlace", "VARCHAR(255)", true),
    column("source", "VARCHAR(255)", false),
    column("geolocation", "VARCHAR(255)", true),
    column("lang", "VARCHAR(255)", true),
    column("favoriteCount", "INT", false),
    column("retweetCount", "INT", false),
    column("hashtags", "VARCHAR(255)", false),
];

/// Primary key column of the status table
pub const PRIMARY_KEY: &str = "id";

/// Check that `name` is a plain identifier and return it double-quoted
pub fn quote_identifier(name: &str) -> Result<String, DatabaseError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= MAX_IDENTIFIER_LEN {
        Ok(format!("\"{}\"", name))
    } else {
        Err(DatabaseError::InvalidIdentifier(name.to_string()))
    }
}

pub fn create_table_sql(table: &str) -> Result<String, DatabaseError> {
    let columns = STATUS_COLUMNS
        .iter()
        .map(|col| {
            let null = if col.nullable { "" } else { " NOT NULL" };
            format!("\"{}\" {}{}", col.name, col.sql_type, null)
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "CREATE TABLE {} ({}, PRIMARY KEY (\"{}\"))",
        quote_identifier(table)?,
        columns,
        PRIMARY_KEY
    ))
}

pub fn drop_table_sql(table: &str) -> Result<String, DatabaseError> {
    Ok(format!("DROP TABLE {}", quote_identifier(table)?))
}

pub fn insert_sql(table: &str) -> Result<String, DatabaseError> {
    let names = STATUS_COLUMNS
        .iter()
        .map(|col| format!("\"{}\"", col.name))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=STATUS_COLUMNS.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table)?,
        names,
        placeholders
    ))
}

/// Existence check by primary key, bound as `?1`
pub fn row_exists_sql(table: &str) -> Result<String, DatabaseError> {
    Ok(format!(
        "SELECT 1 FROM {} WHERE \"{}\" = ?1",
        quote_identifier(table)?,
        PRIMARY_KEY
    ))
}

pub fn select_column_sql(field: &str, table: &str) -> Result<String, DatabaseError> {
    Ok(format!(
        "SELECT {} FROM {}",
        quote_identifier(field)?,
        quote_identifier(table)?
    ))
}

pub fn count_rows_sql(table: &str) -> Result<String, DatabaseError> {
    Ok(format!("SELECT COUNT(*) FROM {}", quote_identifier(table)?))
}
