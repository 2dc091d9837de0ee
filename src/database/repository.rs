/*!
 * Status database handle.
 *
 * `SqlDatabase` binds a database name to a connection descriptor and exposes
 * table lifecycle and row operations. Each call opens its own connection and
 * releases it before returning.
 *
 * Two surfaces are provided:
 * - `try_*` methods return `Result<_, DatabaseError>`
 * - the plain methods log failures and fall back to an empty collection,
 *   `0` inserted rows, or `ROW_COUNT_UNAVAILABLE`
 */

use log::{debug, error, info};
use rusqlite::{params, Connection};

use super::connection::Connector;
use super::models::{value_to_string, StatusRecord};
use super::schema;
use crate::errors::DatabaseError;
use crate::status::Status;

/// Row count reported when the table cannot be counted
pub const ROW_COUNT_UNAVAILABLE: i64 = -1;

/// A named database reachable through a `Connector`
#[derive(Debug, Clone)]
pub struct SqlDatabase {
    name: String,
    connector: Connector,
    url: String,
}

impl SqlDatabase {
    /// Bind `name` to `connector`; the URL is derived once here
    pub fn new(name: impl Into<String>, connector: Connector) -> Self {
        let name = name.into();
        let url = connector.url_for(&name);
        Self {
            name,
            connector,
            url,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connector(&self) -> &Connector {
        &self.connector
    }

    fn connect(&self) -> Result<Connection, DatabaseError> {
        let driver = self.connector.load_driver()?;
        debug!(
            "Connecting to '{}' as '{}'",
            self.url,
            self.connector.user().username
        );
        driver.open(&self.url)
    }

    // =========================================================================
    // Table Operations
    // =========================================================================

    /// Names of the user tables in this database, sorted
    pub fn try_list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let conn = self.connect()?;

        debug!("Retrieving tables of '{}'", self.name);
        let mut stmt = conn.prepare(schema::LIST_TABLES_SQL)?;
        let tables = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(tables)
    }

    pub fn list_tables(&self) -> Vec<String> {
        self.try_list_tables().unwrap_or_else(|e| {
            log_failure("list tables", &e);
            Vec::new()
        })
    }

    /// Create a status table called `table_name`
    pub fn try_create_table(&self, table_name: &str) -> Result<(), DatabaseError> {
        let sql = schema::create_table_sql(table_name)?;
        let conn = self.connect()?;

        debug!("Creating table '{}'", table_name);
        conn.execute(&sql, [])?;
        info!("Created table '{}' in '{}'", table_name, self.name);
        Ok(())
    }

    pub fn create_table(&self, table_name: &str) {
        if let Err(e) = self.try_create_table(table_name) {
            log_failure(&format!("create table '{}'", table_name), &e);
        }
    }

    pub fn try_drop_table(&self, table_name: &str) -> Result<(), DatabaseError> {
        let sql = schema::drop_table_sql(table_name)?;
        let conn = self.connect()?;

        debug!("Dropping table '{}'", table_name);
        conn.execute(&sql, [])?;
        info!("Dropped table '{}' from '{}'", table_name, self.name);
        Ok(())
    }

    pub fn drop_table(&self, table_name: &str) {
        if let Err(e) = self.try_drop_table(table_name) {
            log_failure(&format!("drop table '{}'", table_name), &e);
        }
    }

    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Insert every status whose id is not in the table yet.
    ///
    /// Stops at the first failing statement; rows inserted before it stay.
    /// Returns the number of rows inserted.
    pub fn try_insert_records(
        &self,
        statuses: &[Status],
        table_name: &str,
    ) -> Result<usize, DatabaseError> {
        let mut inserted = 0;
        self.insert_counting(statuses, table_name, &mut inserted)?;
        Ok(inserted)
    }

    /// Insert every new status, returning how many rows were added even when
    /// a later statement fails
    pub fn insert_records(&self, statuses: &[Status], table_name: &str) -> usize {
        let mut inserted = 0;
        if let Err(e) = self.insert_counting(statuses, table_name, &mut inserted) {
            log_failure(
                &format!("insert statuses into '{}' after {} rows", table_name, inserted),
                &e,
            );
        }
        inserted
    }

    fn insert_counting(
        &self,
        statuses: &[Status],
        table_name: &str,
        inserted: &mut usize,
    ) -> Result<(), DatabaseError> {
        let insert_sql = schema::insert_sql(table_name)?;
        let exists_sql = schema::row_exists_sql(table_name)?;
        let conn = self.connect()?;

        debug!("Adding {} statuses into table '{}'", statuses.len(), table_name);
        let mut exists = conn.prepare(&exists_sql)?;
        let mut insert = conn.prepare(&insert_sql)?;

        for status in statuses {
            if exists.exists([status.id])? {
                debug!("Status {} already stored, skipping", status.id);
                continue;
            }

            let record = StatusRecord::from_status(status);
            insert.execute(params![
                record.id,
                record.created_at,
                record.user_screen_name,
                record.text,
                record.edited_text,
                record.place,
                record.user_place,
                record.source,
                record.geolocation,
                record.lang,
                record.favorite_count,
                record.retweet_count,
                record.hashtags,
            ])?;
            *inserted += 1;
        }

        info!("Total statuses inserted into '{}': {}", table_name, inserted);
        Ok(())
    }

    /// All values of column `field` in `table_name`, rendered as strings
    pub fn try_get_column(&self, field: &str, table_name: &str) -> Result<Vec<String>, DatabaseError> {
        let sql = schema::select_column_sql(field, table_name)?;
        let conn = self.connect()?;

        debug!("Getting column '{}' from table '{}'", field, table_name);
        let mut stmt = conn.prepare(&sql)?;
        let values = stmt
            .query_map([], |row| row.get_ref(0).map(value_to_string))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(values)
    }

    pub fn get_column(&self, field: &str, table_name: &str) -> Vec<String> {
        self.try_get_column(field, table_name).unwrap_or_else(|e| {
            log_failure(&format!("get column '{}' of '{}'", field, table_name), &e);
            Vec::new()
        })
    }

    pub fn try_get_row_count(&self, table_name: &str) -> Result<i64, DatabaseError> {
        let sql = schema::count_rows_sql(table_name)?;
        let conn = self.connect()?;

        let count = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Number of rows in `table_name`, or `ROW_COUNT_UNAVAILABLE`
    pub fn get_row_count(&self, table_name: &str) -> i64 {
        self.try_get_row_count(table_name).unwrap_or_else(|e| {
            log_failure(&format!("count rows of '{}'", table_name), &e);
            ROW_COUNT_UNAVAILABLE
        })
    }
}

fn log_failure(operation: &str, err: &DatabaseError) {
    match err.code() {
        Some(code) => error!("Failed to {} (code {}): {}", operation, code, err),
        None => error!("Failed to {}: {}", operation, err),
    }
}
