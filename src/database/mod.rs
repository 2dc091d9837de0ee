/*!
 * Database module for archiving statuses.
 *
 * This module provides SQLite-based persistence for:
 * - Status tables with a fixed 13-column schema keyed by status id
 * - Table lifecycle (list, create, drop)
 * - Deduplicated inserts, column reads and row counts
 */

pub mod schema;
pub mod connection;
pub mod repository;
pub mod models;

// Re-export main types
pub use connection::{Connector, Credentials, Driver};
pub use models::StatusRecord;
pub use repository::{SqlDatabase, ROW_COUNT_UNAVAILABLE};
