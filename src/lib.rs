/*!
 * # tweetstore - archive social-media statuses in a relational table
 *
 * ## Features
 *
 * - Fixed 13-column status table keyed by status id
 * - Idempotent inserts: statuses already stored are skipped
 * - ASCII sanitizing and word-token cleaning of status text
 * - Table listing, creation and removal, column reads and row counts
 * - Lenient operations that log failures and return empty results
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: The `SqlDatabase` handle and its schema:
 *   - `database::connection`: Connection descriptors and drivers
 *   - `database::schema`: Table definition and SQL builders
 *   - `database::models`: Row model for stored statuses
 *   - `database::repository`: Table and row operations
 * - `status`: Status input model and JSON loading
 * - `text_utils`: Text sanitizing and conversion helpers
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod database;
pub mod status;
pub mod text_utils;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use database::{Connector, Credentials, SqlDatabase, StatusRecord, ROW_COUNT_UNAVAILABLE};
pub use status::{load_statuses, parse_statuses, Status};
pub use errors::{DatabaseError, StatusError};
