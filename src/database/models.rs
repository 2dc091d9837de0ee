/*!
 * Row model for the status table.
 *
 * `StatusRecord` is the flattened, sanitized form of a `Status` exactly as it
 * is bound to the insert statement.
 */

use rusqlite::types::ValueRef;
use serde::{Deserialize, Serialize};

use crate::status::Status;
use crate::text_utils::{geolocation_to_string, hashtags_to_string, sanitize_ascii, tweet_to_words};

/// Date layout of the `createdAt` column
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d";

/// One row of the status table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub id: i64,
    /// Calendar date of the status (UTC)
    pub created_at: String,
    pub user_screen_name: String,
    /// ASCII-only status text; the original text for retweets
    pub text: String,
    /// Word tokens of `text`
    pub edited_text: String,
    pub place: Option<String>,
    pub user_place: Option<String>,
    pub source: String,
    pub geolocation: Option<String>,
    pub lang: Option<String>,
    pub favorite_count: i32,
    pub retweet_count: i32,
    pub hashtags: String,
}

impl StatusRecord {
    pub fn from_status(status: &Status) -> Self {
        let text = sanitize_ascii(status.tweet_text());
        let edited_text = tweet_to_words(&text);

        Self {
            id: status.id,
            created_at: status.created_at.format(CREATED_AT_FORMAT).to_string(),
            user_screen_name: status.user.screen_name.clone(),
            text,
            edited_text,
            place: status.place.as_ref().map(|place| sanitize_ascii(&place.name)),
            user_place: status.user.location.as_deref().map(sanitize_ascii),
            source: sanitize_ascii(&status.source),
            geolocation: geolocation_to_string(status.geo_location()),
            lang: status.lang.clone(),
            favorite_count: status.favorite_count,
            retweet_count: status.retweet_count,
            hashtags: sanitize_ascii(&hashtags_to_string(status.hashtags())),
        }
    }
}

impl From<&Status> for StatusRecord {
    fn from(status: &Status) -> Self {
        Self::from_status(status)
    }
}

/// Render a column value the way `get_column` reports it
pub fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}
