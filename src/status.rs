/*!
 * Status (tweet) input model.
 *
 * Statuses arrive as Twitter v1.1 style JSON. Only the fields that end up in
 * the archive table are modelled; everything else in the payload is ignored.
 */

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::errors::StatusError;

/// Timestamp layout used by the Twitter REST and streaming APIs
const TWITTER_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// One externally sourced post to be archived
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Status {
    /// Unique status id
    pub id: i64,

    /// Creation time of the status
    #[serde(deserialize_with = "deserialize_created_at")]
    pub created_at: DateTime<Utc>,

    /// Status text (possibly truncated by the API)
    #[serde(default)]
    pub text: String,

    /// Untruncated text for extended statuses
    #[serde(default)]
    pub full_text: Option<String>,

    /// Author of the status
    pub user: User,

    /// Original status when this one is a retweet
    #[serde(default)]
    pub retweeted_status: Option<Box<Status>>,

    /// Place the status was tagged with
    #[serde(default)]
    pub place: Option<Place>,

    /// Client the status was posted from (usually an HTML anchor)
    #[serde(default)]
    pub source: String,

    /// GeoJSON point, `[longitude, latitude]`
    #[serde(default)]
    pub coordinates: Option<Coordinates>,

    /// Detected language code
    #[serde(default)]
    pub lang: Option<String>,

    #[serde(default)]
    pub favorite_count: i32,

    #[serde(default)]
    pub retweet_count: i32,

    #[serde(default)]
    pub entities: Entities,
}

/// Author fields kept in the archive
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct User {
    pub screen_name: String,

    /// Free-form profile location
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Place {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Hashtag {
    pub text: String,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Status {
    pub fn is_retweet(&self) -> bool {
        self.retweeted_status.is_some()
    }

    /// Text of the status; for retweets, the text of the original status
    pub fn tweet_text(&self) -> &str {
        match &self.retweeted_status {
            Some(original) => original.tweet_text(),
            None => self.full_text.as_deref().unwrap_or(&self.text),
        }
    }

    pub fn geo_location(&self) -> Option<GeoLocation> {
        self.coordinates.map(|point| GeoLocation {
            latitude: point.coordinates[1],
            longitude: point.coordinates[0],
        })
    }

    pub fn hashtags(&self) -> &[Hashtag] {
        &self.entities.hashtags
    }
}

fn deserialize_created_at<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_created_at(&raw).map_err(serde::de::Error::custom)
}

/// Parse a status timestamp in either Twitter or RFC 3339 form
pub fn parse_created_at(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, TWITTER_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid created_at '{}': {}", raw, e))
}

/// Parse statuses from a JSON array, a single JSON object, or JSON lines
pub fn parse_statuses(content: &str) -> Result<Vec<Status>, StatusError> {
    let trimmed = content.trim_start();

    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|source| StatusError::Parse { line: 1, source });
    }

    // A single pretty-printed object spans several lines
    if let Ok(status) = serde_json::from_str::<Status>(trimmed) {
        return Ok(vec![status]);
    }

    let mut statuses = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let status = serde_json::from_str(line)
            .map_err(|source| StatusError::Parse { line: index + 1, source })?;
        statuses.push(status);
    }

    Ok(statuses)
}

/// Load statuses from a file, or from every `.json`/`.jsonl` file under a directory
pub fn load_statuses<P: AsRef<Path>>(path: P) -> Result<Vec<Status>, StatusError> {
    let path = path.as_ref();

    if path.is_file() {
        let content = fs::read_to_string(path)?;
        return parse_statuses(&content);
    }

    let mut files: Vec<_> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|p| p.is_file() && is_status_file(p))
        .collect();
    files.sort();

    if files.is_empty() && !path.exists() {
        return Err(StatusError::File(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input path does not exist: {}", path.display()),
        )));
    }

    let mut statuses = Vec::new();
    for file in files {
        debug!("Reading statuses from {:?}", file);
        let content = fs::read_to_string(&file)?;
        statuses.extend(parse_statuses(&content)?);
    }

    Ok(statuses)
}

fn is_status_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("jsonl")
        })
        .unwrap_or(false)
}
