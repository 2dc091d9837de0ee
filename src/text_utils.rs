use once_cell::sync::Lazy;
use regex::Regex;

use crate::status::{GeoLocation, Hashtag};

// @module: Text normalization for archived statuses

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)\S+").expect("valid URL pattern"));

static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@\w+").expect("valid mention pattern"));

static ENTITY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(?:#\d+|[a-z]+);").expect("valid entity pattern"));

static RETWEET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*rt\b:?").expect("valid retweet pattern"));

static WORD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9]+(?:'[a-z0-9]+)*").expect("valid word pattern"));

// @returns: Text with every non-ASCII character replaced by a single space
pub fn sanitize_ascii(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() { c } else { ' ' })
        .collect()
}

/// Reduce tweet text to a space separated string of lowercase word tokens.
///
/// URLs, mentions, HTML entities and a leading `RT` marker are removed.
/// Hashtags keep their word without the `#`.
pub fn tweet_to_words(text: &str) -> String {
    let lowered = text.to_lowercase();
    let without_urls = URL_PATTERN.replace_all(&lowered, " ");
    let without_mentions = MENTION_PATTERN.replace_all(&without_urls, " ");
    let without_entities = ENTITY_PATTERN.replace_all(&without_mentions, " ");
    let without_rt = RETWEET_PREFIX.replace(&without_entities, " ");

    WORD_PATTERN
        .find_iter(&without_rt)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

// @returns: "lat,lon" when a location is present
pub fn geolocation_to_string(location: Option<GeoLocation>) -> Option<String> {
    location.map(|geo| format!("{},{}", geo.latitude, geo.longitude))
}

// @returns: Hashtag texts joined by single spaces, empty when there are none
pub fn hashtags_to_string(hashtags: &[Hashtag]) -> String {
    hashtags
        .iter()
        .map(|tag| tag.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
