//! Search result records returned by the hosted search API

use serde::{Deserialize, Deserializer, Serialize};

/// Base URL for YouTube deep links
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch";

/// One ranked transcript chunk
///
/// Order within a result set is defined by the backend and never changed here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    #[serde(default)]
    pub score: f64,
    pub metadata: TranscriptChunk,
}

/// Metadata stored alongside each transcript embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptChunk {
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "seconds")]
    pub start: f64,
    #[serde(default, deserialize_with = "seconds")]
    pub end: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl SearchResult {
    /// YouTube link that starts playback at the chunk
    pub fn watch_url(&self) -> String {
        format!(
            "{}?v={}&t={}s",
            YOUTUBE_WATCH_URL,
            self.metadata.video_id,
            self.metadata.start.max(0.0).floor() as u64
        )
    }

    /// Human readable start time, `m:ss` or `h:mm:ss`
    pub fn timestamp(&self) -> String {
        format_timestamp(self.metadata.start)
    }
}

pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{}:{:02}", m, s)
    }
}

/// Vector metadata sometimes stores offsets as strings or `null`
fn seconds<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        None => Ok(0.0),
    }
}
