// src/models/recommendation.rs
// DOCUMENTATION: Core data structures for recommendations
// PURPOSE: Serialization/deserialization models for API and database

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Score above which a recommendation counts as popular for the random pick
pub const POPULAR_SCORE: i32 = 10;

/// Lowest score a recommendation can keep; one vote below removes it
pub const MIN_SCORE: i32 = -5;

/// Accepted link format: a YouTube URL with a non-empty path
pub static YOUTUBE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://(www\.)?youtube\.com/.+$").expect("youtube link pattern is valid")
});

/// A recommendation record
/// DOCUMENTATION: Maps directly to the recommendations table in PostgreSQL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Store-generated identifier
    pub id: i32,

    /// Song name, unique across all records
    pub name: String,

    /// YouTube link for the song
    pub youtube_link: String,

    /// Vote balance, starts at 0
    pub score: i32,
}

/// Request DTO for creating a recommendation
/// DOCUMENTATION: Body of POST /recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecommendationRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(regex(path = "YOUTUBE_LINK", message = "must be a youtube.com link"))]
    pub youtube_link: String,
}

/// Score band used by the random pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreFilter {
    /// score > POPULAR_SCORE
    Gt,
    /// score <= POPULAR_SCORE
    Lte,
}

impl ScoreFilter {
    pub fn matches(self, score: i32) -> bool {
        match self {
            ScoreFilter::Gt => score > POPULAR_SCORE,
            ScoreFilter::Lte => score <= POPULAR_SCORE,
        }
    }
}

/// Result of an upvote or downvote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub id: i32,
    pub score: i32,
    /// True when the downvote pushed the score below the minimum
    pub removed: bool,
}

/// Counts reported by GET /admin/stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_recommendations: i64,
}

/// Reported by POST /admin/reset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub deleted: u64,
}
