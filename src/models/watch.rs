use serde::{Deserialize, Serialize};
use serde_json::Value;

// Collection names in the document store
pub const WATCHLIST_COLLECTION: &str = "watchlist";
pub const PROGRESS_COLLECTION: &str = "progress";
pub const RATINGS_COLLECTION: &str = "ratings";

// movieId, progress and rating are stored exactly as sent: any JSON value,
// null when absent.

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub user_id: String,
    #[serde(default)]
    pub movie_id: Value,
}

/// At most one row per (userId, movieId); last write wins.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEntry {
    pub user_id: String,
    #[serde(default)]
    pub movie_id: Value,
    #[serde(default)]
    pub progress: Value,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingEntry {
    pub user_id: String,
    #[serde(default)]
    pub movie_id: Value,
    #[serde(default)]
    pub rating: Value,
}
