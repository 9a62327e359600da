// ==================== APP DATA (WATCHLIST / PROGRESS / RATINGS) ====================
// Document-store writes keyed by caller-supplied userId. No validation of
// movieId or rating range, no check that the user exists.

use crate::{
    database::MongoDB,
    models::{
        ProgressEntry, RatingEntry, WatchlistEntry, PROGRESS_COLLECTION, RATINGS_COLLECTION,
        WATCHLIST_COLLECTION,
    },
};
use async_trait::async_trait;
use mongodb::bson::{doc, to_bson, Document};

#[async_trait]
pub trait AppDataStore: Send + Sync {
    /// Append-only; duplicates are kept.
    async fn add_to_watchlist(&self, entry: &WatchlistEntry) -> Result<(), String>;

    /// Upsert keyed by (userId, movieId).
    async fn update_progress(&self, entry: &ProgressEntry) -> Result<(), String>;

    /// Append-only; duplicates are kept.
    async fn rate_movie(&self, entry: &RatingEntry) -> Result<(), String>;
}

#[derive(Clone)]
pub struct MongoAppDataStore {
    db: MongoDB,
}

impl MongoAppDataStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AppDataStore for MongoAppDataStore {
    async fn add_to_watchlist(&self, entry: &WatchlistEntry) -> Result<(), String> {
        self.db
            .collection::<WatchlistEntry>(WATCHLIST_COLLECTION)
            .insert_one(entry)
            .await
            .map_err(|e| format!("Database error: {}", e))?;

        Ok(())
    }

    async fn update_progress(&self, entry: &ProgressEntry) -> Result<(), String> {
        let movie_id = to_bson(&entry.movie_id).map_err(|e| format!("Invalid movieId: {}", e))?;
        let progress = to_bson(&entry.progress).map_err(|e| format!("Invalid progress: {}", e))?;

        let filter = doc! {
            "userId": &entry.user_id,
            "movieId": movie_id,
        };
        let update = doc! {
            "$set": { "progress": progress },
        };

        self.db
            .collection::<Document>(PROGRESS_COLLECTION)
            .update_one(filter, update)
            .upsert(true)
            .await
            .map_err(|e| format!("Database error: {}", e))?;

        Ok(())
    }

    async fn rate_movie(&self, entry: &RatingEntry) -> Result<(), String> {
        self.db
            .collection::<RatingEntry>(RATINGS_COLLECTION)
            .insert_one(entry)
            .await
            .map_err(|e| format!("Database error: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn connect() -> MongoAppDataStore {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let db = MongoDB::new(&uri, "rivas_test").await.unwrap();
        MongoAppDataStore::new(db)
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_progress_upsert_keeps_one_row() {
        let store = connect().await;
        let user_id = format!("u-{}", chrono::Utc::now().timestamp_millis());

        for progress in [50, 80] {
            store
                .update_progress(&ProgressEntry {
                    user_id: user_id.clone(),
                    movie_id: "m1".into(),
                    progress: progress.into(),
                })
                .await
                .unwrap();
        }

        let rows = store.db.collection::<ProgressEntry>(PROGRESS_COLLECTION);
        let filter = doc! { "userId": &user_id, "movieId": "m1" };
        assert_eq!(rows.count_documents(filter.clone()).await.unwrap(), 1);

        let row = rows.find_one(filter).await.unwrap().unwrap();
        assert_eq!(row.progress.as_f64(), Some(80.0));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_watchlist_is_append_only() {
        let store = connect().await;
        let entry = WatchlistEntry {
            user_id: format!("u-{}", chrono::Utc::now().timestamp_millis()),
            movie_id: "m1".into(),
        };

        store.add_to_watchlist(&entry).await.unwrap();
        store.add_to_watchlist(&entry).await.unwrap();

        let rows = store.db.collection::<WatchlistEntry>(WATCHLIST_COLLECTION);
        let count = rows
            .count_documents(doc! { "userId": &entry.user_id })
            .await
            .unwrap();
        assert_eq!(count, 2);
    }
}
