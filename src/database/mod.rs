use crate::models::{PROGRESS_COLLECTION, RATINGS_COLLECTION, WATCHLIST_COLLECTION};
use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("rivas-service".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Fails fast when the server is unreachable
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes backing the per-user lookups.
    ///
    /// `progress(userId, movieId)` is unique: the upsert already keeps one row
    /// per pair, the index just lets the server enforce it.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let progress = self.collection::<mongodb::bson::Document>(PROGRESS_COLLECTION);
        let progress_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "movieId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match progress.create_index(progress_index).await {
            Ok(_) => log::info!("   ✅ Index created: progress(userId, movieId) unique"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        for name in [WATCHLIST_COLLECTION, RATINGS_COLLECTION] {
            let collection = self.collection::<mongodb::bson::Document>(name);
            let index = IndexModel::builder()
                .keys(doc! { "userId": 1 })
                .build();

            match collection.create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(userId)", name),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
