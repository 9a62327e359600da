pub mod health;
pub mod metrics;
pub mod stream;
pub mod swagger;
pub mod users;
pub mod watch;

use crate::{
    services::{app_data_service::AppDataStore, user_store::UserStore},
    utils::error::AppError,
};
use actix_web::web;
use std::sync::Arc;

/// Store handles shared by every handler, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub app_data: Arc<dyn AppDataStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, app_data: Arc<dyn AppDataStore>) -> Self {
        Self { users, app_data }
    }
}

/// Malformed JSON bodies get the same `{error, details}` shape as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("⚠️  Rejected request body: {}", err);
        AppError::InvalidRequest(err.to_string()).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Health check
        .route("/health", web::get().to(health::health_check))
        // Metrics
        .route("/metrics", web::get().to(metrics::get_metrics))
        // Users
        .route("/signup", web::post().to(users::signup))
        .route("/login", web::post().to(users::login))
        .route("/profile", web::post().to(users::profile))
        // App data
        .route("/add-to-watchlist", web::post().to(watch::add_to_watchlist))
        .route("/update-watch-progress", web::post().to(watch::update_watch_progress))
        .route("/rate-movie", web::post().to(watch::rate_movie))
        // Simulated stream
        .route("/stream/{movie_id}", web::get().to(stream::stream_movie));
}
