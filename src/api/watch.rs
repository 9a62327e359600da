use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::{
    api::AppState,
    models::{ProgressEntry, RatingEntry, WatchlistEntry},
    utils::error::AppError,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[utoipa::path(
    post,
    path = "/add-to-watchlist",
    tag = "Watching",
    request_body = WatchlistEntry,
    responses(
        (status = 200, description = "Added", body = MessageResponse),
        (status = 500, description = "Store failure", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn add_to_watchlist(
    state: web::Data<AppState>,
    request: web::Json<WatchlistEntry>,
) -> Result<HttpResponse, AppError> {
    log::info!("🎬 POST /add-to-watchlist - user: {}, movie: {}", request.user_id, request.movie_id);

    state.app_data.add_to_watchlist(&request).await.map_err(|e| {
        log::error!("❌ Watchlist insert failed: {}", e);
        AppError::internal("Failed to add to watchlist", e)
    })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Added to watchlist.")))
}

#[utoipa::path(
    post,
    path = "/update-watch-progress",
    tag = "Watching",
    request_body = ProgressEntry,
    responses(
        (status = 200, description = "Progress stored", body = MessageResponse),
        (status = 500, description = "Store failure", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn update_watch_progress(
    state: web::Data<AppState>,
    request: web::Json<ProgressEntry>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "⏱️  POST /update-watch-progress - user: {}, movie: {}, progress: {}",
        request.user_id,
        request.movie_id,
        request.progress
    );

    state.app_data.update_progress(&request).await.map_err(|e| {
        log::error!("❌ Progress upsert failed: {}", e);
        AppError::internal("Failed to update progress", e)
    })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Progress updated.")))
}

#[utoipa::path(
    post,
    path = "/rate-movie",
    tag = "Watching",
    request_body = RatingEntry,
    responses(
        (status = 200, description = "Rating stored", body = MessageResponse),
        (status = 500, description = "Store failure", body = crate::utils::error::ErrorResponse)
    )
)]
pub async fn rate_movie(
    state: web::Data<AppState>,
    request: web::Json<RatingEntry>,
) -> Result<HttpResponse, AppError> {
    log::info!("⭐ POST /rate-movie - user: {}, movie: {}, rating: {}", request.user_id, request.movie_id, request.rating);

    state.app_data.rate_movie(&request).await.map_err(|e| {
        log::error!("❌ Rating insert failed: {}", e);
        AppError::internal("Failed to record rating", e)
    })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Rating recorded.")))
}
