use actix_web::{web, HttpResponse, Responder};

use crate::api::watch::MessageResponse;

/// Simulated stream: acknowledges the movie id, transfers nothing.
#[utoipa::path(
    get,
    path = "/stream/{movie_id}",
    tag = "Watching",
    params(("movie_id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Stream acknowledged", body = MessageResponse)
    )
)]
pub async fn stream_movie(movie_id: web::Path<String>) -> impl Responder {
    log::info!("📺 GET /stream/{}", movie_id);

    HttpResponse::Ok().json(MessageResponse::new(format!("Streaming movie: {}", movie_id)))
}
