use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rivas Service API",
        version = "1.0.0",
        description = "User signup/login/profile backed by the identity service (or the key-value store), plus watchlist, watch progress, ratings and a simulated stream.\n\n**Errors:** every failure returns `{error, details}`."
    ),
    paths(
        // Users
        crate::api::users::signup,
        crate::api::users::login,
        crate::api::users::profile,

        // Watching
        crate::api::watch::add_to_watchlist,
        crate::api::watch::update_watch_progress,
        crate::api::watch::rate_movie,
        crate::api::stream::stream_movie,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::UserRecord,
            crate::models::WatchlistEntry,
            crate::models::ProgressEntry,
            crate::models::RatingEntry,
            crate::api::users::SignupRequest,
            crate::api::users::LoginRequest,
            crate::api::users::SignupResponse,
            crate::api::users::UserResponse,
            crate::api::users::IdentitySyncStatus,
            crate::api::watch::MessageResponse,
            crate::api::health::HealthResponse,
            crate::utils::error::ErrorResponse,
        )
    ),
    tags(
        (name = "Users", description = "Signup, login and profile. Uniqueness is checked against the identity service before any write."),
        (name = "Watching", description = "Watchlist, watch progress, ratings and the simulated stream."),
        (name = "Health", description = "Health check and request counters."),
    )
)]
pub struct ApiDoc;
