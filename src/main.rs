mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod testing;

use actix_cors::Cors;
use actix_web::{middleware::{Compress, Logger}, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::AppState,
    config::{Config, UserStoreKind},
    services::{
        app_data_service::{AppDataStore, MongoAppDataStore},
        identity_service::{HttpIdentityClient, IdentityApi},
        kv_store::RedisKeyValueStore,
        user_store::{IdentityUserStore, KvUserStore, UserStore},
    },
};

/// Connects every store the configured variant needs. Any failure aborts startup.
async fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let db = database::MongoDB::new(&config.mongodb_uri, &config.mongodb_database).await?;
    log::info!("✅ MongoDB connected successfully");

    let app_data: Arc<dyn AppDataStore> = Arc::new(MongoAppDataStore::new(db));

    let identity: Arc<dyn IdentityApi> = Arc::new(HttpIdentityClient::new(
        &config.identity_api_url,
        &config.app_name,
        config.identity_timeout,
    )?);

    let users: Arc<dyn UserStore> = match config.user_store {
        UserStoreKind::Identity => Arc::new(IdentityUserStore::new(identity, &config.app_name)),
        UserStoreKind::KeyValue => {
            let kv = RedisKeyValueStore::connect(&config.kv_hosts, &config.kv_namespace).await?;
            Arc::new(KvUserStore::new(identity, Arc::new(kv), &config.app_name))
        }
    };

    Ok(AppState::new(users, app_data))
}

fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::ACCEPT,
        ])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Rivas Service...");
    log::info!("📊 Database: {} / {}", config.mongodb_uri, config.mongodb_database);
    log::info!("🪪 Identity API: {}", config.identity_api_url);
    log::info!("👥 User store: {}", config.user_store.as_str());

    let state = match build_state(&config).await {
        Ok(state) => web::Data::new(state),
        Err(e) => {
            log::error!("❌ Failed to connect to backing stores: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    let origins = config.cors_allowed_origins.clone();
    let openapi = api::swagger::ApiDoc::openapi();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(&origins))
            .wrap(Compress::default())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone())
            )
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
