use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::api::AppState;

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: i64,
    #[serde(rename = "userStore")]
    pub user_store: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "rivas-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        user_store: state.users.kind().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::user_store::KvUserStore,
        testing::{FakeIdentity, InMemoryAppData, InMemoryKv},
    };
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_user_store() {
        let users = Arc::new(KvUserStore::new(
            Arc::new(FakeIdentity::default()),
            Arc::new(InMemoryKv::default()),
            "rivas",
        ));
        let state = web::Data::new(AppState::new(users, Arc::new(InMemoryAppData::default())));
        let app = test::init_service(App::new().app_data(state).configure(crate::api::configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.user_store, "kv");
    }
}
