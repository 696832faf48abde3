// Route exports
pub mod auth;
pub mod dogs;
pub mod users;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::errors::{handle_json_payload_error, handle_path_error};
use crate::models::HealthResponse;
use crate::services::{AuthService, Store};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: Arc<AuthService>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .configure(users::configure)
                .configure(dogs::configure),
        );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
