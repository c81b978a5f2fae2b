use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::env;

use crate::services::session_service::SessionStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    environment: String,
    version: String,
    sessions: usize,
}

pub async fn health_check(store: web::Data<SessionStore>) -> impl Responder {
    let health = HealthStatus {
        status: "ok".to_string(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        sessions: store.len(),
    };

    HttpResponse::Ok().json(health)
}
