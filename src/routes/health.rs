use actix_web::{HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    version: String,
    ts: String,
}

#[derive(Serialize)]
struct ApiInfo {
    name: &'static str,
    version: String,
    endpoints: Vec<&'static str>,
}

/*
    /health
*/
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ts: chrono::Utc::now().to_rfc3339(),
    })
}

/*
    /info
*/
pub async fn info() -> impl Responder {
    HttpResponse::Ok().json(ApiInfo {
        name: "IViagem Planner (smart + budget + geocode + gemini)",
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: vec!["/health", "/info", "/plan", "/geocode"],
    })
}
