use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use iviagem_api::routes;
use iviagem_api::services::location_service::LocationService;
use iviagem_api::services::narrative_service::NarrativeService;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let locations = web::Data::new(LocationService::new());
    let narratives = web::Data::new(NarrativeService::new());

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(locations.clone())
            .app_data(narratives.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .route("/info", web::get().to(routes::health::info))
            .route("/plan", web::post().to(routes::plan::create_plan))
            .route("/geocode", web::get().to(routes::geocode::geocode))
    })
    .bind((host, port))?
    .run()
    .await
}
