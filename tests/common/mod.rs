use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};

use iviagem_api::routes;
use iviagem_api::services::location_service::LocationService;
use iviagem_api::services::narrative_service::NarrativeService;

pub struct TestApp;

impl TestApp {
    /// Application wired like production but with online geocoding and
    /// narrative generation disabled, so tests never touch the network.
    pub fn create_app() -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(LocationService::offline()))
            .app_data(web::Data::new(NarrativeService::disabled()))
            .route("/health", web::get().to(routes::health::health_check))
            .route("/info", web::get().to(routes::health::info))
            .route("/plan", web::post().to(routes::plan::create_plan))
            .route("/geocode", web::get().to(routes::geocode::geocode))
    }
}
