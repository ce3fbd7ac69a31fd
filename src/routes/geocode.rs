use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::services::location_service::LocationService;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    q: String,
}

/*
    /geocode?q=<place name>

    Diagnostic endpoint: shows whether a query resolves online or through
    the static fallback chain.
*/
pub async fn geocode(
    data: web::Data<LocationService>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    match data.geocode_online(&params.q).await {
        Some(place) => HttpResponse::Ok().json(json!({
            "online": { "lat": place.lat, "lon": place.lon, "label": place.label }
        })),
        None => {
            let fallback = LocationService::resolve_static(&params.q);
            HttpResponse::Ok().json(json!({
                "online": null,
                "fallback": { "lat": fallback.lat, "lon": fallback.lon, "label": fallback.label }
            }))
        }
    }
}
