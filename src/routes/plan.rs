use actix_web::{web, HttpResponse, Responder};

use crate::models::plan::{PlanRequest, PlanResponse, TransportMode};
use crate::services::budget_service::BudgetFitter;
use crate::services::location_service::{self, LocationService};
use crate::services::narrative_service::NarrativeService;

/*
    /plan

    Validates the request, resolves both endpoints, runs the budget-fitting
    pipeline and decorates the result with narrative text. Apart from input
    validation this endpoint never fails: every lookup in the pipeline has a
    deterministic fallback.
*/
pub async fn create_plan(
    input: web::Json<PlanRequest>,
    locations: web::Data<LocationService>,
    narratives: web::Data<NarrativeService>,
) -> impl Responder {
    let request = input.into_inner();

    if request.end_date < request.start_date {
        return HttpResponse::BadRequest().body("end_date cannot be earlier than start_date");
    }
    if request.travelers < 1 {
        return HttpResponse::BadRequest().body("travelers must be at least 1");
    }
    if request.budget_ceiling < 0.0 {
        return HttpResponse::BadRequest().body("budget_ceiling cannot be negative");
    }

    let origin = locations.resolve(&request.origin).await;
    let destination = locations.resolve(&request.destination).await;

    let outcome = BudgetFitter::new().fit(&request, &origin, &destination);
    let total = outcome.result.total;
    let risk = location_service::climate_risk(&request.destination);

    let total_flight_time = if outcome
        .result
        .legs
        .iter()
        .any(|leg| leg.mode == TransportMode::Flight)
    {
        let hours: f64 = outcome.result.legs.iter().map(|leg| leg.duration_hours).sum();
        Some(format!("{:.1} h", hours))
    } else {
        None
    };

    let savings_vs_ceiling = if request.budget_ceiling > 0.0 {
        Some(((request.budget_ceiling - total) * 100.0).round() / 100.0)
    } else {
        None
    };

    let period_sentence = outcome
        .adjusted_period
        .as_ref()
        .map(|period| {
            format!(
                " Adjusted period: {} to {}.",
                period.start_date, period.end_date
            )
        })
        .unwrap_or_default();

    let themes_text = request.themes.join(", ");
    let general_prompt = format!(
        "You are a travel assistant. Write a general note for a trip plan from {} to {}, \
         from {} to {}, for {} travelers with the {} profile. Interests: {}. \
         The estimated total budget is {:.2} {}.{} Mention the climate risk ({}). \
         Be inspiring, practical and personal.",
        request.origin,
        destination.label,
        request.start_date,
        request.end_date,
        request.travelers,
        request.profile,
        themes_text,
        total,
        request.currency,
        period_sentence,
        risk,
    );
    let mut general_notes = narratives.generate(&general_prompt, 220, 0.8).await;
    if general_notes.is_empty() {
        general_notes = format!(
            "Smart plan with automatic budget adaptation. Requested period: {} to {}.{} Currency: {}.",
            request.start_date, request.end_date, period_sentence, request.currency,
        );
    }

    let mut itinerary = outcome.result.itinerary;
    for day in itinerary.iter_mut() {
        let day_prompt = format!(
            "Write a short narrative for {} in {}. Activities: morning - {}; \
             afternoon - {}; evening - {}. Estimated day cost: {:.2} {}. \
             Overall climate risk: {}. Focus on {}.",
            day.date,
            destination.label,
            day.morning,
            day.afternoon,
            day.evening,
            day.estimated_cost,
            request.currency,
            risk,
            themes_text,
        );
        day.narrative = narratives.generate(&day_prompt, 150, 0.9).await;
    }

    let response = PlanResponse {
        total_estimated_cost: total,
        legs: outcome.result.legs,
        cost_items: outcome.result.cost_items,
        itinerary,
        general_notes,
        total_flight_time,
        savings_vs_ceiling,
        climate_risk: risk.to_string(),
        adjustments_applied: if outcome.adjustments.is_empty() {
            None
        } else {
            Some(outcome.adjustments)
        },
        adjusted_period: outcome.adjusted_period,
        budget_ceiling_applied: if request.budget_ceiling > 0.0 {
            Some(request.budget_ceiling)
        } else {
            None
        },
        suggestions: outcome.suggestions,
    };

    HttpResponse::Ok().json(response)
}
