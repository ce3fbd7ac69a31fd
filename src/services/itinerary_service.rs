//! Assembles one complete plan for a date range under one configuration.

use chrono::NaiveDate;
use rand::Rng;

use crate::models::plan::{CostItem, DayPlan, Leg, PlanRequest};
use crate::services::cost_service::{CostService, PlanConfig};
use crate::services::distance_service::haversine_km;
use crate::services::location_service::ResolvedPlace;
use crate::services::poi_catalog;

/// Output of one builder invocation: the full unadjusted plan and its total.
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub total: f64,
    pub legs: Vec<Leg>,
    pub cost_items: Vec<CostItem>,
    pub itinerary: Vec<DayPlan>,
}

pub struct ItineraryService;

impl ItineraryService {
    /// Build the plan for `[start, end]`: outbound leg, return leg for
    /// multi-day stays, and one priced day plan per calendar date. Apart
    /// from the injected random source the result is a pure function of its
    /// inputs.
    pub fn build_plan(
        request: &PlanRequest,
        origin: &ResolvedPlace,
        destination: &ResolvedPlace,
        start: NaiveDate,
        end: NaiveDate,
        config: &PlanConfig,
        rng: &mut impl Rng,
    ) -> PlanResult {
        let mut total = 0.0;
        let mut legs: Vec<Leg> = Vec::new();
        let mut cost_items: Vec<CostItem> = Vec::new();
        let mut itinerary: Vec<DayPlan> = Vec::new();

        let distance_km =
            haversine_km((origin.lat, origin.lon), (destination.lat, destination.lon));
        let mode = CostService::transport_mode(distance_km, config.force_transport);

        let (outbound, outbound_item) = CostService::build_leg(
            mode,
            &origin.label,
            &destination.label,
            distance_km,
            request.travelers,
            "outbound",
        );
        total += outbound.estimated_price;
        legs.push(outbound);
        cost_items.push(outbound_item);

        if start != end {
            let (return_leg, return_item) = CostService::build_leg(
                mode,
                &destination.label,
                &origin.label,
                distance_km,
                request.travelers,
                "return",
            );
            total += return_leg.estimated_price;
            legs.push(return_leg);
            cost_items.push(return_item);
        }

        let num_days = (end - start).num_days() + 1;
        let pois = poi_catalog::pois_for_destination(&request.destination);

        for date in start.iter_days() {
            if date > end {
                break;
            }
            let (day, items) = CostService::price_day(date, num_days, request, config, pois, rng);
            total += day.estimated_cost;
            cost_items.extend(items);
            itinerary.push(day);
        }

        PlanResult {
            total,
            legs,
            cost_items,
            itinerary,
        }
    }
}
