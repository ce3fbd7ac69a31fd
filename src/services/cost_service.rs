//! Cost model for legs and single days
//!
//! Given one plan configuration this module prices a transport leg and one
//! calendar day (lodging share, meals, slot activities). Every priced
//! component is emitted as a `CostItem` so the plan total stays additive
//! over the itemized costs.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;

use crate::models::plan::{
    CostCategory, CostItem, DayPlan, Leg, PlanRequest, TransportMode, TravelProfile,
};
use crate::models::poi::{Poi, TimeSlot};
use crate::services::poi_catalog;

pub const FLIGHT_PRICE_PER_KM: f64 = 0.35;
pub const GROUND_PRICE_PER_KM: f64 = 0.15;
pub const FLIGHT_SPEED_KMH: f64 = 700.0;
pub const GROUND_SPEED_KMH: f64 = 80.0;
pub const FLIGHT_DISTANCE_THRESHOLD_KM: f64 = 500.0;
pub const MEAL_BASE_RATE: f64 = 120.0;

/// Slot label used when no catalog entry qualifies
pub const FREE_ACTIVITY: &str = "Free activity";

/// One candidate configuration for the planning pipeline. Values are
/// immutable; each budget-fitting step derives a fresh configuration instead
/// of mutating a shared one.
#[derive(Debug, Clone)]
pub struct PlanConfig {
    pub profile: TravelProfile,
    pub force_transport: Option<TransportMode>,
    pub meals_factor: f64,
    pub activity_price_cap: Option<f64>,
    pub budget_mode: bool,
    pub allow_day_trips: bool,
}

impl PlanConfig {
    pub fn baseline(profile: TravelProfile) -> Self {
        Self {
            profile,
            force_transport: None,
            meals_factor: 1.0,
            activity_price_cap: None,
            budget_mode: false,
            allow_day_trips: true,
        }
    }

    pub fn with_transport(&self, mode: TransportMode) -> Self {
        Self {
            force_transport: Some(mode),
            ..self.clone()
        }
    }

    pub fn with_profile(&self, profile: TravelProfile) -> Self {
        Self {
            profile,
            ..self.clone()
        }
    }

    pub fn with_activity_cap(&self, cap: f64) -> Self {
        Self {
            budget_mode: true,
            activity_price_cap: Some(cap),
            ..self.clone()
        }
    }

    pub fn without_day_trips(&self) -> Self {
        Self {
            allow_day_trips: false,
            ..self.clone()
        }
    }

    pub fn with_meals_factor(&self, factor: f64) -> Self {
        Self {
            meals_factor: factor,
            ..self.clone()
        }
    }
}

pub struct CostService;

impl CostService {
    /// Transport mode for a leg: the configured override wins, otherwise fly
    /// above the distance threshold and go by ground below it.
    pub fn transport_mode(distance_km: f64, forced: Option<TransportMode>) -> TransportMode {
        forced.unwrap_or(if distance_km > FLIGHT_DISTANCE_THRESHOLD_KM {
            TransportMode::Flight
        } else {
            TransportMode::Ground
        })
    }

    fn price_per_km(mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Flight => FLIGHT_PRICE_PER_KM,
            _ => GROUND_PRICE_PER_KM,
        }
    }

    fn speed_kmh(mode: TransportMode) -> f64 {
        match mode {
            TransportMode::Flight => FLIGHT_SPEED_KMH,
            _ => GROUND_SPEED_KMH,
        }
    }

    /// Price one directional leg for the whole party.
    pub fn build_leg(
        mode: TransportMode,
        origin: &str,
        destination: &str,
        distance_km: f64,
        travelers: u32,
        direction: &str,
    ) -> (Leg, CostItem) {
        let unit_price = distance_km * Self::price_per_km(mode);
        let total = unit_price * travelers as f64;

        let leg = Leg {
            mode,
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
            duration_hours: distance_km / Self::speed_kmh(mode),
            estimated_price: total,
        };
        let item = CostItem {
            category: CostCategory::Transport,
            description: format!("{} - {}", mode, direction),
            quantity: travelers,
            unit_price,
            total,
        };

        (leg, item)
    }

    /// Price one calendar day: lodging share (multi-day stays only), meals
    /// and one activity per slot. Returns the day plan and its cost items.
    pub fn price_day(
        date: NaiveDate,
        num_days: i64,
        request: &PlanRequest,
        config: &PlanConfig,
        pois: &[Poi],
        rng: &mut impl Rng,
    ) -> (DayPlan, Vec<CostItem>) {
        let travelers = request.travelers;
        let mut items: Vec<CostItem> = Vec::new();
        let mut day_cost = 0.0;

        // Lodging is only charged when the stay spans more than one day:
        // one night per day of the range minus the last, spread evenly
        // across all days.
        if num_days > 1 {
            let nights = (num_days - 1) as f64;
            let unit_price = config.profile.nightly_rate() * nights / num_days as f64;
            let total = unit_price * travelers as f64;
            day_cost += total;
            items.push(CostItem {
                category: CostCategory::Lodging,
                description: format!("Nightly rate ({})", config.profile),
                quantity: travelers,
                unit_price,
                total,
            });
        }

        let meal_unit = MEAL_BASE_RATE * config.profile.meal_factor() * config.meals_factor;
        let meals_total = meal_unit * travelers as f64;
        day_cost += meals_total;
        items.push(CostItem {
            category: CostCategory::Meals,
            description: format!("Meals ({})", config.profile),
            quantity: travelers,
            unit_price: meal_unit,
            total: meals_total,
        });

        let mut taken: Vec<String> = Vec::new();
        let morning = Self::slot_activity(
            TimeSlot::Morning, date, request, config, pois, &mut taken, &mut items, &mut day_cost, rng,
        );
        let afternoon = Self::slot_activity(
            TimeSlot::Afternoon, date, request, config, pois, &mut taken, &mut items, &mut day_cost, rng,
        );
        let evening = Self::slot_activity(
            TimeSlot::Evening, date, request, config, pois, &mut taken, &mut items, &mut day_cost, rng,
        );

        let day = DayPlan {
            date,
            morning,
            afternoon,
            evening,
            estimated_cost: day_cost,
            narrative: String::new(),
        };

        (day, items)
    }

    fn slot_activity(
        slot: TimeSlot,
        date: NaiveDate,
        request: &PlanRequest,
        config: &PlanConfig,
        pois: &[Poi],
        taken: &mut Vec<String>,
        items: &mut Vec<CostItem>,
        day_cost: &mut f64,
        rng: &mut impl Rng,
    ) -> String {
        // Weekend mornings are kept outdoors; other slots are unconstrained
        let indoor = match slot {
            TimeSlot::Morning if is_weekend(date) => Some(false),
            _ => None,
        };
        let price_cap = if config.budget_mode {
            config.activity_price_cap
        } else {
            None
        };

        let candidates = poi_catalog::filter_pois(
            pois,
            &request.themes,
            slot,
            indoor,
            config.allow_day_trips,
            price_cap,
        );

        match poi_catalog::random_poi(&candidates, taken, rng) {
            Some(poi) => {
                taken.push(poi.name.to_string());
                let total = poi.price * request.travelers as f64;
                *day_cost += total;
                items.push(CostItem {
                    category: CostCategory::Activity,
                    description: poi.name.to_string(),
                    quantity: request.travelers,
                    unit_price: poi.price,
                    total,
                });
                poi.name.to_string()
            }
            None => FREE_ACTIVITY.to_string(),
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
