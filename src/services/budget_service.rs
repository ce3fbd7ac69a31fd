//! Budget-fitting pipeline
//!
//! Drives the itinerary builder under a descending sequence of plan
//! configurations until the total fits the requested ceiling or every lever
//! has been tried. The pipeline is greedy and ordered by expected cost
//! impact (transport, then lodging tier, then activity cost, then trip
//! length); it does not backtrack and does not search for a global optimum.
//!
//! ## Levers, in order
//! 1. Force ground transport when any leg flies
//! 2. Profile downgrade: premium -> balanced -> economical
//! 3. Budget-mode activities with a fixed per-person price cap
//! 4. Day-trip exclusion
//! 5. Meal economy multiplier
//! 6. Trailing-day trimming down to a two-day floor
//!
//! A candidate is accepted only when strictly cheaper than the carried best;
//! after every accepted step the ceiling is re-checked and the pipeline
//! short-circuits as soon as the plan fits. When every lever is exhausted the
//! cheapest plan found is returned together with static mitigation
//! suggestions instead of an error.

use chrono::{Duration, NaiveDate};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::models::plan::{AdjustedPeriod, PlanRequest, TransportMode, TravelProfile};
use crate::services::cost_service::PlanConfig;
use crate::services::itinerary_service::{ItineraryService, PlanResult};
use crate::services::location_service::ResolvedPlace;

/// Per-person activity price cap applied in budget mode
pub const ACTIVITY_PRICE_CAP: f64 = 60.0;
/// Meal multiplier applied by the meal-economy lever
pub const MEAL_ECONOMY_FACTOR: f64 = 0.85;
/// Trimming never shrinks a trip below this many days
pub const MIN_TRIP_DAYS: i64 = 2;

pub const MITIGATION_SUGGESTIONS: [&str; 3] = [
    "Consider traveling with fewer people or sharing rooms.",
    "Raise the budget ceiling or travel in the off-season.",
    "Stick to free attractions on some of the days.",
];

/// Result of the fitting pipeline: the best plan found, the ordered list of
/// applied adjustments, the trimmed period when shortening happened, and the
/// mitigation suggestions when the ceiling could not be met.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub result: PlanResult,
    pub adjustments: Vec<String>,
    pub adjusted_period: Option<AdjustedPeriod>,
    pub suggestions: Option<Vec<String>>,
}

pub struct BudgetFitter {
    rng: SmallRng,
}

impl BudgetFitter {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Seeded fitter for reproducible activity selection.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn fit(
        &mut self,
        request: &PlanRequest,
        origin: &ResolvedPlace,
        destination: &ResolvedPlace,
    ) -> FitOutcome {
        let start = request.start_date;
        let end = request.end_date;
        let ceiling = request.budget_ceiling;

        let mut adjustments: Vec<String> = Vec::new();
        let mut adjusted_period: Option<AdjustedPeriod> = None;

        let mut config = PlanConfig::baseline(request.profile);
        let mut best = self.recompute(request, origin, destination, start, end, &config);

        if ceiling <= 0.0 || best.total <= ceiling {
            return FitOutcome {
                result: best,
                adjustments,
                adjusted_period,
                suggestions: None,
            };
        }

        // 1. Transport downgrade
        if best.legs.iter().any(|leg| leg.mode == TransportMode::Flight) {
            let candidate_config = config.with_transport(TransportMode::Ground);
            let candidate =
                self.recompute(request, origin, destination, start, end, &candidate_config);
            if candidate.total < best.total {
                best = candidate;
                config = candidate_config;
                adjustments.push("Transport switched to ground (cheaper than flying).".to_string());
            }
        }
        if best.total <= ceiling {
            return self.done(best, adjustments, adjusted_period, false);
        }

        // 2. Profile downgrade, at most two steps
        if config.profile == TravelProfile::Premium {
            let candidate_config = config.with_profile(TravelProfile::Balanced);
            let candidate =
                self.recompute(request, origin, destination, start, end, &candidate_config);
            if candidate.total < best.total {
                best = candidate;
                config = candidate_config;
                adjustments.push("Lodging adjusted to the 'balanced' profile.".to_string());
            }
            if best.total <= ceiling {
                return self.done(best, adjustments, adjusted_period, false);
            }
        }
        if config.profile == TravelProfile::Balanced || config.profile == TravelProfile::Premium {
            let candidate_config = config.with_profile(TravelProfile::Economical);
            let candidate =
                self.recompute(request, origin, destination, start, end, &candidate_config);
            if candidate.total < best.total {
                best = candidate;
                config = candidate_config;
                adjustments.push("Lodging adjusted to the 'economical' profile.".to_string());
            }
            if best.total <= ceiling {
                return self.done(best, adjustments, adjusted_period, false);
            }
        }

        // 3. Budget-mode activities
        let candidate_config = config.with_activity_cap(ACTIVITY_PRICE_CAP);
        let candidate = self.recompute(request, origin, destination, start, end, &candidate_config);
        if candidate.total < best.total {
            best = candidate;
            config = candidate_config;
            adjustments.push(
                "Activities prioritized toward free or low-cost options (per-person price cap)."
                    .to_string(),
            );
        }
        if best.total <= ceiling {
            return self.done(best, adjustments, adjusted_period, false);
        }

        // 4. Day-trip exclusion
        let candidate_config = config.without_day_trips();
        let candidate = self.recompute(request, origin, destination, start, end, &candidate_config);
        if candidate.total < best.total {
            best = candidate;
            config = candidate_config;
            adjustments.push("Day-trip excursions removed.".to_string());
        }
        if best.total <= ceiling {
            return self.done(best, adjustments, adjusted_period, false);
        }

        // 5. Meal economy
        let candidate_config = config.with_meals_factor(MEAL_ECONOMY_FACTOR);
        let candidate = self.recompute(request, origin, destination, start, end, &candidate_config);
        if candidate.total < best.total {
            best = candidate;
            config = candidate_config;
            adjustments.push("Meal budget trimmed (~15% cheaper).".to_string());
        }
        if best.total <= ceiling {
            return self.done(best, adjustments, adjusted_period, false);
        }

        // 6. Trailing-day trimming down to the floor
        let mut current_end = end;
        while best.total > ceiling && day_span(start, current_end) > MIN_TRIP_DAYS {
            current_end = current_end - Duration::days(1);
            let candidate =
                self.recompute(request, origin, destination, start, current_end, &config);
            if candidate.total < best.total {
                best = candidate;
                adjusted_period = Some(AdjustedPeriod {
                    start_date: start,
                    end_date: current_end,
                });
                adjustments.push(format!(
                    "Trip shortened to end on {} to fit the budget ceiling.",
                    current_end
                ));
            }
        }

        let exhausted = best.total > ceiling;
        self.done(best, adjustments, adjusted_period, exhausted)
    }

    fn recompute(
        &mut self,
        request: &PlanRequest,
        origin: &ResolvedPlace,
        destination: &ResolvedPlace,
        start: NaiveDate,
        end: NaiveDate,
        config: &PlanConfig,
    ) -> PlanResult {
        ItineraryService::build_plan(request, origin, destination, start, end, config, &mut self.rng)
    }

    fn done(
        &self,
        result: PlanResult,
        adjustments: Vec<String>,
        adjusted_period: Option<AdjustedPeriod>,
        exhausted: bool,
    ) -> FitOutcome {
        let suggestions = if exhausted {
            Some(
                MITIGATION_SUGGESTIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            )
        } else {
            None
        };

        FitOutcome {
            result,
            adjustments,
            adjusted_period,
            suggestions,
        }
    }
}

impl Default for BudgetFitter {
    fn default() -> Self {
        Self::new()
    }
}

fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}
