use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelProfile {
    Economical,
    Balanced,
    Premium,
}

impl TravelProfile {
    /// Multiplier applied to the daily meal base rate for this profile
    pub fn meal_factor(&self) -> f64 {
        match self {
            TravelProfile::Economical => 0.8,
            TravelProfile::Balanced => 1.0,
            TravelProfile::Premium => 1.6,
        }
    }

    /// Nightly lodging rate per traveler, in the request currency
    pub fn nightly_rate(&self) -> f64 {
        match self {
            TravelProfile::Economical => 220.0,
            TravelProfile::Balanced => 350.0,
            TravelProfile::Premium => 800.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TravelProfile::Economical => "economical",
            TravelProfile::Balanced => "balanced",
            TravelProfile::Premium => "premium",
        }
    }
}

impl Default for TravelProfile {
    fn default() -> Self {
        TravelProfile::Balanced
    }
}

impl std::fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Ground,
    River,
    Mixed,
}

impl TransportMode {
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Ground => "ground",
            TransportMode::River => "river",
            TransportMode::Mixed => "mixed",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn default_travelers() -> u32 {
    1
}

fn default_currency() -> String {
    "BRL".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub profile: TravelProfile,
    #[serde(default)]
    pub budget_ceiling: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Leg {
    pub mode: TransportMode,
    pub origin: String,
    pub destination: String,
    pub distance_km: f64,
    pub duration_hours: f64,
    pub estimated_price: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CostCategory {
    Transport,
    Lodging,
    Meals,
    Activity,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CostItem {
    pub category: CostCategory,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub estimated_cost: f64,
    #[serde(default)]
    pub narrative: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdjustedPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanResponse {
    pub total_estimated_cost: f64,
    pub legs: Vec<Leg>,
    pub cost_items: Vec<CostItem>,
    pub itinerary: Vec<DayPlan>,
    #[serde(default)]
    pub general_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_flight_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings_vs_ceiling: Option<f64>,
    pub climate_risk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments_applied: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_period: Option<AdjustedPeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_ceiling_applied: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}
