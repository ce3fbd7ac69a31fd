use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
}

/// A candidate activity at a destination. Catalog entries are static and
/// read-only; prices are per person in the request currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Poi {
    pub name: &'static str,
    pub neighborhood: &'static str,
    pub slot: TimeSlot,
    pub tags: &'static [&'static str],
    pub price: f64,
    pub indoor: bool,
    pub day_trip: bool,
}

impl Poi {
    pub fn has_any_tag(&self, themes: &[String]) -> bool {
        themes.iter().any(|t| {
            let wanted = t.trim().to_lowercase();
            self.tags.iter().any(|tag| *tag == wanted)
        })
    }
}
