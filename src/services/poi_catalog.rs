//! Static point-of-interest catalogs per destination.
//!
//! Each destination known to the planner carries a hand-curated list of
//! candidate activities tagged by time slot, theme, indoor/outdoor and a
//! per-person price. Destinations outside the catalog fall back to a generic
//! list that works for any city. The data is read-only and lives for the
//! whole process.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::poi::{Poi, TimeSlot};
use crate::services::location_service::resolve_catalog_key;

static POIS_MANAUS: &[Poi] = &[
    Poi { name: "Teatro Amazonas", neighborhood: "Centro", slot: TimeSlot::Afternoon, tags: &["culture"], price: 60.0, indoor: true, day_trip: false },
    Poi { name: "Palácio Rio Negro", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["culture"], price: 0.0, indoor: true, day_trip: false },
    Poi { name: "Museu da Cidade", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["culture"], price: 20.0, indoor: true, day_trip: false },
    Poi { name: "Mercado Adolpho Lisboa", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["gastronomy", "culture"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Regional café downtown", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["gastronomy"], price: 35.0, indoor: true, day_trip: false },
    Poi { name: "Encontro das Águas boat tour", neighborhood: "Marina", slot: TimeSlot::Morning, tags: &["nature"], price: 220.0, indoor: false, day_trip: false },
    Poi { name: "MUSA - Museu da Amazônia", neighborhood: "Zona Norte", slot: TimeSlot::Afternoon, tags: &["nature", "culture"], price: 50.0, indoor: false, day_trip: false },
    Poi { name: "Praia da Ponta Negra at sunset", neighborhood: "Ponta Negra", slot: TimeSlot::Afternoon, tags: &["nature"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Anavilhanas day trip", neighborhood: "Marina", slot: TimeSlot::Morning, tags: &["nature"], price: 480.0, indoor: false, day_trip: true },
    Poi { name: "Praia da Lua", neighborhood: "Zona Oeste", slot: TimeSlot::Afternoon, tags: &["nature"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Dinner - Tacacá & Tambaqui", neighborhood: "Centro", slot: TimeSlot::Evening, tags: &["gastronomy"], price: 70.0, indoor: true, day_trip: false },
    Poi { name: "Riverside restaurant at Ponta Negra", neighborhood: "Ponta Negra", slot: TimeSlot::Evening, tags: &["gastronomy"], price: 95.0, indoor: true, day_trip: false },
    Poi { name: "Bar with regional music", neighborhood: "Centro", slot: TimeSlot::Evening, tags: &["culture"], price: 50.0, indoor: true, day_trip: false },
];

static POIS_BELEM: &[Poi] = &[
    Poi { name: "Ver-o-Peso market", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["gastronomy", "culture"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Mangal das Garças", neighborhood: "Cidade Velha", slot: TimeSlot::Afternoon, tags: &["nature"], price: 20.0, indoor: false, day_trip: false },
    Poi { name: "Basílica de Nazaré", neighborhood: "Nazaré", slot: TimeSlot::Morning, tags: &["culture"], price: 0.0, indoor: true, day_trip: false },
    Poi { name: "Estação das Docas", neighborhood: "Campina", slot: TimeSlot::Evening, tags: &["gastronomy", "culture"], price: 90.0, indoor: true, day_trip: false },
    Poi { name: "Ilha do Combu day trip", neighborhood: "Ribeirinha", slot: TimeSlot::Morning, tags: &["nature"], price: 250.0, indoor: false, day_trip: true },
];

static POIS_RIO: &[Poi] = &[
    Poi { name: "Cristo Redentor", neighborhood: "Cosme Velho", slot: TimeSlot::Morning, tags: &["culture", "nature"], price: 89.0, indoor: false, day_trip: false },
    Poi { name: "Pão de Açúcar", neighborhood: "Urca", slot: TimeSlot::Afternoon, tags: &["nature"], price: 140.0, indoor: false, day_trip: false },
    Poi { name: "Museu do Amanhã", neighborhood: "Centro", slot: TimeSlot::Afternoon, tags: &["culture", "technology"], price: 30.0, indoor: true, day_trip: false },
    Poi { name: "Praia de Copacabana", neighborhood: "Zona Sul", slot: TimeSlot::Morning, tags: &["nature"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Lapa by night", neighborhood: "Lapa", slot: TimeSlot::Evening, tags: &["culture", "gastronomy"], price: 70.0, indoor: true, day_trip: false },
];

static POIS_SAO_PAULO: &[Poi] = &[
    Poi { name: "Avenida Paulista & MASP", neighborhood: "Paulista", slot: TimeSlot::Afternoon, tags: &["culture"], price: 50.0, indoor: true, day_trip: false },
    Poi { name: "Beco do Batman", neighborhood: "Vila Madalena", slot: TimeSlot::Morning, tags: &["culture"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Mercadão Municipal", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["gastronomy"], price: 40.0, indoor: true, day_trip: false },
    Poi { name: "Parque Ibirapuera", neighborhood: "Ibirapuera", slot: TimeSlot::Afternoon, tags: &["nature"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Rooftop bar", neighborhood: "Centro / Zona Sul", slot: TimeSlot::Evening, tags: &["gastronomy"], price: 80.0, indoor: true, day_trip: false },
];

static POIS_GENERIC: &[Poi] = &[
    Poi { name: "Historic center and main square", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["culture"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Top-rated museum or gallery", neighborhood: "Centro", slot: TimeSlot::Afternoon, tags: &["culture"], price: 30.0, indoor: true, day_trip: false },
    Poi { name: "Urban park or lookout", neighborhood: "Central area", slot: TimeSlot::Afternoon, tags: &["nature"], price: 0.0, indoor: false, day_trip: false },
    Poi { name: "Public market and food hall", neighborhood: "Centro", slot: TimeSlot::Morning, tags: &["gastronomy"], price: 35.0, indoor: true, day_trip: false },
    Poi { name: "Traditional restaurant", neighborhood: "Centro", slot: TimeSlot::Evening, tags: &["gastronomy"], price: 80.0, indoor: true, day_trip: false },
];

/// Catalog for a destination, falling back to the generic list for cities
/// the planner doesn't know.
pub fn pois_for_destination(raw_city: &str) -> &'static [Poi] {
    match resolve_catalog_key(raw_city).as_str() {
        "manaus" => POIS_MANAUS,
        "belém" => POIS_BELEM,
        "rio de janeiro" => POIS_RIO,
        "são paulo" => POIS_SAO_PAULO,
        _ => POIS_GENERIC,
    }
}

/// Narrow a catalog down to the candidates valid for one slot of one day.
///
/// The theme filter is skipped when the request carries no themes. `indoor`
/// constrains the indoor flag only when set. A price cap excludes anything
/// priced above it.
pub fn filter_pois<'a>(
    pois: &'a [Poi],
    themes: &[String],
    slot: TimeSlot,
    indoor: Option<bool>,
    allow_day_trips: bool,
    price_cap: Option<f64>,
) -> Vec<&'a Poi> {
    pois.iter()
        .filter(|poi| poi.slot == slot)
        .filter(|poi| indoor.map_or(true, |wanted| poi.indoor == wanted))
        .filter(|poi| themes.is_empty() || poi.has_any_tag(themes))
        .filter(|poi| allow_day_trips || !poi.day_trip)
        .filter(|poi| price_cap.map_or(true, |cap| poi.price <= cap))
        .collect()
}

/// Uniform random pick among candidates not already chosen today.
pub fn random_poi<'a>(
    candidates: &[&'a Poi],
    exclude: &[String],
    rng: &mut impl Rng,
) -> Option<&'a Poi> {
    let available: Vec<&&Poi> = candidates
        .iter()
        .filter(|poi| !exclude.iter().any(|name| name == poi.name))
        .collect();

    available.choose(rng).map(|poi| **poi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_known_city_catalogs() {
        assert_eq!(pois_for_destination("Manaus").len(), 13);
        assert_eq!(pois_for_destination("  BELÉM ").len(), 5);
        assert_eq!(pois_for_destination("rio").len(), 5); // alias
    }

    #[test]
    fn test_unknown_city_falls_back_to_generic() {
        let pois = pois_for_destination("Ouro Preto");
        assert_eq!(pois.len(), POIS_GENERIC.len());
        assert_eq!(pois[0].name, "Historic center and main square");
    }

    #[test]
    fn test_slot_and_theme_filter() {
        let themes = vec!["nature".to_string()];
        let candidates = filter_pois(POIS_MANAUS, &themes, TimeSlot::Morning, None, true, None);
        assert!(candidates.iter().all(|p| p.slot == TimeSlot::Morning));
        assert!(candidates.iter().all(|p| p.tags.contains(&"nature")));
        assert!(candidates.iter().any(|p| p.name == "Anavilhanas day trip"));
    }

    #[test]
    fn test_empty_themes_skips_tag_filter() {
        let all = filter_pois(POIS_RIO, &[], TimeSlot::Afternoon, None, true, None);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_day_trip_exclusion() {
        let themes = vec!["nature".to_string()];
        let without = filter_pois(POIS_MANAUS, &themes, TimeSlot::Morning, None, false, None);
        assert!(without.iter().all(|p| !p.day_trip));
    }

    #[test]
    fn test_price_cap() {
        let capped = filter_pois(POIS_MANAUS, &[], TimeSlot::Evening, None, true, Some(60.0));
        assert!(capped.iter().all(|p| p.price <= 60.0));
    }

    #[test]
    fn test_indoor_constraint() {
        let outdoor_only = filter_pois(POIS_SAO_PAULO, &[], TimeSlot::Morning, Some(false), true, None);
        assert!(outdoor_only.iter().all(|p| !p.indoor));
    }

    #[test]
    fn test_random_poi_respects_exclusions() {
        let mut rng = SmallRng::seed_from_u64(42);
        let candidates = filter_pois(POIS_BELEM, &[], TimeSlot::Morning, None, true, None);
        let exclude: Vec<String> = candidates
            .iter()
            .take(candidates.len() - 1)
            .map(|p| p.name.to_string())
            .collect();

        let picked = random_poi(&candidates, &exclude, &mut rng).unwrap();
        assert_eq!(picked.name, candidates.last().unwrap().name);

        let all: Vec<String> = candidates.iter().map(|p| p.name.to_string()).collect();
        assert!(random_poi(&candidates, &all, &mut rng).is_none());
    }

    #[test]
    fn test_seeded_picks_are_deterministic() {
        let candidates = filter_pois(POIS_MANAUS, &[], TimeSlot::Afternoon, None, true, None);
        let a = random_poi(&candidates, &[], &mut SmallRng::seed_from_u64(7)).unwrap();
        let b = random_poi(&candidates, &[], &mut SmallRng::seed_from_u64(7)).unwrap();
        assert_eq!(a.name, b.name);
    }
}
