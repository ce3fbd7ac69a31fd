pub mod budget_service;
pub mod cost_service;
pub mod distance_service;
pub mod itinerary_service;
pub mod location_service;
pub mod narrative_service;
pub mod poi_catalog;
