pub mod geocode;
pub mod health;
pub mod plan;
