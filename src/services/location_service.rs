//! Location resolution with online geocoding and static fallback
//!
//! Resolves free-text place names to coordinates and a display label. The
//! lookup chain is: Nominatim (when online geocoding is enabled) with a
//! bounded LRU cache keyed by the exact query string, then the static city
//! catalog after alias normalization, then the default city's coordinates
//! with the raw input as label. Resolution is best effort and never fails.

use std::env;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::Duration;

use lru::LruCache;
use serde::Deserialize;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const GEOCODE_TIMEOUT_SECS: u64 = 5;
const GEOCODE_CACHE_CAPACITY: usize = 256;

// Fallback when nothing else resolves: São Paulo
const DEFAULT_COORDS: (f64, f64) = (-23.5505, -46.6333);

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub lat: f64,
    pub lon: f64,
    pub label: String,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized catalog key for a raw city name, mapping aliases onto their
/// canonical entry. Unknown names pass through normalized.
pub fn resolve_catalog_key(raw: &str) -> String {
    let key = normalize(raw);
    if catalog_coords(&key).is_some() {
        return key;
    }
    match key.as_str() {
        "amazonia" | "amazônia" => "manaus".to_string(),
        "belem" => "belém".to_string(),
        "rio" => "rio de janeiro".to_string(),
        "sp" => "são paulo".to_string(),
        _ => key,
    }
}

pub fn catalog_coords(key: &str) -> Option<(f64, f64, &'static str)> {
    match key {
        "são paulo" => Some((-23.5505, -46.6333, "São Paulo, SP")),
        "rio de janeiro" => Some((-22.9068, -43.1729, "Rio de Janeiro, RJ")),
        "manaus" => Some((-3.1190, -60.0217, "Manaus, AM")),
        "belém" => Some((-1.4558, -48.4902, "Belém, PA")),
        "brasília" => Some((-15.7939, -47.8828, "Brasília, DF")),
        "salvador" => Some((-12.9777, -38.5016, "Salvador, BA")),
        "recife" => Some((-8.0476, -34.8770, "Recife, PE")),
        "curitiba" => Some((-25.4284, -49.2733, "Curitiba, PR")),
        "porto alegre" => Some((-30.0346, -51.2177, "Porto Alegre, RS")),
        "florianópolis" => Some((-27.5949, -48.5482, "Florianópolis, SC")),
        _ => None,
    }
}

/// Qualitative climate-risk label for a destination.
pub fn climate_risk(raw_destination: &str) -> &'static str {
    match resolve_catalog_key(raw_destination).as_str() {
        "manaus" | "belém" => "Medium (tropical rain / humid heat)",
        _ => "Low",
    }
}

pub struct LocationService {
    http_client: reqwest::Client,
    cache: Mutex<LruCache<String, ResolvedPlace>>,
    online: bool,
}

impl LocationService {
    /// Service configured from the environment: online geocoding is on
    /// unless `USE_ONLINE_GEOCODING=0`.
    pub fn new() -> Self {
        let online = env::var("USE_ONLINE_GEOCODING")
            .map(|v| v != "0")
            .unwrap_or(true);
        let capacity = NonZeroUsize::new(GEOCODE_CACHE_CAPACITY)
            .expect("geocode cache capacity must be non-zero");

        Self::with_options(online, capacity)
    }

    pub fn with_options(online: bool, cache_capacity: NonZeroUsize) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(GEOCODE_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        Self {
            http_client,
            cache: Mutex::new(LruCache::new(cache_capacity)),
            online,
        }
    }

    /// Resolver that never touches the network.
    pub fn offline() -> Self {
        let capacity = NonZeroUsize::new(GEOCODE_CACHE_CAPACITY)
            .expect("geocode cache capacity must be non-zero");
        Self::with_options(false, capacity)
    }

    /// Resolve a free-text place name. Never fails: online lookup falls back
    /// to the static catalog, which falls back to the default city with the
    /// raw input as label.
    pub async fn resolve(&self, raw: &str) -> ResolvedPlace {
        if let Some(place) = self.geocode_online(raw).await {
            return place;
        }
        Self::resolve_static(raw)
    }

    /// Online lookup only, `None` when disabled, unreachable or the query is
    /// blank. Successful results are cached by the exact query string.
    pub async fn geocode_online(&self, raw: &str) -> Option<ResolvedPlace> {
        if !self.online || raw.trim().is_empty() {
            return None;
        }

        if let Some(hit) = self.cache_lookup(raw) {
            return Some(hit);
        }

        // One retry with the same fixed timeout
        for attempt in 0..2 {
            match self.fetch_nominatim(raw.trim()).await {
                Ok(Some(place)) => {
                    self.cache_store(raw, place.clone());
                    return Some(place);
                }
                Ok(None) => return None,
                Err(err) => {
                    eprintln!(
                        "Geocoding lookup failed for '{}' (attempt {}): {}",
                        raw,
                        attempt + 1,
                        err
                    );
                }
            }
        }

        None
    }

    async fn fetch_nominatim(
        &self,
        query: &str,
    ) -> Result<Option<ResolvedPlace>, Box<dyn std::error::Error>> {
        let response = self
            .http_client
            .get(NOMINATIM_URL)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", "1"),
                ("addressdetails", "0"),
            ])
            .header("User-Agent", "IViagem/2.3.0 (contact: suporte@ivg.local)")
            .header("Accept-Language", "pt-BR")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(format!("Nominatim returned status {}", response.status()).into());
        }

        let places: Vec<NominatimPlace> = response.json().await?;
        let place = match places.into_iter().next() {
            Some(place) => place,
            None => return Ok(None),
        };

        let lat: f64 = place.lat.parse()?;
        let lon: f64 = place.lon.parse()?;
        let label = place.display_name.unwrap_or_else(|| query.to_string());

        Ok(Some(ResolvedPlace { lat, lon, label }))
    }

    fn cache_lookup(&self, query: &str) -> Option<ResolvedPlace> {
        let mut cache = self.cache.lock().ok()?;
        cache.get(query).cloned()
    }

    fn cache_store(&self, query: &str, place: ResolvedPlace) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(query.to_string(), place);
        }
    }

    /// Catalog/alias resolution with the default-city fallback.
    pub fn resolve_static(raw: &str) -> ResolvedPlace {
        let key = resolve_catalog_key(raw);
        if let Some((lat, lon, label)) = catalog_coords(&key) {
            return ResolvedPlace {
                lat,
                lon,
                label: label.to_string(),
            };
        }

        let trimmed = raw.trim();
        let label = if trimmed.is_empty() {
            "Destination".to_string()
        } else {
            trimmed.to_string()
        };

        ResolvedPlace {
            lat: DEFAULT_COORDS.0,
            lon: DEFAULT_COORDS.1,
            label,
        }
    }
}

impl Default for LocationService {
    fn default() -> Self {
        Self::new()
    }
}
