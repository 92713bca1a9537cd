//! Reverse geocoding of the configured coordinates for the clock widget

use std::time::Duration;
use serde_json::Value;
use tracing::{debug, info, warn};

pub const LOCATION_PENDING: &str = "Locating...";
pub const LOCATION_UNSUPPORTED: &str = "Geolocation not supported";
pub const LOCATION_UNAVAILABLE: &str = "Location unavailable";

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves coordinates to a "City, Country" display string
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: reqwest::Client,
    endpoint: String,
    coordinates: Option<Coordinates>,
}

impl LocationResolver {
    pub fn new(endpoint: String, coordinates: Option<Coordinates>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("focus-flow/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build geocoding client, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint,
            coordinates,
        }
    }

    /// Look up the display location, falling back to a fixed message on any failure
    pub async fn resolve(&self) -> String {
        let Some(coords) = self.coordinates else {
            debug!("No coordinates configured, skipping reverse geocoding");
            return LOCATION_UNSUPPORTED.to_string();
        };

        match self.lookup(coords).await {
            Ok(body) => {
                let location = parse_location(&body);
                info!("Resolved location: {}", location);
                location
            }
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                LOCATION_UNAVAILABLE.to_string()
            }
        }
    }

    async fn lookup(&self, coords: Coordinates) -> Result<Value, String> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("geocoder returned {}", response.status()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| format!("invalid geocoder response: {}", e))
    }
}

/// Build "City, Country" from a reverse-geocoding response.
///
/// The city is the first of `city`, `town` or `village`, else `Unknown`.
pub fn parse_location(body: &Value) -> String {
    let address = &body["address"];
    let city = ["city", "town", "village"]
        .iter()
        .find_map(|key| address[*key].as_str())
        .unwrap_or("Unknown");
    let country = address["country"].as_str().unwrap_or("");
    format!("{}, {}", city, country)
}
