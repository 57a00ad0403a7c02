//! One search cycle: current weather, forecast, and air quality fetched
//! together, all-or-nothing.
//!
//! Each cycle is stamped with a generation from a monotonic counter.
//! Overlapping searches resolve last-write-wins: a caller keeping display
//! state checks `is_current` and drops results that a newer search has
//! superseded.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::client::WeatherClient;
use crate::error::WeatherApiError;
use crate::types::{AirQuality, CurrentConditions, Forecast};

/// Forecast steps requested per search, matching the display window.
const FORECAST_LIMIT: u32 = Forecast::DISPLAY_WINDOW as u32;

pub struct SearchSession {
    client: WeatherClient,
    generation: AtomicU64,
}

/// The settled result set of one search cycle.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub generation: u64,
    pub current: CurrentConditions,
    pub forecast: Forecast,
    pub air_quality: AirQuality,
}

impl SearchSession {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
        }
    }

    pub fn client(&self) -> &WeatherClient {
        &self.client
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no newer search has started since these results were fetched.
    pub fn is_current(&self, results: &SearchResults) -> bool {
        results.generation == self.generation.load(Ordering::SeqCst)
    }

    /// Search by city name. The current-conditions call resolves the
    /// coordinates, then forecast and air quality are fetched concurrently.
    pub async fn search_city(
        &self,
        city: &str,
        lang: &str,
    ) -> Result<SearchResults, WeatherApiError> {
        let generation = self.next_generation();
        tracing::debug!(generation, city, "starting city search");

        let current = self.client.current_by_city(city, lang).await?;
        let (lat, lon) = (current.coord.lat, current.coord.lon);

        let (forecast, air_quality) = tokio::join!(
            self.client.forecast_by_coords(lat, lon, lang, FORECAST_LIMIT),
            self.client.air_quality_forecast(lat, lon, lang),
        );

        Ok(SearchResults {
            generation,
            current,
            forecast: forecast?,
            air_quality: air_quality?,
        })
    }

    /// Search by coordinates; all three fetches run concurrently.
    pub async fn search_coords(
        &self,
        lat: f64,
        lon: f64,
        lang: &str,
    ) -> Result<SearchResults, WeatherApiError> {
        let generation = self.next_generation();
        tracing::debug!(generation, lat, lon, "starting coordinate search");

        let (current, forecast, air_quality) = tokio::join!(
            self.client.current_by_coords(lat, lon, lang),
            self.client.forecast_by_coords(lat, lon, lang, FORECAST_LIMIT),
            self.client.air_quality_forecast(lat, lon, lang),
        );

        Ok(SearchResults {
            generation,
            current: current?,
            forecast: forecast?,
            air_quality: air_quality?,
        })
    }
}
