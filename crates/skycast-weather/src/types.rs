//! Wire types for the OpenWeatherMap endpoints this client calls.
//!
//! These mirror the provider's JSON payloads field for field. Responses are
//! parsed once and never mutated; malformed payloads surface as deserialize
//! errors in the transport layer, not as validation failures here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geographic coordinates as the provider reports them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

/// One weather condition descriptor (a response may carry several).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

/// Temperature and atmosphere block shared by current and forecast entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Clouds {
    /// Cloud cover percentage.
    pub all: u8,
}

/// Country and sun times for a current-conditions response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: Option<String>,
    pub sunrise: i64,
    pub sunset: i64,
}

/// Current weather at one location, fetched fresh per search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    /// Visibility in meters; the provider caps this at 10 km.
    #[serde(default)]
    pub visibility: Option<u32>,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Observation time, unix seconds UTC.
    pub dt: i64,
    pub sys: SysInfo,
    /// Shift from UTC in seconds.
    pub timezone: i32,
    pub id: i64,
    pub name: String,
}

impl CurrentConditions {
    /// Display label persisted as the last-searched location, e.g.
    /// "London, GB". Falls back to the bare name when the provider omits
    /// the country code.
    pub fn location_label(&self) -> String {
        match self.sys.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.name, country),
            _ => self.name.clone(),
        }
    }
}

/// One 3-hour forecast step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

/// City metadata attached to a forecast response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastCity {
    pub id: i64,
    pub name: String,
    pub coord: Coord,
    #[serde(default)]
    pub country: Option<String>,
    pub timezone: i32,
    pub sunrise: i64,
    pub sunset: i64,
}

/// 5-day / 3-hour forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCity,
}

impl Forecast {
    /// Number of entries shown in the short-range view.
    pub const DISPLAY_WINDOW: usize = 8;

    /// The first eight 3-hour steps (24 hours), the slice the UI renders.
    pub fn display_entries(&self) -> &[ForecastEntry] {
        let end = self.list.len().min(Self::DISPLAY_WINDOW);
        &self.list[..end]
    }
}

/// One geocoding match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoResult {
    pub name: String,
    /// Localized names keyed by language code, when the provider has them.
    #[serde(default)]
    pub local_names: Option<HashMap<String, String>>,
    pub lat: f64,
    pub lon: f64,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
}

impl GeoResult {
    /// Name in the given language, falling back to the canonical name.
    pub fn localized_name(&self, lang: &str) -> &str {
        self.local_names
            .as_ref()
            .and_then(|names| names.get(lang))
            .map(String::as_str)
            .unwrap_or(&self.name)
    }
}

/// Air pollution data (forecast or history): a time series of AQI readings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQuality {
    pub coord: Coord,
    pub list: Vec<AirQualityEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityEntry {
    pub main: AqiReading,
    pub components: Pollutants,
    pub dt: i64,
}

/// The provider's 1 (good) to 5 (very poor) air quality index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AqiReading {
    pub aqi: u8,
}

/// Pollutant concentrations in μg/m³.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pollutants {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}
