//! OpenWeatherMap client for Skycast
//!
//! Typed request/response wrappers for the provider's current-weather,
//! forecast, air-pollution and geocoding endpoints, plus slippy-map tile
//! math, display formatting, and the parallel search cycle.

pub mod aqi;
pub mod client;
pub mod error;
pub mod format;
pub mod search;
pub mod tiles;
pub mod types;

pub use aqi::{AqiLevel, Pollutant};
pub use client::{WeatherClient, DEFAULT_MAP_ZOOM};
pub use error::WeatherApiError;
pub use search::{SearchResults, SearchSession};
pub use tiles::lat_lon_to_tile;
pub use types::*;
