//! Error taxonomy for the weather provider client.

use thiserror::Error;

/// Weather API errors, one variant per failure class the app distinguishes.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    /// No API key was configured; raised before any request is sent.
    #[error("API key not found. Set OPENWEATHER_API_KEY or api_key in config.toml.")]
    MissingApiKey,

    /// HTTP 404. The message is endpoint-specific ("location not found" vs
    /// "location not found for the provided coordinates").
    #[error("{0}")]
    NotFound(String),

    /// HTTP 401: the configured key was rejected.
    #[error("Invalid API key")]
    Unauthorized,

    /// HTTP 429: provider quota exhausted. Not retried automatically.
    #[error("API rate limit exceeded")]
    RateLimited,

    /// Any other non-success status, with the numeric code preserved.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connectivity, TLS, body decode).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherApiError {
    /// Returns a user-friendly message suitable for display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherApiError::MissingApiKey => {
                "API key not found. Please add OPENWEATHER_API_KEY to your environment."
            }
            WeatherApiError::NotFound(_) => {
                "Location not found. Please check the city name and try again."
            }
            WeatherApiError::Unauthorized => {
                "Invalid API key. Please check your OpenWeatherMap API key."
            }
            WeatherApiError::RateLimited => "API rate limit exceeded. Please try again later.",
            WeatherApiError::Api { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            WeatherApiError::Api { .. } => "The weather request failed. Please try again.",
            WeatherApiError::Network(_) => "Unable to connect. Check your internet connection.",
        }
    }
}
