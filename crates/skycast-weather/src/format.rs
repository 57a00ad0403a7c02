//! Display formatting for weather readings.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Unit used when rendering temperatures. Requests use metric units, so
/// Celsius is the default everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }
}

/// Icon raster size offered by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    #[default]
    TwoX,
    FourX,
}

impl IconSize {
    fn as_str(self) -> &'static str {
        match self {
            IconSize::TwoX => "2x",
            IconSize::FourX => "4x",
        }
    }
}

const COMPASS_SECTORS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Rounded temperature with unit, e.g. "21°C".
pub fn format_temperature(temp: f64, unit: TemperatureUnit) -> String {
    format!("{}°{}", temp.round() as i64, unit.symbol())
}

/// Compass sector for a wind direction in degrees (16 sectors of 22.5°,
/// wrapping at 360°).
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = (degrees / 22.5).round() as usize % 16;
    COMPASS_SECTORS[index]
}

/// Visibility distance in kilometers with one decimal, e.g. "10.0 km".
pub fn format_visibility(meters: u32) -> String {
    format!("{:.1} km", f64::from(meters) / 1000.0)
}

/// 12-hour clock time for a unix timestamp, shifted by the location's UTC
/// offset in seconds (the `timezone` field of a weather response).
pub fn format_time(epoch_secs: i64, utc_offset_secs: i32) -> String {
    let offset = FixedOffset::east_opt(utc_offset_secs).unwrap_or_else(|| {
        tracing::warn!("Invalid UTC offset {utc_offset_secs}, falling back to UTC");
        Utc.fix()
    });
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(dt) => dt.with_timezone(&offset).format("%I:%M %p").to_string(),
        None => String::from("--:--"),
    }
}

/// Static URL of the provider's condition icon, e.g.
/// `https://openweathermap.org/img/wn/04d@2x.png`.
pub fn icon_url(icon_code: &str, size: IconSize) -> String {
    format!(
        "https://openweathermap.org/img/wn/{}@{}.png",
        icon_code,
        size.as_str()
    )
}
