//! Command execution: wires the weather client, search session and
//! preference store together and renders results.

use anyhow::Result;
use skycast_core::Config;
use skycast_prefs::{FileBackend, PreferenceStore, SUPPORTED_LANGUAGES};
use skycast_weather::format::{
    format_temperature, format_time, format_visibility, icon_url, wind_direction, IconSize,
    TemperatureUnit,
};
use skycast_weather::{AqiLevel, Pollutant, SearchResults, SearchSession, WeatherClient};

pub struct App {
    session: SearchSession,
    prefs: PreferenceStore,
}

impl App {
    pub fn from_config(config: &Config) -> Self {
        let client = match (&config.api_base, &config.tile_base) {
            (None, None) => WeatherClient::new(config.api_key.clone()),
            (api, tile) => WeatherClient::with_base_urls(
                config.api_key.clone(),
                api.as_deref().unwrap_or("https://api.openweathermap.org"),
                tile.as_deref().unwrap_or("https://tile.openweathermap.org"),
            ),
        };

        let prefs = match FileBackend::default_path() {
            Some(path) => PreferenceStore::new(Box::new(FileBackend::new(path))),
            None => {
                tracing::warn!("No config directory available, preferences will not persist");
                PreferenceStore::in_memory()
            }
        };

        Self {
            session: SearchSession::new(client),
            prefs,
        }
    }

    pub fn client(&self) -> &WeatherClient {
        self.session.client()
    }

    /// Language for this invocation: a supported `--lang` wins and is
    /// persisted; otherwise the stored preference (default "en").
    pub fn resolve_language(&self, flag: Option<&str>) -> String {
        match flag {
            Some(code) if PreferenceStore::is_supported_language(code) => {
                self.prefs.set_language(code);
                code.to_string()
            }
            Some(code) => {
                tracing::warn!("Unsupported language {code:?}, using stored preference");
                self.prefs.language()
            }
            None => self.prefs.language(),
        }
    }

    pub async fn search_city(&self, city: &str, lang: &str) -> Result<()> {
        let results = self.session.search_city(city, lang).await?;
        self.record_search(&results);
        self.print_results(&results);
        Ok(())
    }

    pub async fn search_coords(&self, lat: f64, lon: f64, lang: &str) -> Result<()> {
        let results = self.session.search_coords(lat, lon, lang).await?;
        self.record_search(&results);
        self.print_results(&results);
        Ok(())
    }

    pub async fn geocode(&self, query: &str, lang: &str, limit: u32) -> Result<()> {
        let matches = self.client().geocode(query, lang, limit).await?;
        if matches.is_empty() {
            println!("No matches for {query:?}");
            return Ok(());
        }
        for geo in &matches {
            let state = geo.state.as_deref().map(|s| format!(", {s}")).unwrap_or_default();
            println!(
                "{}{} ({})  lat {:.4}  lon {:.4}",
                geo.localized_name(lang),
                state,
                geo.country,
                geo.lat,
                geo.lon
            );
        }
        Ok(())
    }

    pub async fn reverse_geocode(&self, lat: f64, lon: f64, limit: u32, lang: &str) -> Result<()> {
        let matches = self.client().reverse_geocode(lat, lon, limit, lang).await?;
        if matches.is_empty() {
            println!("No places found at {lat}, {lon}");
            return Ok(());
        }
        for geo in &matches {
            println!("{} ({})", geo.localized_name(lang), geo.country);
        }
        Ok(())
    }

    pub async fn air_history(&self, lat: f64, lon: f64, start: i64, end: i64, lang: &str) -> Result<()> {
        let air = self
            .client()
            .air_quality_history(lat, lon, start, end, lang)
            .await?;
        println!("Air quality history for {:.4}, {:.4}:", air.coord.lat, air.coord.lon);
        for entry in &air.list {
            let label = AqiLevel::from_index(entry.main.aqi)
                .map(AqiLevel::label)
                .unwrap_or("Unknown");
            println!(
                "  {}  AQI {} ({})  PM2.5 {:.1}  PM10 {:.1}  O3 {:.1}",
                format_time(entry.dt, 0),
                entry.main.aqi,
                label,
                entry.components.pm2_5,
                entry.components.pm10,
                entry.components.o3
            );
        }
        Ok(())
    }

    pub fn tile_url(&self, layer: &str, lat: f64, lon: f64, zoom: u8) -> Result<()> {
        println!("{}", self.client().map_tile_url(layer, lat, lon, zoom)?);
        Ok(())
    }

    pub fn show_recent(&self, remove: Option<&str>) {
        if let Some(label) = remove {
            self.prefs.remove_recent_search(label);
        }
        let recent = self.prefs.recent_searches();
        if recent.is_empty() {
            println!("No recent searches");
        } else {
            for (i, label) in recent.iter().enumerate() {
                println!("{}. {}", i + 1, label);
            }
        }
    }

    pub fn language_command(&self, code: Option<&str>) -> Result<()> {
        match code {
            None => {
                println!("{}", self.prefs.language());
                Ok(())
            }
            Some(code) if PreferenceStore::is_supported_language(code) => {
                self.prefs.set_language(code);
                println!("Language set to {code}");
                Ok(())
            }
            Some(code) => anyhow::bail!(
                "Unsupported language {code:?}. Supported: {}",
                SUPPORTED_LANGUAGES.join(", ")
            ),
        }
    }

    fn record_search(&self, results: &SearchResults) {
        let label = results.current.location_label();
        self.prefs.set_last_location(&label);
        self.prefs.add_recent_search(&label);
    }

    fn print_results(&self, results: &SearchResults) {
        let current = &results.current;
        let unit = TemperatureUnit::Celsius;

        println!("{}", current.location_label());
        if let Some(condition) = current.weather.first() {
            println!(
                "  {}  {}  [{}]",
                format_temperature(current.main.temp, unit),
                condition.description,
                icon_url(&condition.icon, IconSize::TwoX)
            );
        } else {
            println!("  {}", format_temperature(current.main.temp, unit));
        }
        println!(
            "  Feels like {}  High {}  Low {}",
            format_temperature(current.main.feels_like, unit),
            format_temperature(current.main.temp_max, unit),
            format_temperature(current.main.temp_min, unit)
        );
        println!(
            "  Humidity {}%  Pressure {} hPa  Clouds {}%",
            current.main.humidity, current.main.pressure, current.clouds.all
        );
        print!(
            "  Wind {:.1} m/s {}",
            current.wind.speed,
            wind_direction(current.wind.deg)
        );
        match current.visibility {
            Some(meters) => println!("  Visibility {}", format_visibility(meters)),
            None => println!(),
        }
        println!(
            "  Sunrise {}  Sunset {}",
            format_time(current.sys.sunrise, current.timezone),
            format_time(current.sys.sunset, current.timezone)
        );

        println!("\nNext 24 hours:");
        for entry in results.forecast.display_entries() {
            let description = entry
                .weather
                .first()
                .map(|c| c.description.as_str())
                .unwrap_or("-");
            println!(
                "  {}  {}  {}",
                format_time(entry.dt, current.timezone),
                format_temperature(entry.main.temp, unit),
                description
            );
        }

        if let Some(reading) = results.air_quality.list.first() {
            let label = AqiLevel::from_index(reading.main.aqi)
                .map(AqiLevel::label)
                .unwrap_or("Unknown");
            println!("\nAir quality: {} ({})", label, reading.main.aqi);
            let pm2_5_level =
                AqiLevel::for_concentration(Pollutant::Pm2_5, reading.components.pm2_5);
            println!(
                "  PM2.5 {:.1} μg/m³ ({})  PM10 {:.1}  NO2 {:.1}  O3 {:.1}",
                reading.components.pm2_5,
                pm2_5_level.label(),
                reading.components.pm10,
                reading.components.no2,
                reading.components.o3
            );
        }
    }
}
