//! skycast — weather lookup from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Current conditions, 24h forecast and air quality for a city
//!   $ skycast search "London"
//!
//! - The same by coordinates
//!   $ skycast locate 51.5085 -0.1257
//!
//! - Geocoding either way
//!   $ skycast geocode "Springfield" -n 5
//!   $ skycast reverse-geocode 48.8566 2.3522
//!
//! - Weather map tile URL for embedding
//!   $ skycast tile-url clouds_new 51.5085 -0.1257 --zoom 6
//!
//! - Stored state
//!   $ skycast recent
//!   $ skycast recent --remove "London, GB"
//!   $ skycast lang de
//!
//! The OpenWeatherMap API key comes from the OPENWEATHER_API_KEY
//! environment variable or `api_key` in the config file.

mod app;
mod args;

use anyhow::Result;
use clap::Parser;

use crate::app::App;
use crate::args::{CliArgs, Commands};
use skycast_core::Config;
use skycast_weather::WeatherApiError;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        match e.downcast_ref::<WeatherApiError>() {
            Some(api_err) => eprintln!("Error: {}", api_err.user_message()),
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    skycast_core::init()?;

    let args = CliArgs::parse();

    let config = Config::load()?;
    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("config: {warning}");
    }
    if !validation.is_valid() {
        anyhow::bail!("Invalid configuration: {}", validation.error_summary());
    }

    let app = App::from_config(&config);
    let lang = app.resolve_language(args.lang.as_deref());

    match args.command {
        Commands::Search { city } => app.search_city(&city, &lang).await,
        Commands::Locate { lat, lon } => app.search_coords(lat, lon, &lang).await,
        Commands::Geocode { query, limit } => app.geocode(&query, &lang, limit).await,
        Commands::ReverseGeocode { lat, lon, limit } => {
            app.reverse_geocode(lat, lon, limit, &lang).await
        }
        Commands::AirHistory {
            lat,
            lon,
            start,
            end,
        } => app.air_history(lat, lon, start, end, &lang).await,
        Commands::TileUrl {
            layer,
            lat,
            lon,
            zoom,
        } => app.tile_url(&layer, lat, lon, zoom),
        Commands::Recent { remove } => {
            app.show_recent(remove.as_deref());
            Ok(())
        }
        Commands::Lang { code } => app.language_command(code.as_deref()),
    }
}
