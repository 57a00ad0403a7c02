use clap::{Parser, Subcommand};

/// CLI arguments for skycast
#[derive(Debug, Parser)]
#[command(
    name = "skycast",
    version,
    about = "Current weather, short-range forecast and air quality from your terminal"
)]
pub struct CliArgs {
    /// Language code for localized descriptions (e.g. de, fr, ja).
    /// Overrides and updates the stored preference.
    #[arg(short, long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Look up a city: current conditions, 24h forecast and air quality
    Search {
        /// City name, e.g. "London" or "São Paulo"
        city: String,
    },

    /// Same lookup by coordinates
    #[command(allow_negative_numbers = true)]
    Locate {
        /// Latitude in decimal degrees
        lat: f64,
        /// Longitude in decimal degrees
        lon: f64,
    },

    /// List geocoding matches for a place name
    Geocode {
        /// Place name to resolve
        query: String,
        /// Maximum number of matches
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: u32,
    },

    /// Resolve coordinates to place names
    #[command(allow_negative_numbers = true)]
    ReverseGeocode {
        lat: f64,
        lon: f64,
        /// Maximum number of matches
        #[arg(short = 'n', long, default_value_t = 1)]
        limit: u32,
    },

    /// Historical air quality for a unix-seconds time range
    #[command(allow_negative_numbers = true)]
    AirHistory {
        lat: f64,
        lon: f64,
        /// Range start, unix seconds UTC
        start: i64,
        /// Range end, unix seconds UTC
        end: i64,
    },

    /// Print the weather map tile URL covering coordinates
    #[command(allow_negative_numbers = true)]
    TileUrl {
        /// Map layer, e.g. clouds_new, precipitation_new, temp_new
        layer: String,
        lat: f64,
        lon: f64,
        #[arg(short, long, default_value_t = skycast_weather::DEFAULT_MAP_ZOOM)]
        zoom: u8,
    },

    /// Show recent searches, optionally removing an entry
    Recent {
        /// Remove this exact label from the list
        #[arg(long)]
        remove: Option<String>,
    },

    /// Show or set the language preference
    Lang {
        /// New language code; omit to print the current one
        code: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic)]
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_args_are_well_formed() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_negative_coordinates() {
        let args = CliArgs::parse_from(["skycast", "locate", "51.5085", "-0.1257"]);
        match args.command {
            Commands::Locate { lat, lon } => {
                assert!((lat - 51.5085).abs() < f64::EPSILON);
                assert!((lon + 0.1257).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn lang_flag_is_global() {
        let args = CliArgs::parse_from(["skycast", "search", "London", "--lang", "de"]);
        assert_eq!(args.lang.as_deref(), Some("de"));
    }
}
