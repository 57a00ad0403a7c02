//! OpenWeatherMap API client.
//!
//! One operation per endpoint the app calls, all GET. Failures are
//! normalized into [`WeatherApiError`] by a single response handler; a
//! missing API key fails every operation before any request is built.

use tracing::instrument;

use crate::error::WeatherApiError;
use crate::tiles::lat_lon_to_tile;
use crate::types::{AirQuality, CurrentConditions, Forecast, GeoResult};

const API_BASE: &str = "https://api.openweathermap.org";
const TILE_BASE: &str = "https://tile.openweathermap.org";

/// Zoom used for the weather map tile when the caller has no preference.
pub const DEFAULT_MAP_ZOOM: u8 = 5;

const CITY_NOT_FOUND: &str = "Location not found. Please check the city name and try again.";
const COORDS_NOT_FOUND: &str = "Location not found for the provided coordinates.";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    tile_base: String,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_urls(api_key, API_BASE, TILE_BASE)
    }

    /// Client pointed at alternate base URLs (config override, tests).
    pub fn with_base_urls(api_key: Option<String>, api_base: &str, tile_base: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            tile_base: tile_base.trim_end_matches('/').to_string(),
        }
    }

    /// The configured key, or the fail-fast error every operation returns
    /// before touching the network.
    fn key(&self) -> Result<&str, WeatherApiError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(WeatherApiError::MissingApiKey)
    }

    /// Current weather by city name.
    #[instrument(skip(self), level = "info")]
    pub async fn current_by_city(
        &self,
        city: &str,
        lang: &str,
    ) -> Result<CurrentConditions, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/data/2.5/weather?q={}&appid={}&units=metric&lang={}",
            self.api_base,
            urlencoding::encode(city),
            key,
            lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, CITY_NOT_FOUND).await
    }

    /// Current weather by coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn current_by_coords(
        &self,
        lat: f64,
        lon: f64,
        lang: &str,
    ) -> Result<CurrentConditions, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric&lang={}",
            self.api_base, lat, lon, key, lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, COORDS_NOT_FOUND).await
    }

    /// 5-day / 3-hour forecast by coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn forecast_by_coords(
        &self,
        lat: f64,
        lon: f64,
        lang: &str,
        limit: u32,
    ) -> Result<Forecast, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/data/2.5/forecast?lat={}&lon={}&appid={}&units=metric&lang={}&limit={}",
            self.api_base, lat, lon, key, lang, limit
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, COORDS_NOT_FOUND).await
    }

    /// Geocode a place name to candidate locations.
    #[instrument(skip(self), level = "info")]
    pub async fn geocode(
        &self,
        query: &str,
        lang: &str,
        limit: u32,
    ) -> Result<Vec<GeoResult>, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/geo/1.0/direct?q={}&limit={}&appid={}&lang={}",
            self.api_base,
            urlencoding::encode(query),
            limit,
            key,
            lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, CITY_NOT_FOUND).await
    }

    /// Reverse geocode coordinates to candidate place names.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
        limit: u32,
        lang: &str,
    ) -> Result<Vec<GeoResult>, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/geo/1.0/reverse?lat={}&lon={}&limit={}&appid={}&lang={}",
            self.api_base, lat, lon, limit, key, lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, COORDS_NOT_FOUND).await
    }

    /// Air pollution forecast by coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn air_quality_forecast(
        &self,
        lat: f64,
        lon: f64,
        lang: &str,
    ) -> Result<AirQuality, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/data/2.5/air_pollution/forecast?lat={}&lon={}&appid={}&lang={}",
            self.api_base, lat, lon, key, lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, COORDS_NOT_FOUND).await
    }

    /// Historical air pollution for a unix-seconds time range.
    #[instrument(skip(self), level = "info")]
    pub async fn air_quality_history(
        &self,
        lat: f64,
        lon: f64,
        start: i64,
        end: i64,
        lang: &str,
    ) -> Result<AirQuality, WeatherApiError> {
        let key = self.key()?;
        let url = format!(
            "{}/data/2.5/air_pollution/history?lat={}&lon={}&start={}&end={}&appid={}&lang={}",
            self.api_base, lat, lon, start, end, key, lang
        );
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, COORDS_NOT_FOUND).await
    }

    /// URL of the 256×256 weather map tile covering the given coordinates.
    /// Pure URL construction, no network I/O.
    pub fn map_tile_url(
        &self,
        layer: &str,
        lat: f64,
        lon: f64,
        zoom: u8,
    ) -> Result<String, WeatherApiError> {
        let key = self.key()?;
        let (x, y) = lat_lon_to_tile(lat, lon, zoom);
        Ok(format!(
            "{}/map/{}/{}/{}/{}.png?appid={}",
            self.tile_base, layer, zoom, x, y, key
        ))
    }

    /// Map HTTP responses to the error taxonomy. The 404 message is
    /// endpoint-specific; success bodies are parsed with no further
    /// validation.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        not_found_message: &str,
    ) -> Result<T, WeatherApiError> {
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else if status.as_u16() == 404 {
            Err(WeatherApiError::NotFound(not_found_message.to_string()))
        } else if status.as_u16() == 401 {
            Err(WeatherApiError::Unauthorized)
        } else if status.as_u16() == 429 {
            Err(WeatherApiError::RateLimited)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(WeatherApiError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> WeatherClient {
        WeatherClient::with_base_urls(Some("testkey".into()), &server.uri(), &server.uri())
    }

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "coord": {"lon": -0.1257, "lat": 51.5085},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "main": {"temp": 18.3, "feels_like": 17.9, "temp_min": 16.6, "temp_max": 19.7,
                     "pressure": 1015, "humidity": 67},
            "visibility": 10000,
            "wind": {"speed": 4.12, "deg": 240},
            "clouds": {"all": 75},
            "dt": 1756400000,
            "sys": {"country": "GB", "sunrise": 1756355000, "sunset": 1756404000},
            "timezone": 3600,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    #[tokio::test]
    async fn current_by_city_sends_expected_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "São Paulo"))
            .and(query_param("appid", "testkey"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "pt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client.current_by_city("São Paulo", "pt").await.unwrap();
        assert_eq!(data.name, "London");
        assert_eq!(data.main.humidity, 67);
    }

    #[tokio::test]
    async fn current_by_coords_happy_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "51.5085"))
            .and(query_param("lon", "-0.1257"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let data = client.current_by_coords(51.5085, -0.1257, "en").await.unwrap();
        assert_eq!(data.location_label(), "London, GB");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let server = MockServer::start().await;
        let client = WeatherClient::with_base_urls(None, &server.uri(), &server.uri());

        let result = client.current_by_city("London", "en").await;
        assert!(matches!(result, Err(WeatherApiError::MissingApiKey)));

        let result = client.map_tile_url("clouds_new", 0.0, 0.0, 0);
        assert!(matches!(result, Err(WeatherApiError::MissingApiKey)));

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_key_counts_as_missing() {
        let server = MockServer::start().await;
        let client =
            WeatherClient::with_base_urls(Some(String::new()), &server.uri(), &server.uri());
        let result = client.geocode("London", "en", 1).await;
        assert!(matches!(result, Err(WeatherApiError::MissingApiKey)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn not_found_maps_to_city_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.current_by_city("Nowhereville", "en").await.unwrap_err();
        match err {
            WeatherApiError::NotFound(msg) => assert!(msg.contains("check the city name")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reverse_geocode_not_found_mentions_coordinates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/reverse"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.reverse_geocode(0.0, 0.0, 1, "en").await.unwrap_err();
        match err {
            WeatherApiError::NotFound(msg) => assert!(msg.contains("coordinates")),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_and_rate_limited_mapping() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution/forecast"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = test_client(&server);

        let err = client.forecast_by_coords(0.0, 0.0, "en", 8).await.unwrap_err();
        assert!(matches!(err, WeatherApiError::Unauthorized));

        let err = client.air_quality_forecast(0.0, 0.0, "en").await.unwrap_err();
        assert!(matches!(err, WeatherApiError::RateLimited));
    }

    #[tokio::test]
    async fn other_statuses_keep_their_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.current_by_coords(1.0, 2.0, "en").await.unwrap_err();
        match err {
            WeatherApiError::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn geocode_parses_result_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Paris"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Paris", "local_names": {"fr": "Paris"}, "lat": 48.85, "lon": 2.35,
                 "country": "FR", "state": "Ile-de-France"},
                {"name": "Paris", "lat": 33.66, "lon": -95.55, "country": "US", "state": "Texas"}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let results = client.geocode("Paris", "fr", 5).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].country, "FR");
        assert_eq!(results[1].state.as_deref(), Some("Texas"));
    }

    #[tokio::test]
    async fn air_quality_history_passes_time_range() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/air_pollution/history"))
            .and(query_param("start", "1756300000"))
            .and(query_param("end", "1756400000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "coord": {"lon": 2.35, "lat": 48.85},
                "list": [{
                    "main": {"aqi": 3},
                    "components": {"co": 230.0, "no": 0.1, "no2": 12.0, "o3": 80.0,
                                    "so2": 2.0, "pm2_5": 30.0, "pm10": 40.0, "nh3": 1.0},
                    "dt": 1756350000
                }]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let air = client
            .air_quality_history(48.85, 2.35, 1756300000, 1756400000, "en")
            .await
            .unwrap();
        assert_eq!(air.list.len(), 1);
        assert_eq!(air.list[0].main.aqi, 3);
    }

    #[test]
    fn map_tile_url_uses_tile_math() {
        let client = WeatherClient::new(Some("testkey".into()));
        let url = client.map_tile_url("clouds_new", 0.0, 0.0, 0).unwrap();
        assert_eq!(
            url,
            "https://tile.openweathermap.org/map/clouds_new/0/0/0.png?appid=testkey"
        );

        let url = client
            .map_tile_url("precipitation_new", 51.5085, -0.1257, 10)
            .unwrap();
        assert_eq!(
            url,
            "https://tile.openweathermap.org/map/precipitation_new/10/511/340.png?appid=testkey"
        );
    }
}
