//! OpenWeatherMap client and IP geolocation client

use std::sync::OnceLock;

use serde::Deserialize;

use crate::state::{WeatherQuery, WeatherReport};

/// Current-weather endpoint; overridable for tests and proxies
pub const WEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";
/// IP geolocation service used to resolve the machine's position
pub const LOCATE_ENDPOINT: &str = "http://ip-api.com/json";

/// Shown when a failed response carries no message of its own
const FALLBACK_FETCH_MSG: &str = "Failed to fetch weather data";

/// Provider connection settings, fixed at startup
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub api_key: String,
    pub locate_endpoint: String,
}

/// Weather lookup error
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Provider answered with a non-success status
    #[error("{0}")]
    Provider(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Position lookup error
#[derive(thiserror::Error, Debug)]
pub enum LocateError {
    #[error("position lookup refused: {0}")]
    Refused(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// Resolved position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

// ============================================================================
// Provider response shape
// ============================================================================

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    #[serde(default)]
    sys: OwSys,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    /// Meters; the provider omits it for some stations
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: Option<String>,
}

fn report_from_response(response: OwCurrentResponse) -> WeatherReport {
    let (condition_main, condition_description) = response
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

    WeatherReport {
        location_name: response.name,
        country_code: response.sys.country,
        condition_main,
        condition_description,
        temperature_c: response.main.temp,
        feels_like_c: response.main.feels_like,
        humidity_pct: response.main.humidity,
        wind_speed_mps: response.wind.speed,
        visibility_m: response.visibility,
        observed_at: response.dt,
    }
}

/// Fetch current weather for a city name or a position
pub async fn fetch_current(
    config: &ProviderConfig,
    query: &WeatherQuery,
) -> Result<WeatherReport, FetchError> {
    let request = http_client().get(&config.endpoint);
    let request = match query {
        WeatherQuery::City(name) => request.query(&[("q", name.as_str())]),
        WeatherQuery::Coords { lat, lon } => {
            request.query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
        }
    };

    let response = request
        .query(&[("appid", config.api_key.as_str()), ("units", "metric")])
        .send()
        .await?;

    if !response.status().is_success() {
        let message = response
            .json::<OwErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| FALLBACK_FETCH_MSG.to_string());
        return Err(FetchError::Provider(message));
    }

    let parsed: OwCurrentResponse = response.json().await?;
    Ok(report_from_response(parsed))
}

// ============================================================================
// IP geolocation
// ============================================================================

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

/// Resolve the machine's position from its public IP
pub async fn locate_position(endpoint: &str) -> Result<GeoPosition, LocateError> {
    let response = http_client().get(endpoint).send().await?;
    let response = response.error_for_status()?;
    let body: IpApiResponse = response.json().await?;
    if body.status != "success" {
        return Err(LocateError::Refused(body.message));
    }
    Ok(GeoPosition {
        lat: body.lat,
        lon: body.lon,
    })
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
