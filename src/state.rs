//! Application state - single source of truth

use chrono::{Local, TimeZone};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

/// Shown when the locate service cannot resolve a position
pub const GEO_DENIED_MSG: &str = "Unable to retrieve your location";
/// Shown when position lookup is disabled for this run
pub const GEO_UNSUPPORTED_MSG: &str = "Geolocation is not supported by this browser";

/// Spinner animation timing
pub const SPINNER_TICK_MS: u64 = 200;

/// One observation parsed from a successful provider response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub location_name: String,
    /// ISO country code, empty when the provider omits it
    pub country_code: String,
    /// Coarse condition keyword (`Clear`, `Rain`, ...), picks the glyph
    pub condition_main: String,
    pub condition_description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub visibility_m: u32,
    /// Observation time, epoch seconds
    pub observed_at: i64,
}

impl WeatherReport {
    /// "Paris, FR", or just the name when the country is missing
    pub fn header_label(&self) -> String {
        if self.country_code.is_empty() {
            self.location_name.clone()
        } else {
            format!("{}, {}", self.location_name, self.country_code)
        }
    }

    /// Whole-degree temperature, half rounds away from zero
    pub fn temperature_label(&self) -> String {
        format!("{}°C", self.temperature_c.round() as i64)
    }

    pub fn feels_like_label(&self) -> String {
        format!("{}°C", self.feels_like_c.round() as i64)
    }

    pub fn humidity_label(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    /// Wind speed as reported, no rounding
    pub fn wind_label(&self) -> String {
        format!("{} m/s", self.wind_speed_mps)
    }

    /// Meters to kilometers with one decimal
    pub fn visibility_label(&self) -> String {
        format!("{:.1} km", self.visibility_m as f64 / 1000.0)
    }

    /// Observation time in the viewer's local time zone
    pub fn observed_label(&self) -> String {
        Local
            .timestamp_opt(self.observed_at, 0)
            .single()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".into())
    }
}

/// What to look up: a city by name, or a resolved position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum WeatherQuery {
    City(String),
    Coords { lat: f64, lon: f64 },
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    // --- Core data (visible in debug) ---
    /// Weather lifecycle: Empty → Loading → Loaded/Failed
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub report: DataResource<WeatherReport>,

    /// Token of the most recently issued lookup; completions carrying
    /// an older token are stale and get discarded
    #[debug(section = "Weather", label = "Request seq")]
    pub request_seq: u64,

    /// Whether position lookup is available this run
    #[debug(section = "Weather", label = "Locate supported")]
    pub locate_supported: bool,

    // --- Search bar (skipped) ---
    /// City name as typed, retained across lookups
    #[debug(skip)]
    pub search_input: String,

    /// Whether keys route to the search bar
    #[debug(skip)]
    pub input_focus: bool,

    /// One-line feedback under the search bar (blank submit)
    #[debug(skip)]
    pub input_hint: Option<String>,

    // --- Animation internals (skipped) ---
    #[debug(skip)]
    pub spinner_frame: u8,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            report: DataResource::Empty,
            request_seq: 0,
            locate_supported: true,
            search_input: String::new(),
            input_focus: false,
            input_hint: None,
            spinner_frame: 0,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> WeatherReport {
        WeatherReport {
            location_name: "Paris".into(),
            country_code: "FR".into(),
            condition_main: "Clouds".into(),
            condition_description: "scattered clouds".into(),
            temperature_c: 18.6,
            feels_like_c: 17.4,
            humidity_pct: 65,
            wind_speed_mps: 3.6,
            visibility_m: 10000,
            observed_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_header_label_with_and_without_country() {
        assert_eq!(report().header_label(), "Paris, FR");

        let mut r = report();
        r.country_code.clear();
        assert_eq!(r.header_label(), "Paris");
    }

    #[test]
    fn test_temperature_rounds_to_whole_degrees() {
        assert_eq!(report().temperature_label(), "19°C");

        let mut r = report();
        r.temperature_c = 18.4;
        assert_eq!(r.temperature_label(), "18°C");
        r.temperature_c = 18.5;
        assert_eq!(r.temperature_label(), "19°C");
        r.temperature_c = -3.5;
        assert_eq!(r.temperature_label(), "-4°C");
        r.temperature_c = -0.4;
        assert_eq!(r.temperature_label(), "0°C");
    }

    #[test]
    fn test_feels_like_rounds_to_whole_degrees() {
        assert_eq!(report().feels_like_label(), "17°C");
    }

    #[test]
    fn test_visibility_in_kilometers() {
        assert_eq!(report().visibility_label(), "10.0 km");

        let mut r = report();
        r.visibility_m = 7500;
        assert_eq!(r.visibility_label(), "7.5 km");
        r.visibility_m = 0;
        assert_eq!(r.visibility_label(), "0.0 km");
    }

    #[test]
    fn test_wind_speed_unrounded() {
        assert_eq!(report().wind_label(), "3.6 m/s");

        let mut r = report();
        r.wind_speed_mps = 3.0;
        assert_eq!(r.wind_label(), "3 m/s");
    }

    #[test]
    fn test_humidity_percent() {
        assert_eq!(report().humidity_label(), "65%");
    }

    #[test]
    fn test_observed_label_is_a_time_of_day() {
        let label = report().observed_label();
        assert_eq!(label.len(), 8);
        assert_eq!(label.matches(':').count(), 2);
    }

    #[test]
    fn test_default_state() {
        let state = AppState::default();
        assert!(state.report.is_empty());
        assert_eq!(state.request_seq, 0);
        assert!(state.locate_supported);
        assert!(!state.input_focus);
        assert!(state.input_hint.is_none());
    }
}
