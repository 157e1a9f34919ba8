//! Actions with automatic category inference
//!
//! Completion actions carry the request token they were issued with so
//! the reducer can discard results of superseded lookups.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{WeatherQuery, WeatherReport};

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Weather category =====
    /// Intent: start a lookup for the given query (triggers async task)
    WeatherFetch(WeatherQuery),

    /// Result: provider response parsed into a report
    WeatherDidLoad { token: u64, report: WeatherReport },

    /// Result: lookup failed
    WeatherDidError { token: u64, message: String },

    // ===== Locate category =====
    /// Intent: look up weather for the machine's position
    LocateRequest,

    /// Result: position resolved, continue with a coordinate lookup
    LocateDidResolve { token: u64, lat: f64, lon: f64 },

    /// Result: position lookup failed
    LocateDidError { token: u64 },

    // ===== Search category =====
    /// Search text changed
    SearchQueryChange(String),

    /// Submit the typed city name
    SearchQuerySubmit(String),

    /// Route keys to the search bar
    SearchFocus,

    /// Route keys back to the panel
    SearchBlur,

    // ===== UI category =====
    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    /// Exit the application
    Quit,
}
