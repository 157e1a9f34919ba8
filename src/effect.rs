//! Effects - side effects declared by the reducer

use crate::state::WeatherQuery;

/// Side effects that can be triggered by actions
///
/// Each carries the token of the lookup that issued it; the completion
/// action echoes it back.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch current weather for a city or position
    FetchWeather { query: WeatherQuery, token: u64 },
    /// Resolve the machine's position
    Locate { token: u64 },
}
