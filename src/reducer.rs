//! Reducer - pure function: (state, action) -> DispatchResult
//!
//! Lookup lifecycle: every issued lookup bumps `request_seq` and carries
//! that value as its token. Completions compare their token against the
//! current `request_seq` and are discarded when stale, so a slow response
//! can never overwrite the result of a newer lookup.

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, WeatherQuery, GEO_DENIED_MSG, GEO_UNSUPPORTED_MSG};

const EMPTY_SUBMIT_HINT: &str = "Enter a city name";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Weather actions =====
        Action::WeatherFetch(query) => begin_lookup(state, query),

        Action::WeatherDidLoad { token, report } => {
            if token != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Loaded(report);
            DispatchResult::changed()
        }

        Action::WeatherDidError { token, message } => {
            if token != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Failed(message);
            DispatchResult::changed()
        }

        // ===== Locate actions =====
        Action::LocateRequest => {
            if !state.locate_supported {
                // Terminal state right away, no lookup is issued. The
                // bump invalidates any lookup still in flight.
                state.request_seq += 1;
                state.report = DataResource::Failed(GEO_UNSUPPORTED_MSG.into());
                state.input_hint = None;
                return DispatchResult::changed();
            }
            state.request_seq += 1;
            state.report = DataResource::Loading;
            state.input_hint = None;
            DispatchResult::changed_with(Effect::Locate {
                token: state.request_seq,
            })
        }

        Action::LocateDidResolve { token, lat, lon } => {
            if token != state.request_seq {
                return DispatchResult::unchanged();
            }
            // Same logical lookup continues, so the token is reused.
            DispatchResult::changed_with(Effect::FetchWeather {
                query: WeatherQuery::Coords { lat, lon },
                token,
            })
        }

        Action::LocateDidError { token } => {
            if token != state.request_seq {
                return DispatchResult::unchanged();
            }
            state.report = DataResource::Failed(GEO_DENIED_MSG.into());
            DispatchResult::changed()
        }

        // ===== Search actions =====
        Action::SearchQueryChange(input) => {
            state.search_input = input;
            state.input_hint = None;
            DispatchResult::changed()
        }

        Action::SearchQuerySubmit(input) => {
            let city = input.trim();
            if city.is_empty() {
                state.input_hint = Some(EMPTY_SUBMIT_HINT.into());
                return DispatchResult::changed();
            }
            state.input_focus = false;
            begin_lookup(state, WeatherQuery::City(city.to_string()))
        }

        Action::SearchFocus => {
            if state.input_focus {
                return DispatchResult::unchanged();
            }
            state.input_focus = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if !state.input_focus {
                return DispatchResult::unchanged();
            }
            state.input_focus = false;
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.report.is_loading() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
                DispatchResult::changed()
            } else if state.spinner_frame != 0 {
                state.spinner_frame = 0;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Issue a new lookup: next token, loading state, fetch effect
fn begin_lookup(state: &mut AppState, query: WeatherQuery) -> DispatchResult<Effect> {
    state.request_seq += 1;
    state.report = DataResource::Loading;
    state.input_hint = None;
    DispatchResult::changed_with(Effect::FetchWeather {
        query,
        token: state.request_seq,
    })
}
