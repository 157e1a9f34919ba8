//! Weather panel TUI

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};
use weatherpanel::action::Action;
use weatherpanel::api::{self, LOCATE_ENDPOINT, ProviderConfig, WEATHER_ENDPOINT};
use weatherpanel::components::{
    Component, SearchBar, SearchBarProps, WeatherPanel, WeatherPanelProps, search_area,
};
use weatherpanel::effect::Effect;
use weatherpanel::reducer::reducer;
use weatherpanel::state::{AppState, SPINNER_TICK_MS, WeatherQuery};

/// Weather panel TUI
#[derive(Parser, Debug)]
#[command(name = "weatherpanel")]
#[command(about = "Current weather for a city, in the terminal")]
struct Args {
    /// City looked up on startup
    #[arg(long, short, default_value = "London")]
    city: String,

    /// OpenWeatherMap API key (falls back to OPENWEATHER_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Weather endpoint override
    #[arg(long, default_value = WEATHER_ENDPOINT)]
    endpoint: String,

    /// Disable the position lookup bound to 'l'
    #[arg(long)]
    no_locate: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum PanelComponentId {
    Panel,
    Search,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum PanelContext {
    Main,
    Search,
}

impl EventRoutingState<PanelComponentId, PanelContext> for AppState {
    fn focused(&self) -> Option<PanelComponentId> {
        if self.input_focus {
            Some(PanelComponentId::Search)
        } else {
            Some(PanelComponentId::Panel)
        }
    }

    fn modal(&self) -> Option<PanelComponentId> {
        if self.input_focus {
            Some(PanelComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: PanelComponentId) -> PanelContext {
        match id {
            PanelComponentId::Panel => PanelContext::Main,
            PanelComponentId::Search => PanelContext::Search,
        }
    }

    fn default_context(&self) -> PanelContext {
        PanelContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        endpoint,
        no_locate,
        debug: debug_args,
    } = Args::parse();

    // The key comes from the flag or the environment, never from the binary.
    let Some(api_key) = api_key.or_else(|| std::env::var("OPENWEATHER_API_KEY").ok()) else {
        eprintln!("Error: no OpenWeatherMap API key configured.");
        eprintln!("Pass --api-key <KEY> or set the OPENWEATHER_API_KEY environment variable.");
        std::process::exit(1);
    };

    let config = ProviderConfig {
        endpoint,
        api_key,
        locate_endpoint: LOCATE_ENDPOINT.to_string(),
    };

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let mut state = debug
        .load_state_or_else_async(|| async move { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;

    // CLI flags win over whatever a loaded debug state says
    state.locate_supported = !no_locate;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, city, config, replay_actions).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct PanelUi {
    panel: WeatherPanel,
    search: SearchBar,
}

impl PanelUi {
    fn new() -> Self {
        Self {
            panel: WeatherPanel,
            search: SearchBar::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<PanelComponentId>,
    ) {
        event_ctx.set_component_area(PanelComponentId::Panel, area);
        let search_slot = search_area(area);
        event_ctx.set_component_area(PanelComponentId::Search, search_slot);

        let props = WeatherPanelProps {
            state,
            is_focused: render_ctx.is_focused() && !state.input_focus,
        };
        self.panel.render(frame, area, props);

        let props = SearchBarProps {
            value: &state.search_input,
            hint: state.input_hint.as_deref(),
            is_focused: state.input_focus,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchQuerySubmit,
        };
        self.search.render(frame, search_slot, props);
    }

    fn handle_panel_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherPanelProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.panel.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = SearchBarProps {
            value: &state.search_input,
            hint: state.input_hint.as_deref(),
            is_focused: true,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchQuerySubmit,
        };
        let actions: Vec<_> = self.search.handle_event(event, props).into_iter().collect();
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    city: String,
    config: ProviderConfig,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let config = Arc::new(config);
    let ui = Rc::new(RefCell::new(PanelUi::new()));
    let mut bus: EventBus<AppState, Action, PanelComponentId, PanelContext> = EventBus::new();
    let keybindings: Keybindings<PanelContext> = Keybindings::new();

    let ui_panel = Rc::clone(&ui);
    bus.register(PanelComponentId::Panel, move |event, state| {
        ui_panel.borrow_mut().handle_panel_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(PanelComponentId::Search, move |event, state| {
        ui_search
            .borrow_mut()
            .handle_search_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::WeatherFetch(WeatherQuery::City(city))),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, config.clone()),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: Arc<ProviderConfig>) {
    match effect {
        Effect::FetchWeather { query, token } => {
            // Re-spawning under the same key drops any lookup still in flight;
            // the token guard in the reducer covers whatever slips through.
            ctx.tasks().spawn("weather", async move {
                match api::fetch_current(&config, &query).await {
                    Ok(report) => Action::WeatherDidLoad { token, report },
                    Err(e) => Action::WeatherDidError {
                        token,
                        message: e.to_string(),
                    },
                }
            });
        }
        Effect::Locate { token } => {
            let endpoint = config.locate_endpoint.clone();
            ctx.tasks().spawn("locate", async move {
                match api::locate_position(&endpoint).await {
                    Ok(pos) => Action::LocateDidResolve {
                        token,
                        lat: pos.lat,
                        lon: pos.lon,
                    },
                    Err(_) => Action::LocateDidError { token },
                }
            });
        }
    }
}
