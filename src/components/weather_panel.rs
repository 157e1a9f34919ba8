use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, ReportView, ReportViewProps};
use crate::action::Action;
use crate::state::AppState;

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

const APP_TITLE: &str = "Weather App";

/// Props for WeatherPanel - read-only view of state
pub struct WeatherPanelProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The main panel: title, report body and key hints.
///
/// The search bar renders into the slot `search_area` reserves; the
/// app wires it up separately so key routing can target it directly.
#[derive(Default)]
pub struct WeatherPanel;

fn panel_chunks(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Length(4), // Search bar + feedback line
        Constraint::Min(1),    // Report body
        Constraint::Length(1), // Help bar
    ])
    .split(area)
}

/// Slot the search bar occupies inside the panel
pub fn search_area(area: Rect) -> Rect {
    panel_chunks(area)[1]
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Char('/') => Some(Action::SearchFocus),
                KeyCode::Char('l') => Some(Action::LocateRequest),
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherPanelProps<'_>) {
        let chunks = panel_chunks(area);

        let title = Line::from(vec![Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).bold(),
        )])
        .centered();
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let mut report = ReportView;
        report.render(frame, chunks[2], ReportViewProps { state: props.state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("/", "search"),
                    StatusBarHint::new("l", "locate"),
                    StatusBarHint::new("q", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
