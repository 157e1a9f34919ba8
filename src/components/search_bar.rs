use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;

pub const SEARCH_PLACEHOLDER: &str = "Enter city name...";

/// City name input with a one-line feedback slot below it
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub value: &'a str,
    pub hint: Option<&'a str>,
    pub is_focused: bool,
    // Action constructors
    pub on_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        // Submit and leave are handled here; everything else is editing
        match key.code {
            KeyCode::Esc => return vec![Action::SearchBlur],
            KeyCode::Enter => return vec![(props.on_submit)(props.value.to_string())],
            _ => {}
        }

        let input_props = TextInputProps {
            value: props.value,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: true,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Input box
            Constraint::Length(1), // Feedback line
        ])
        .split(area);

        let border = if props.is_focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(chunks[0]);
        frame.render_widget(block, chunks[0]);

        let input_props = TextInputProps {
            value: props.value,
            placeholder: SEARCH_PLACEHOLDER,
            is_focused: props.is_focused,
            style: TextInputStyle {
                base: BaseStyle {
                    border: None,
                    padding: Padding::xy(1, 0),
                    bg: None,
                    fg: None,
                },
                placeholder_style: None,
                cursor_style: None,
            },
            on_change: props.on_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, inner, input_props);

        if let Some(hint) = props.hint {
            let line = Line::from(vec![Span::styled(
                hint.to_string(),
                Style::default().fg(Color::Yellow),
            )])
            .centered();
            frame.render_widget(Paragraph::new(line), chunks[1]);
        }
    }
}
