use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tui_dispatch::DataResource;

use super::{Component, ERROR_ICON};
use crate::action::Action;
use crate::icons::condition_glyph;
use crate::state::{AppState, WeatherReport};

pub const LOADING_MSG: &str = "Loading weather data...";
pub const ERROR_HINT: &str = "Please check the city name and try again.";

const FEELS_LIKE_ICON: &str = "\u{1f321}\u{fe0f}";
const HUMIDITY_ICON: &str = "\u{1f4a7}";
const WIND_ICON: &str = "\u{1f4a8}";
const VISIBILITY_ICON: &str = "\u{1f441}\u{fe0f}";

/// Renders whatever the current lookup produced
pub struct ReportView;

pub struct ReportViewProps<'a> {
    pub state: &'a AppState,
}

impl Component<Action> for ReportView {
    type Props<'a> = ReportViewProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        match &props.state.report {
            DataResource::Empty => render_idle_hint(frame, area),
            DataResource::Loading => render_loading(frame, area, props.state.spinner_frame),
            DataResource::Loaded(report) => render_report(frame, area, report),
            DataResource::Failed(message) => render_error(frame, area, message),
        }
    }
}

fn spinner_glyph(frame: u8) -> char {
    match frame % 4 {
        0 => '|',
        1 => '/',
        2 => '-',
        _ => '\\',
    }
}

fn render_idle_hint(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let hint = Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("/", Style::default().fg(Color::Cyan).bold()),
        Span::styled(" to search for a city", Style::default().fg(Color::DarkGray)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), chunks[0]);
}

fn render_loading(frame: &mut Frame, area: Rect, spinner_frame: u8) {
    let chunks = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .split(area);

    let spinner = spinner_glyph(spinner_frame);
    let line = Line::from(vec![Span::styled(
        format!("{spinner} {LOADING_MSG}"),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(line), chunks[0]);
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // icon
        Constraint::Length(1), // "Error"
        Constraint::Length(1), // message
        Constraint::Length(1), // blank
        Constraint::Length(1), // hint
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(Paragraph::new(Line::from(ERROR_ICON).centered()), chunks[0]);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                "Error",
                Style::default().fg(Color::Red).bold(),
            )])
            .centered(),
        ),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                message.to_string(),
                Style::default().fg(Color::Rgb(200, 100, 100)),
            )])
            .centered(),
        ),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                ERROR_HINT,
                Style::default().fg(Color::DarkGray),
            )])
            .centered(),
        ),
        chunks[4],
    );
}

fn render_report(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // location header
        Constraint::Length(1), // condition description
        Constraint::Length(1), // blank
        Constraint::Length(1), // condition glyph
        Constraint::Max(6),    // temperature (large type)
        Constraint::Length(1), // feels like
        Constraint::Length(1), // blank
        Constraint::Length(4), // detail cards
        Constraint::Length(1), // blank
        Constraint::Length(1), // last updated
    ])
    .flex(Flex::Center)
    .split(area);

    let header = Line::from(vec![Span::styled(
        report.header_label(),
        Style::default().fg(Color::Cyan).bold(),
    )])
    .centered();
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let description = Line::from(vec![Span::styled(
        report.condition_description.clone(),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(description), chunks[1]);

    let glyph = Line::from(condition_glyph(&report.condition_main)).centered();
    frame.render_widget(Paragraph::new(glyph), chunks[3]);

    // Temperature in large type with a temperature-colored gradient
    let temp_text = report.temperature_label();
    let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(temperature_gradient(report.temperature_c));
    frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[4]);

    let feels_like = Line::from(vec![Span::styled(
        format!("Feels like {}", report.feels_like_label()),
        Style::default().fg(Color::Gray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(feels_like), chunks[5]);

    render_detail_cards(frame, chunks[7], report);

    let updated = Line::from(vec![Span::styled(
        format!("Last updated: {}", report.observed_label()),
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    frame.render_widget(Paragraph::new(updated), chunks[9]);
}

fn render_detail_cards(frame: &mut Frame, area: Rect, report: &WeatherReport) {
    let cards = Layout::horizontal([
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
        Constraint::Ratio(1, 4),
    ])
    .split(area);

    render_card(
        frame,
        cards[0],
        FEELS_LIKE_ICON,
        "Feels like",
        report.feels_like_label(),
    );
    render_card(
        frame,
        cards[1],
        HUMIDITY_ICON,
        "Humidity",
        report.humidity_label(),
    );
    render_card(frame, cards[2], WIND_ICON, "Wind Speed", report.wind_label());
    render_card(
        frame,
        cards[3],
        VISIBILITY_ICON,
        "Visibility",
        report.visibility_label(),
    );
}

fn render_card(frame: &mut Frame, area: Rect, icon: &str, label: &str, value: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(inner);
    frame.render_widget(
        Paragraph::new(
            Line::from(vec![Span::styled(
                format!("{icon} {label}"),
                Style::default().fg(Color::DarkGray),
            )])
            .centered(),
        ),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(value, Style::default().bold())]).centered()),
        rows[1],
    );
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn loaded_state() -> AppState {
        AppState {
            report: DataResource::Loaded(WeatherReport {
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
            }),
            ..Default::default()
        }
    }

    fn render_state(state: &AppState) -> String {
        let mut render = RenderHarness::new(64, 22);
        let mut component = ReportView;
        render.render_to_string_plain(|frame| {
            component.render(frame, frame.area(), ReportViewProps { state });
        })
    }

    #[test]
    fn test_spinner_glyph_cycles() {
        assert_eq!(spinner_glyph(0), '|');
        assert_eq!(spinner_glyph(1), '/');
        assert_eq!(spinner_glyph(2), '-');
        assert_eq!(spinner_glyph(3), '\\');
        assert_eq!(spinner_glyph(4), '|');
    }

    #[test]
    fn test_render_loading_message() {
        let state = AppState {
            report: DataResource::Loading,
            ..Default::default()
        };
        let output = render_state(&state);
        assert!(output.contains(LOADING_MSG));
    }

    #[test]
    fn test_render_error_with_hint() {
        let state = AppState {
            report: DataResource::Failed("city not found".into()),
            ..Default::default()
        };
        let output = render_state(&state);
        assert!(output.contains("city not found"));
        assert!(output.contains(ERROR_HINT));
    }

    #[test]
    fn test_render_report_details() {
        let output = render_state(&loaded_state());

        assert!(output.contains("Paris, FR"));
        assert!(output.contains("scattered clouds"));
        assert!(output.contains("Feels like"));
        assert!(output.contains("65%"));
        assert!(output.contains("3.6 m/s"));
        assert!(output.contains("10.0 km"));
        assert!(output.contains("Last updated:"));
    }

    #[test]
    fn test_render_idle_shows_search_hint() {
        let output = render_state(&AppState::default());
        assert!(output.contains("to search for a city"));
    }
}
