pub mod report_view;
pub mod search_bar;
pub mod weather_panel;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use report_view::{ERROR_HINT, LOADING_MSG, ReportView, ReportViewProps};
pub use search_bar::{SEARCH_PLACEHOLDER, SearchBar, SearchBarProps};
pub use weather_panel::{ERROR_ICON, WeatherPanel, WeatherPanelProps, search_area};
