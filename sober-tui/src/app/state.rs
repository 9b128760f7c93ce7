//! UI state
//!
//! Only what the terminal needs to draw itself. Tracked data (anchor and
//! relapse log) lives in the [`libsobriety::Store`] owned by the tracker.

use libsobriety::Config;

use super::actions::Focus;

/// Root UI state, replaced wholesale by the reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    /// Should the application quit?
    pub should_quit: bool,

    /// Panel that currently receives keys
    pub focus: Focus,

    /// Help overlay visible?
    pub help_visible: bool,

    /// Sober-since date field
    pub date_input: DateInputState,

    /// Last store revision seen
    pub revision: u64,

    /// Status bar state
    pub status: StatusBarState,

    /// Error overlay state
    pub error: Option<String>,

    /// UI configuration
    pub config: UiConfig,
}

/// Sober-since date field state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateInputState {
    /// Raw text, expected as YYYY-MM-DD
    pub content: String,

    /// Does `content` parse as a date?
    pub valid: bool,
}

/// Status bar state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBarState {
    pub message: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
    /// Use colors?
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,
}

impl UiConfig {
    /// Derive from file configuration, letting the environment override it
    pub fn from_config(config: &Config) -> Self {
        let colors_enabled = config.tui.colors
            && std::env::var("NO_COLOR").is_err()
            && std::env::var("SOBER_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("SOBER_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(config.tui.tick_rate_ms);

        Self {
            colors_enabled,
            tick_rate_ms,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(UiConfig::default())
    }
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            should_quit: false,
            focus: Focus::Relapses,
            help_visible: false,
            date_input: DateInputState::default(),
            revision: 0,
            status: StatusBarState::default(),
            error: None,
            config,
        }
    }

    /// Any overlay covering the panels?
    pub fn overlay_visible(&self) -> bool {
        self.help_visible || self.error.is_some()
    }

    /// Date field focused and not hidden behind an overlay
    pub fn editing_date(&self) -> bool {
        self.focus == Focus::DatePicker && !self.overlay_visible()
    }

    /// Can the date field be submitted right now?
    pub fn can_submit_date(&self) -> bool {
        self.editing_date() && self.date_input.valid
    }
}
