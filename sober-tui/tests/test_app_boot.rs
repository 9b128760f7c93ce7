//! Test application initialization
//!
//! Verifies that the app initializes with correct defaults
//! based on configuration and environment variables.

use libsobriety::Config;
use serial_test::serial;
use sober_tui::app::{AppState, Focus, UiConfig};

#[test]
fn test_app_starts_on_relapse_panel() {
    let state = AppState::new();

    assert_eq!(state.focus, Focus::Relapses);
    assert!(!state.should_quit);
    assert_eq!(state.revision, 0);
}

#[test]
fn test_no_overlays_on_boot() {
    let state = AppState::new();

    assert!(!state.help_visible);
    assert!(state.error.is_none());
    assert!(!state.overlay_visible());
}

#[test]
fn test_date_field_starts_empty_and_invalid() {
    let state = AppState::new();

    assert_eq!(state.date_input.content, "");
    assert!(!state.date_input.valid);
    assert!(!state.can_submit_date());
}

#[test]
#[serial]
fn test_colors_disabled_with_no_color_env() {
    std::env::set_var("NO_COLOR", "1");
    let config = UiConfig::default();
    std::env::remove_var("NO_COLOR");

    assert!(!config.colors_enabled);
}

#[test]
#[serial]
fn test_colors_disabled_with_sober_tui_no_color_env() {
    std::env::set_var("SOBER_TUI_NO_COLOR", "1");
    let config = UiConfig::default();
    std::env::remove_var("SOBER_TUI_NO_COLOR");

    assert!(!config.colors_enabled);
}

#[test]
#[serial]
fn test_colors_disabled_in_config_file() {
    std::env::remove_var("NO_COLOR");
    std::env::remove_var("SOBER_TUI_NO_COLOR");
    let mut config = Config::default();
    config.tui.colors = false;

    assert!(!UiConfig::from_config(&config).colors_enabled);
}

#[test]
#[serial]
fn test_tick_rate_from_env() {
    std::env::set_var("SOBER_TUI_TICK_MS", "500");
    let config = UiConfig::default();
    std::env::remove_var("SOBER_TUI_TICK_MS");

    assert_eq!(config.tick_rate_ms, 500);
}

#[test]
#[serial]
fn test_tick_rate_env_zero_is_ignored() {
    std::env::set_var("SOBER_TUI_TICK_MS", "0");
    let config = UiConfig::default();
    std::env::remove_var("SOBER_TUI_TICK_MS");

    assert_eq!(config.tick_rate_ms, 250);
}

#[test]
#[serial]
fn test_tick_rate_from_config() {
    std::env::remove_var("SOBER_TUI_TICK_MS");
    let mut config = Config::default();
    config.tui.tick_rate_ms = 1000;

    assert_eq!(UiConfig::from_config(&config).tick_rate_ms, 1000);
}
