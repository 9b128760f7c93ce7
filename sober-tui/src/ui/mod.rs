//! UI rendering
//!
//! Render functions take UI state plus a snapshot of tracked state and draw
//! a frame. They never dispatch.

pub mod date_picker;

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use libsobriety::SobrietyState;

use crate::app::{AppState, Focus};
use crate::elapsed::{format_elapsed, streak_days};
use date_picker::DatePicker;

/// Render the whole screen
pub fn render(
    frame: &mut Frame,
    state: &AppState,
    tracked: &SobrietyState,
    picker: &DatePicker,
    now: DateTime<Utc>,
) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(rows[0]);

    render_sober_panel(frame, columns[0], state, tracked, picker);
    render_clean_panel(frame, columns[1], state, tracked, now);
    render_relapse_panel(frame, columns[2], state, tracked);
    render_status_bar(frame, rows[1], state);

    if state.help_visible {
        render_help_overlay(frame, area, state);
    }

    if let Some(ref error) = state.error {
        render_error_overlay(frame, area, error, state);
    }
}

fn styled(state: &AppState, style: Style) -> Style {
    if state.config.colors_enabled {
        style
    } else {
        Style::default()
    }
}

fn panel<'a>(title: &'a str, focused: bool, state: &AppState) -> Block<'a> {
    let border = if focused {
        styled(state, Style::default().fg(Color::Cyan))
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border)
}

fn render_sober_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    tracked: &SobrietyState,
    picker: &DatePicker,
) {
    let block = panel(" Sober ", state.focus == Focus::DatePicker, state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    picker.render(frame, chunks[0]);

    let anchor = match tracked.time_sober {
        Some(ts) => format!(
            "Since {}",
            ts.with_timezone(&Local).format("%a, %d %b %Y %H:%M")
        ),
        None => "No date set".to_string(),
    };
    let hint = if state.can_submit_date() {
        "Enter: save | Esc: back"
    } else if state.editing_date() {
        "Esc: back"
    } else {
        "d: edit date"
    };

    let text = Paragraph::new(vec![
        Line::from(anchor),
        Line::from(""),
        Line::from(Span::styled(hint, styled(state, Style::default().fg(Color::Gray)))),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[1]);
}

fn render_clean_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    tracked: &SobrietyState,
    now: DateTime<Utc>,
) {
    let block = panel(" Clean ", false, state);

    let lines = match tracked.time_sober {
        Some(since) => {
            let days = streak_days(Some(since), now).unwrap_or(0);
            vec![
                Line::from(""),
                Line::from(Span::styled(
                    format_elapsed(since, now),
                    styled(state, Style::default().fg(Color::Green)).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("{} {}", days, if days == 1 { "day" } else { "days" })),
            ]
        }
        // Nothing to count from yet
        None => Vec::new(),
    };

    let text = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

fn render_relapse_panel(frame: &mut Frame, area: Rect, state: &AppState, tracked: &SobrietyState) {
    let title = format!(" Relapses ({}) ", tracked.relapses.len());
    let block = panel(&title, state.focus == Focus::Relapses, state);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    // Newest entries stay visible when the log outgrows the panel
    let visible = chunks[0].height as usize;
    let skip = tracked.relapses.len().saturating_sub(visible);
    let items: Vec<ListItem> = tracked
        .relapses
        .iter()
        .skip(skip)
        .map(|relapse| ListItem::new(relapse.time.as_str()))
        .collect();
    frame.render_widget(List::new(items), chunks[0]);

    let button = Paragraph::new(Line::from(Span::styled(
        " [r] Relapse ",
        styled(
            state,
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
    )));
    frame.render_widget(button, chunks[1]);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = match state.status.message {
        Some(ref message) => Line::from(Span::styled(
            message.as_str(),
            styled(state, Style::default().fg(Color::Green)),
        )),
        None => Line::from(Span::styled(
            "r: Relapse | d: Sober date | F1: Help | q: Quit",
            styled(state, Style::default().fg(Color::Gray)),
        )),
    };

    let status = Paragraph::new(text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Global:"),
        Line::from("  q / Ctrl+C - Quit"),
        Line::from("  F1         - Toggle help"),
        Line::from("  Esc        - Dismiss overlays / leave date field"),
        Line::from(""),
        Line::from("Relapses:"),
        Line::from("  r          - Record a relapse today"),
        Line::from("  d / Tab    - Edit sober date"),
        Line::from(""),
        Line::from("Sober date:"),
        Line::from("  0-9, -     - Type YYYY-MM-DD"),
        Line::from("  Enter      - Save"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Cyan))),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

fn render_error_overlay(frame: &mut Frame, area: Rect, error: &str, state: &AppState) {
    let width = area.width * 60 / 100;
    let inner_width = usize::from(width.saturating_sub(2)).max(1);
    let message_rows = wrapped_rows(error, inner_width);
    // Title, blank, message, blank, hint, plus the border
    let height = u16::try_from(message_rows + 6).unwrap_or(u16::MAX).max(ERROR_MIN_HEIGHT);
    let popup_area = centered_popup(60, height, area);

    let error_text = vec![
        Line::from(Span::styled(
            "Error",
            styled(state, Style::default().fg(Color::Red)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(error),
        Line::from(""),
        Line::from("Press Esc to dismiss"),
    ];

    let widget = Paragraph::new(error_text)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(styled(state, Style::default().fg(Color::Red))),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(widget, popup_area);
}

const ERROR_MIN_HEIGHT: u16 = 7;

/// Rows `text` needs when word-wrapped to `width`, with one spare row once it wraps
fn wrapped_rows(text: &str, width: usize) -> usize {
    let mut rows = 1;
    let mut used = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };

        if needed <= width {
            used = needed;
        } else {
            rows += 1;
            used = len % width;
            rows += len / width;
        }
    }

    if rows > 1 {
        rows + 1
    } else {
        rows
    }
}

/// Rectangle of the given percentage size centered in `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    centered_columns(percent_x, popup_layout[1])
}

/// Rectangle `height` rows tall (clamped to `r`) centered in `r`
fn centered_popup(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(r.height)),
            Constraint::Fill(1),
        ])
        .split(r);

    centered_columns(percent_x, popup_layout[1])
}

fn centered_columns(percent_x: u16, r: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(r)[1]
}
