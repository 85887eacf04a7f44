//! Layout and rendering for the location screen.
//!
//! Top to bottom:
//!
//! - **Header**: title, provider, theme indicator, spinner while capturing
//! - **Dark mode row**: label and `[ON]`/`[OFF]` switch
//! - **Buttons**: capture and clear
//! - **Records**: saved locations, newest first
//! - **Status bar**: key hints or the latest status message

pub mod theme;

mod overlays;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use super::app::App;
use theme::{AppTheme, BORDER_TYPE};

/// Screen title.
pub const TITLE: &str = "My Location BASE";
pub const DARK_MODE_LABEL: &str = "Dark Mode";
pub const CAPTURE_LABEL: &str = "Capturar localização";
pub const CLEAR_LABEL: &str = "Limpar localizações";

const MARKER: &str = "\u{25c9}";

/// Draw the complete TUI interface and record clickable regions in
/// `app.layout`.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.app_theme();
    frame.render_widget(Block::default().style(theme.base_style()), frame.area());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header bar
            Constraint::Length(3), // Dark mode row
            Constraint::Length(3), // Capture button
            Constraint::Length(3), // Clear button
            Constraint::Min(3),    // Records
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app, &theme);
    draw_dark_mode_row(frame, main_layout[1], app, &theme);
    draw_capture_button(frame, main_layout[2], app, &theme);
    draw_clear_button(frame, main_layout[3], &theme);
    draw_locations(frame, main_layout[4], app, &theme);
    draw_status_bar(frame, main_layout[5], app, &theme);

    app.layout.dark_mode_switch = main_layout[1];
    app.layout.capture_button = main_layout[2];
    app.layout.clear_button = main_layout[3];

    if app.show_help {
        overlays::draw_help_overlay(frame, &theme);
    }

    overlays::draw_confirmation_dialog(frame, app, &theme);
    overlays::draw_alert(frame, app, &theme);
}

/// Draw the header bar with title and indicators.
fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let mut spans = vec![
        Span::styled(format!(" {} ", TITLE), theme.title_style()),
        Span::styled(
            format!(" {} ", app.provider_name),
            Style::default().fg(theme.text_muted),
        ),
    ];

    if app.is_loading {
        spans.push(Span::styled(
            format!(" {} ", app.spinner_char()),
            Style::default().fg(theme.primary),
        ));
    }

    if app.dark_mode {
        spans.push(Span::styled(" DARK ", Style::default().fg(theme.info)));
    } else {
        spans.push(Span::styled(" LIGHT ", Style::default().fg(theme.warning)));
    }

    let header = Paragraph::new(Line::from(spans)).style(theme.header_style());
    frame.render_widget(header, area);
}

fn draw_dark_mode_row(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let switch = if app.dark_mode {
        Span::styled(
            "[ON] ",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[OFF]", Style::default().fg(theme.text_muted))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(6)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", DARK_MODE_LABEL),
            Style::default().fg(theme.text_primary),
        )),
        row[0],
    );
    frame.render_widget(Paragraph::new(switch).alignment(Alignment::Right), row[1]);
}

fn draw_capture_button(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let label = if app.is_loading {
        format!("{} {}", app.spinner_char(), CAPTURE_LABEL)
    } else {
        CAPTURE_LABEL.to_string()
    };

    // Contained style: filled with the primary color.
    let button = Paragraph::new(Span::styled(
        label,
        Style::default()
            .fg(theme.bg)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_active_style())
            .style(Style::default().bg(theme.primary)),
    );
    frame.render_widget(button, area);
}

fn draw_clear_button(frame: &mut Frame, area: Rect, theme: &AppTheme) {
    // Outlined style.
    let button = Paragraph::new(Span::styled(
        CLEAR_LABEL,
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(theme.border_active_style()),
    );
    frame.render_widget(button, area);
}

fn draw_locations(frame: &mut Frame, area: Rect, app: &mut App, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_inactive_style())
        .title(Span::styled(
            format!(" Locations ({}) ", app.locations.len()),
            theme.title_style(),
        ));
    let inner = block.inner(area);
    app.layout.list = inner;

    if app.locations.is_empty() {
        app.layout.list_offset = 0;
        let empty = Paragraph::new(Line::from(vec![
            Span::styled("No locations yet. Press ", Style::default().fg(theme.text_muted)),
            Span::styled("c", theme.key_style()),
            Span::styled(" to capture one.", Style::default().fg(theme.text_muted)),
        ]))
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .locations
        .iter()
        .map(|record| {
            // Two rows per record; mouse hit-testing relies on it.
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!(" {} ", MARKER), Style::default().fg(theme.primary)),
                    Span::styled(record.title(), Style::default().fg(theme.text_primary)),
                ]),
                Line::from(Span::styled(
                    format!("   {}", record.description()),
                    Style::default().fg(theme.text_secondary),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.selected_style());

    let mut state = ListState::default()
        .with_offset(app.layout.list_offset)
        .with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
    app.layout.list_offset = state.offset();
}

/// Get context-sensitive help hints based on current state.
fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.alert.is_some() {
        return vec![("Enter", "dismiss")];
    }
    if app.pending_confirmation.is_some() {
        return vec![("y", "confirm"), ("n", "cancel")];
    }

    let mut hints = vec![("?", "help")];
    if !app.is_loading {
        hints.push(("c", "capture"));
    }
    if !app.locations.is_empty() {
        hints.push(("x", "clear"));
        hints.push(("j/k", "select"));
    }
    hints.push(("t", "theme"));
    hints.push(("q", "quit"));
    hints
}

/// Draw the status bar with context-sensitive help.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let time_str = Local::now().format("%H:%M:%S").to_string();

    let left_spans = if app.is_loading {
        vec![
            Span::styled(
                format!(" {} ", app.spinner_char()),
                Style::default().fg(theme.primary),
            ),
            Span::styled(
                "Capturing location...",
                Style::default().fg(theme.text_secondary),
            ),
        ]
    } else if let Some(msg) = app.current_status_message() {
        vec![Span::styled(
            format!(" {}", msg),
            Style::default().fg(theme.text_secondary),
        )]
    } else {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in context_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(*key, theme.key_style()));
            spans.push(Span::styled(
                format!(" {}", desc),
                Style::default().fg(theme.text_muted),
            ));
        }
        spans
    };

    let status_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), status_layout[0]);
    frame.render_widget(
        Paragraph::new(time_str)
            .style(Style::default().fg(theme.text_muted))
            .alignment(Alignment::Right),
        status_layout[1],
    );
}
