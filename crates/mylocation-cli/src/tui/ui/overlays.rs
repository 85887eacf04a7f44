//! Overlay rendering: help, clear confirmation and the permission alert.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::{App, PendingAction};

/// Rectangle of the given size centered in `area`, clipped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Draw help overlay with keyboard shortcuts.
pub(super) fn draw_help_overlay(frame: &mut Frame, theme: &AppTheme) {
    let help_area = centered_rect(frame.area(), 46, 16);
    frame.render_widget(Clear, help_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        section("--- Locations ---"),
        shortcut_line("c", "Capture location", theme),
        shortcut_line("x", "Clear all locations", theme),
        shortcut_line("j/k", "Next/Prev record", theme),
        Line::from(""),
        section("--- Display ---"),
        shortcut_line("t/d", "Toggle dark mode", theme),
        shortcut_line("?", "Toggle help", theme),
        shortcut_line("Click", "Press a button or switch", theme),
        Line::from(""),
        shortcut_line("q", "Quit", theme),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let help = Paragraph::new(lines)
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(theme.border_active_style())
                .title(Span::styled(" Keyboard Shortcuts ", theme.title_style())),
        );
    frame.render_widget(help, help_area);
}

/// Create a shortcut line with key and description.
fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>8} ", key), Style::default().fg(theme.warning)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}

/// Draw confirmation dialog for the pending action.
pub(super) fn draw_confirmation_dialog(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let Some(action) = &app.pending_confirmation else {
        return;
    };

    let message = match action {
        PendingAction::ClearLocations => {
            format!("Delete all {} saved locations?", app.locations.len())
        }
    };

    let dialog_area = centered_rect(frame.area(), 40, 6);
    frame.render_widget(Clear, dialog_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default().fg(theme.text_primary),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " [Y]es ",
                Style::default()
                    .fg(theme.success)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                " [N]o ",
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.warning))
                .title(Span::styled(
                    " Confirm ",
                    Style::default()
                        .fg(theme.warning)
                        .add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(dialog, dialog_area);
}

/// Draw the blocking alert, if any.
pub(super) fn draw_alert(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let Some(message) = &app.alert else {
        return;
    };

    let alert_area = centered_rect(frame.area(), 36, 7);
    frame.render_widget(Clear, alert_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.as_str(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", theme.key_style()),
            Span::styled(" OK", Style::default().fg(theme.text_muted)),
        ]),
    ];

    let alert = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(theme.base_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(theme.danger))
                .title(Span::styled(
                    " Alert ",
                    Style::default()
                        .fg(theme.danger)
                        .add_modifier(Modifier::BOLD),
                )),
        );

    frame.render_widget(alert, alert_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        assert_eq!(centered_rect(area, 40, 10), Rect::new(30, 20, 40, 10));
    }

    #[test]
    fn test_centered_rect_clips_to_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(area, 40, 10);
        assert_eq!(rect.width, 18);
        assert_eq!(rect.height, 3);
        assert!(area.contains(rect.as_position()));
    }
}
