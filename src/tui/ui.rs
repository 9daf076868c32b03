//! UI rendering for the TUI
//!
//! This module handles all rendering using ratatui. The rendering is
//! event-driven - we only render when an event triggers a state change, not
//! at a fixed frame rate.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::filter::StatusFilter;
use crate::models::JobApplication;
use crate::tui::app::{App, FormField, ModalState, Toast};
use crate::tui::theme::Theme;

// ============================================================================
// Table Rendering Helpers
// ============================================================================

/// Create a styled table header row from column names
fn create_table_header<'a>(columns: &[&'a str], theme: &Theme) -> Row<'a> {
    let header_cells = columns
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(theme.header_fg).bold()));
    Row::new(header_cells)
        .style(Style::default().bg(theme.header_bg))
        .height(1)
}

/// Render the entire TUI
pub fn render(app: &App, frame: &mut Frame) {
    let theme = Theme::from_name(&app.config.display.theme);
    let area = frame.area();

    // Main layout: title, filter bar, content, status bar
    let layout = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Filter bar
        Constraint::Min(0),    // Application table
        Constraint::Length(2), // Status bar
    ])
    .split(area);

    render_title_bar(app, frame, layout[0], &theme);
    render_filter_bar(app, frame, layout[1], &theme);
    render_applications_table(app, frame, layout[2], &theme);
    render_status_bar(app, frame, layout[3], &theme);

    // Overlays (render in order of z-index)
    match &app.modal {
        ModalState::Help => render_help_overlay(frame, area, &theme),
        ModalState::Search => render_search_overlay(app, frame, area, &theme),
        ModalState::StatusMenu { .. } => render_status_menu(app, frame, area, &theme),
        ModalState::Form(_) => render_form_overlay(app, frame, area, &theme),
        ModalState::ConfirmDelete { .. } => render_confirm_dialog(app, frame, area, &theme),
        ModalState::Detail => render_detail_popup(app, frame, area, &theme),
        ModalState::None => {}
    }

    // Mutation feedback toast (always on top)
    if let Some(toast) = app.feedback.current_toast() {
        render_toast(toast, frame, area, &theme);
    }
}

fn render_title_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" jobtrack ", Style::default().fg(theme.selected_fg).bold()),
        Span::styled(
            format!(" {} ", app.client.jobs_url()),
            Style::default().fg(theme.border),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.header_bg)),
        area,
    );
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let visible = app.visible_indices().len();
    let total = app.data.applications.len();

    let mut spans = vec![Span::styled(" Search: ", Style::default().fg(theme.border))];
    if app.query.is_empty() {
        spans.push(Span::styled("(none)", Style::default().fg(theme.border)));
    } else {
        spans.push(Span::styled(
            app.query.clone(),
            Style::default().fg(theme.accent),
        ));
    }

    spans.push(Span::styled("  Status: ", Style::default().fg(theme.border)));
    let status_style = if app.status_filter == StatusFilter::All {
        Style::default().fg(theme.border)
    } else {
        Style::default().fg(theme.accent)
    };
    spans.push(Span::styled(app.status_filter.label().to_string(), status_style));

    spans.push(Span::styled(
        format!("  [{}/{}]", visible, total),
        Style::default().fg(theme.fg),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_applications_table(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Applications ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = app.visible_indices();

    if visible.is_empty() {
        let msg = if !app.data.is_loaded() {
            "Loading applications..."
        } else if app.data.applications.is_empty() {
            "No applications yet - press 'a' to add one"
        } else {
            "No applications match the current filter"
        };
        let para = Paragraph::new(msg)
            .style(Style::default().fg(theme.border))
            .alignment(Alignment::Center);
        frame.render_widget(para, inner);
        return;
    }

    let header = create_table_header(
        &["ID", "Company", "Title", "Date", "Status", "Location"],
        theme,
    );

    let available_height = inner.height.saturating_sub(1) as usize; // -1 for header
    let selected = app.list_state.selected;
    let scroll_offset = calculate_scroll_offset(selected, available_height, visible.len());

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(available_height)
        .map(|(display_idx, &cache_idx)| {
            let record = &app.data.applications[cache_idx];
            application_to_row(record, display_idx == selected, theme)
        })
        .collect();

    let widths = [
        Constraint::Length(6),  // ID
        Constraint::Min(16),    // Company
        Constraint::Min(16),    // Title
        Constraint::Length(10), // Date
        Constraint::Length(11), // Status
        Constraint::Length(16), // Location
    ];

    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, inner);
}

fn application_to_row<'a>(record: &'a JobApplication, is_selected: bool, theme: &Theme) -> Row<'a> {
    let base_style = if is_selected {
        Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
    } else {
        Style::default().fg(theme.fg)
    };

    let status_style = base_style.fg(theme.status_color(&record.status));

    Row::new(vec![
        Cell::from(record.id.to_string()),
        Cell::from(record.company_name.as_str()),
        Cell::from(record.job_title.as_str()),
        Cell::from(record.date_display()),
        Cell::from(Span::styled(record.status.as_str(), status_style)),
        Cell::from(record.location_display()),
    ])
    .style(base_style)
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let rows = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

    // First row: sticky load error, config warnings, or staleness info
    if let Some(error) = &app.feedback.load_error {
        let para = Paragraph::new(format!(" Backend error: {}", error))
            .style(Style::default().fg(theme.error));
        frame.render_widget(para, rows[0]);
    } else if let Some(warning) = app.feedback.config_warnings.first() {
        let para = Paragraph::new(format!(" Config: {}", warning))
            .style(Style::default().fg(theme.warn));
        frame.render_widget(para, rows[0]);
    }

    // Second row: key hints
    let hints = match &app.modal {
        ModalState::Search => " type to filter | Enter/Esc close",
        ModalState::Form(_) => " Tab/↑↓ fields | ←/→ status | Enter save | Esc cancel",
        ModalState::ConfirmDelete { .. } => " y confirm | n/Esc cancel",
        ModalState::StatusMenu { .. } => " ↑↓ choose | Enter apply | Esc cancel",
        ModalState::Detail => " e edit | Enter/Esc close",
        ModalState::Help => " Esc close",
        ModalState::None => {
            " a add | e edit | d delete | / search | s status | r refresh | c clear | ? help | q quit"
        }
    };
    let para = Paragraph::new(hints).style(Style::default().fg(theme.border));
    frame.render_widget(para, rows[1]);
}

// ============================================================================
// Overlays
// ============================================================================

fn render_help_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Help ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let entries: [(&str, &str); 13] = [
        ("j/k, ↑/↓", "Move selection"),
        ("g/G", "Jump to top/bottom"),
        ("Ctrl+d/u", "Half page down/up"),
        ("Enter", "Show record details"),
        ("a", "Add application"),
        ("e", "Edit selected application"),
        ("d", "Delete selected application"),
        ("/", "Search (filters as you type)"),
        ("s", "Filter by status"),
        ("c", "Clear search and status filter"),
        ("r", "Refresh from backend"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    for (key, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", key), Style::default().fg(theme.accent)),
            Span::raw(description),
        ]));
    }

    let para = Paragraph::new(lines).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);
}

fn render_search_overlay(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4).min(50),
        height: 3,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Search ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let input_text = format!("/{}", app.query);
    let para = Paragraph::new(input_text).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);

    frame.set_cursor_position((inner.x + 1 + app.query.len() as u16, inner.y));
}

fn render_status_menu(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(30, 35, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Filter by Status ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let Some(menu) = app.modal.status_menu() else {
        return;
    };

    let mut lines = vec![Line::from("")];

    for (i, option) in menu.options.iter().enumerate() {
        let is_selected = i == menu.selected;
        let is_current = *option == app.status_filter;

        let prefix = if is_selected { "> " } else { "  " };
        let suffix = if is_current { " *" } else { "" };

        let style = if is_selected {
            Style::default().fg(theme.selected_fg).bg(theme.selected_bg)
        } else if is_current {
            Style::default().fg(theme.accent)
        } else {
            Style::default()
        };

        lines.push(Line::from(Span::styled(
            format!("{}{}{}", prefix, option.label(), suffix),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![Span::styled(
        "  [Enter] Apply  [Esc] Cancel",
        Style::default().fg(theme.border),
    )]));

    let para = Paragraph::new(lines).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);
}

fn render_form_overlay(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let Some(form) = app.modal.form() else {
        return;
    };

    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(format!(" {} ", form.title()));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut lines = vec![Line::from("")];

    for field in FormField::ALL {
        let focused = field == form.focused;
        let label_style = if focused {
            Style::default().fg(theme.accent).bold()
        } else {
            Style::default().fg(theme.border)
        };

        let value = form.field_value(field);
        let value_span = if field == FormField::Status {
            let marker = if focused { "< {} >" } else { "  {}" };
            Span::styled(
                marker.replace("{}", value),
                Style::default().fg(theme.status_color(&form.status)),
            )
        } else {
            let cursor = if focused { "_" } else { "" };
            Span::styled(format!("{}{}", value, cursor), Style::default().fg(theme.fg))
        };

        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", field.label()), label_style),
            value_span,
        ]));
        lines.push(Line::from(""));
    }

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
    } else if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Saving...",
            Style::default().fg(theme.warn),
        )));
    }

    let para = Paragraph::new(lines).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);
}

fn render_confirm_dialog(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let popup_area = centered_rect(50, 25, area);
    frame.render_widget(Clear, popup_area);

    let ModalState::ConfirmDelete { id, company } = &app.modal else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.warn))
        .title(" Confirm Delete ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(
                format!("Delete application #{} ({})?", id, company),
                Style::default().bold(),
            ),
        ]),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Press "),
            Span::styled("[y/Enter]", Style::default().fg(theme.warn).bold()),
            Span::raw(" to confirm, "),
            Span::styled("[n/Esc]", Style::default().fg(theme.border).bold()),
            Span::raw(" to cancel"),
        ]),
    ];

    let para = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg))
        .alignment(Alignment::Left);
    frame.render_widget(para, inner);
}

fn render_detail_popup(app: &App, frame: &mut Frame, area: Rect, theme: &Theme) {
    let Some(record) = app.selected_application() else {
        return;
    };

    let popup_area = centered_rect(60, 55, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(format!(" Application #{} ", record.id));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let detail_line = |label: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", label), Style::default().fg(theme.border)),
            Span::styled(value, style),
        ])
    };

    let fg = Style::default().fg(theme.fg);
    let lines = vec![
        Line::from(""),
        detail_line("Company", record.company_name.clone(), fg),
        detail_line("Title", record.job_title.clone(), fg),
        detail_line("Date", record.date_display(), fg),
        detail_line(
            "Status",
            record.status.as_str().to_string(),
            Style::default().fg(theme.status_color(&record.status)),
        ),
        detail_line("Location", record.location_display().to_string(), fg),
        detail_line(
            "Notes",
            record.notes.clone().unwrap_or_default(),
            fg,
        ),
    ];

    let para = Paragraph::new(lines).style(Style::default().fg(theme.fg));
    frame.render_widget(para, inner);
}

/// Render mutation feedback toast
fn render_toast(toast: &Toast, frame: &mut Frame, area: Rect, theme: &Theme) {
    // Position toast at bottom-right
    let toast_width = (toast.message.len() + 4).min(50) as u16;
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(5),
        width: toast_width,
        height: 3,
    };

    frame.render_widget(Clear, toast_area);

    let border_color = if toast.success {
        theme.success
    } else {
        theme.error
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let para = Paragraph::new(format!(" {} ", toast.message))
        .block(block)
        .style(Style::default().fg(theme.fg))
        .alignment(Alignment::Center);

    frame.render_widget(para, toast_area);
}

// ============================================================================
// Geometry Helpers
// ============================================================================

/// Calculate scroll offset to keep selection visible
fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if visible_height == 0 || total == 0 {
        return 0;
    }

    if selected < visible_height / 2 {
        0
    } else if selected > total.saturating_sub(visible_height / 2) {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(visible_height / 2)
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_top_region() {
        assert_eq!(calculate_scroll_offset(0, 10, 100), 0);
        assert_eq!(calculate_scroll_offset(4, 10, 100), 0);
    }

    #[test]
    fn test_scroll_offset_middle_keeps_selection_centered() {
        assert_eq!(calculate_scroll_offset(50, 10, 100), 45);
    }

    #[test]
    fn test_scroll_offset_bottom_region() {
        assert_eq!(calculate_scroll_offset(99, 10, 100), 90);
    }

    #[test]
    fn test_scroll_offset_degenerate() {
        assert_eq!(calculate_scroll_offset(5, 0, 100), 0);
        assert_eq!(calculate_scroll_offset(0, 10, 0), 0);
    }

    #[test]
    fn test_centered_rect_fits_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);
        assert!(popup.width <= area.width);
        assert!(popup.height <= area.height);
        assert!(popup.x >= area.x);
        assert!(popup.y >= area.y);
    }
}
