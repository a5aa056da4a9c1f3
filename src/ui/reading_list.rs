//! Reading list screen rendering
//!
//! Renders the list of titles the user is behind on, closest to caught up
//! first, with a summary header and a key hint footer.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use mangalag::data::OutdatedEntry;
use mangalag::format::{clean_number, DEFAULT_PRECISION};

use crate::app::App;

/// Parses a `#RRGGBB` colour, as used by the cover image accent colour
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

/// Renders the whole reading list screen
pub fn render_reading_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(3),    // Entries
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);

    if app.entries().is_empty() {
        render_empty(frame, app, chunks[1]);
    } else {
        render_list(frame, app, chunks[1]);
    }

    render_help(frame, chunks[2]);
}

/// Renders title, totals and refresh status
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut summary = vec![
        Span::styled(
            "MANGALAG",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(app.username.clone(), Style::default().fg(Color::White)),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} titles, {} chapters behind",
                app.entries().len(),
                clean_number(app.chapters_behind(), DEFAULT_PRECISION)
            ),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if app.is_loading() {
        summary.push(Span::raw("  "));
        summary.push(Span::styled(
            "Refreshing...",
            Style::default().fg(Color::Cyan),
        ));
    } else if let Some(last) = app.last_refresh() {
        summary.push(Span::raw("  "));
        summary.push(Span::styled(
            format!("Updated {}", last.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let separator = "─".repeat(area.width.saturating_sub(2) as usize);
    let lines = vec![
        Line::from(summary),
        Line::from(Span::styled(separator, Style::default().fg(Color::DarkGray))),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

/// Builds one list row: chapters left, title, read/total
fn entry_line(entry: &OutdatedEntry) -> Line<'static> {
    let title_color = parse_hex_color(&entry.color).unwrap_or(Color::White);
    Line::from(vec![
        Span::styled(
            format!("{:>7} ", format!("+{}", clean_number(entry.chapters_left, DEFAULT_PRECISION))),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(entry.title.clone(), Style::default().fg(title_color)),
        Span::styled(
            format!(
                "  {}/{}",
                clean_number(entry.chapters_read, DEFAULT_PRECISION),
                clean_number(entry.total_chapters, DEFAULT_PRECISION)
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .entries()
        .iter()
        .map(|entry| ListItem::new(entry_line(entry)))
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let message = if app.is_loading() {
        "Loading reading list..."
    } else {
        "All caught up. Press r to refresh."
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, chunks[1]);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" move  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" refresh  "),
        Span::styled("R", Style::default().fg(Color::Yellow)),
        Span::raw(" clear+refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
