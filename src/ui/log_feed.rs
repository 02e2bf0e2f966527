//! The live feed panel.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{level_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::app::App;
use crate::feed::FeedEntry;

/// Badge column width, wide enough for `SUCCESS`.
const BADGE_WIDTH: usize = 7;

pub fn render_feed(frame: &mut Frame, area: Rect, app: &App) {
    let mut title = format!(" Live feed ({}) ", app.feed.len());
    if app.feed_scroll > 0 {
        title = format!(" Live feed ({}, ↓{}) ", app.feed.len(), app.feed_scroll);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(title, Style::default().fg(COLOR_HEADER)));

    let lines: Vec<Line> = if app.feed.is_empty() {
        vec![Line::from(Span::styled(
            " Waiting for log events…",
            Style::default().fg(COLOR_DIM),
        ))]
    } else {
        let visible_rows = area.height.saturating_sub(2) as usize;
        let mut lines = Vec::with_capacity(visible_rows);
        for entry in app.feed.entries().skip(app.feed_scroll) {
            if lines.len() >= visible_rows {
                break;
            }
            lines.extend(entry_lines(entry));
        }
        lines
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Lines for one entry: time, badge and the first message line, then any
/// further message lines indented under the message column.
pub(crate) fn entry_lines(entry: &FeedEntry) -> Vec<Line<'static>> {
    let badge_style = Style::default()
        .fg(level_color(entry.level))
        .add_modifier(Modifier::BOLD);

    let mut prefix = vec![Span::raw(" ")];
    if !entry.time.is_empty() {
        prefix.push(Span::styled(entry.time.clone(), Style::default().fg(COLOR_DIM)));
        prefix.push(Span::raw(" "));
    }
    prefix.push(Span::styled(
        format!("{:<width$}", entry.badge, width = BADGE_WIDTH),
        badge_style,
    ));
    prefix.push(Span::raw(" "));

    let indent: usize = prefix.iter().map(|span| span.content.width()).sum();
    let message = entry.message.replace('\t', "    ");
    let mut message_lines = message.split('\n');

    let first = message_lines.next().unwrap_or_default().to_string();
    prefix.push(Span::styled(first, Style::default().fg(COLOR_ACCENT)));

    let mut lines = vec![Line::from(prefix)];
    for rest in message_lines {
        lines.push(Line::from(vec![
            Span::raw(" ".repeat(indent)),
            Span::styled(rest.to_string(), Style::default().fg(COLOR_ACCENT)),
        ]));
    }
    lines
}
