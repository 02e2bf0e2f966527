//! Header with the bot status values and stream health.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_OFFLINE, COLOR_ONLINE, COLOR_STALE,
};
use crate::app::{App, StreamHealth};
use crate::models::PLACEHOLDER;

pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            " WENBNB Dashboard ",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Paragraph::new(header_line(app)).block(block), area);
}

/// The single content line of the header.
pub(crate) fn header_line(app: &App) -> Line<'static> {
    let status_style = if app.status.is_offline() {
        Style::default().fg(COLOR_OFFLINE).add_modifier(Modifier::BOLD)
    } else if app.status.status == PLACEHOLDER {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default().fg(COLOR_ONLINE).add_modifier(Modifier::BOLD)
    };

    let health = app.stream_health();
    let health_color = match health {
        StreamHealth::Live => COLOR_ONLINE,
        StreamHealth::Stale => COLOR_STALE,
        StreamHealth::Reconnecting => COLOR_OFFLINE,
        StreamHealth::Connecting => COLOR_DIM,
    };

    let label = Style::default().fg(COLOR_DIM);
    let value = Style::default().fg(COLOR_ACCENT);
    let sep = Span::styled("  │  ", Style::default().fg(COLOR_BORDER));

    Line::from(vec![
        Span::styled(" Status: ", label),
        Span::styled(app.status.status.clone(), status_style),
        sep.clone(),
        Span::styled("Uptime: ", label),
        Span::styled(app.status.uptime.clone(), value),
        sep.clone(),
        Span::styled("Users: ", label),
        Span::styled(app.status.users.clone(), value),
        sep,
        Span::styled("Stream: ", label),
        Span::styled(format!("● {}", health.label()), Style::default().fg(health_color)),
    ])
}
