//! UI rendering for the dashboard.
//!
//! Layout, top to bottom:
//! - Header with status, uptime, users and stream health
//! - Live feed, newest first
//! - Action bar
//! - Key hints
//!
//! A confirmation dialog is drawn last, on top of everything else.

mod action_bar;
mod confirm;
mod header;
mod log_feed;
mod theme;

pub use action_bar::button_label;
pub use confirm::centered_rect;
pub use theme::{
    level_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_HEADER,
    COLOR_OFFLINE, COLOR_ONLINE, COLOR_STALE,
};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use action_bar::render_action_bar;
use confirm::render_confirm_dialog;
use header::render_header;
use log_feed::render_feed;

/// Render the whole dashboard.
///
/// Takes `&mut App` because the action bar records its button hit areas.
pub fn render(frame: &mut Frame, app: &mut App) {
    app.action_hit_areas.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_feed(frame, chunks[1], app);
    render_action_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    if let Some(cmd) = app.pending_confirmation {
        render_confirm_dialog(frame, frame.area(), cmd);
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hint = if app.pending_confirmation.is_some() {
        " y/⏎ confirm  n/esc cancel"
    } else {
        " 1-6 action  ←/→ select  ⏎ run  r refresh  ↑/↓ scroll  q quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(hint, Style::default().fg(COLOR_DIM)))),
        area,
    );
}
