//! Action buttons.
//!
//! Button positions are recorded on the app each frame so mouse clicks can
//! be mapped back to a command.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_STALE};
use crate::app::App;
use crate::models::ActionCommand;

const BUTTON_GAP: u16 = 1;

pub fn button_label(cmd: ActionCommand) -> String {
    format!(" {} {} ", cmd.hotkey(), cmd.label())
}

pub fn render_action_bar(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(" Actions ", Style::default().fg(COLOR_HEADER)));
    let inner = block.inner(area);
    if inner.height == 0 {
        frame.render_widget(block, area);
        return;
    }

    let mut spans = Vec::new();
    let mut x = inner.x;
    let right = inner.x + inner.width;

    for (index, cmd) in ActionCommand::ALL.iter().enumerate() {
        let label = button_label(*cmd);
        let width = label.width() as u16;
        if x + width > right {
            break;
        }

        let style = if index == app.selected_action {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else if cmd.requires_confirmation() {
            Style::default().fg(COLOR_STALE)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };

        app.action_hit_areas
            .push((Rect::new(x, inner.y, width, 1), *cmd));
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" ".repeat(BUTTON_GAP as usize)));
        x += width + BUTTON_GAP;
    }

    if app.actions_in_flight > 0 {
        spans.push(Span::styled(
            format!(" sending… ({})", app.actions_in_flight),
            Style::default().fg(COLOR_DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
