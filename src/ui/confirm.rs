//! Yes/no dialog shown before a guarded command is sent.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_DIALOG_BG, COLOR_DIM, COLOR_STALE};
use crate::models::ActionCommand;

const DIALOG_WIDTH: u16 = 36;
const DIALOG_HEIGHT: u16 = 5;

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render_confirm_dialog(frame: &mut Frame, area: Rect, cmd: ActionCommand) {
    let prompt = cmd.confirmation_prompt().unwrap_or("Are you sure?");
    let dialog = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_STALE))
        .title(" Confirm ")
        .style(Style::default().bg(COLOR_DIALOG_BG));

    let lines = vec![
        Line::from(Span::styled(
            prompt,
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" Yes    ", Style::default().fg(COLOR_DIM)),
            Span::styled("[n]", Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(" No", Style::default().fg(COLOR_DIM)),
        ]),
    ];

    frame.render_widget(Clear, dialog);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        dialog,
    );
}
