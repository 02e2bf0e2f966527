//! Keyboard and mouse handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::{App, PAGE_SIZE};
use crate::models::ActionCommand;

impl App {
    /// Handle a key press.
    ///
    /// While a confirmation prompt is open only the answer keys (and Ctrl+C)
    /// do anything.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if self.pending_confirmation.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_pending(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.decline_pending(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.quit(),
            KeyCode::Char('r') => self.refresh_status(),
            KeyCode::Char(c) => {
                if let Some(cmd) = ActionCommand::from_hotkey(c) {
                    self.request_action(cmd);
                }
            }
            KeyCode::Left | KeyCode::BackTab => self.select_previous_action(),
            KeyCode::Right | KeyCode::Tab => self.select_next_action(),
            KeyCode::Enter => self.request_action(self.selected_command()),
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(PAGE_SIZE),
            KeyCode::PageDown => self.scroll_down(PAGE_SIZE),
            KeyCode::Home => self.scroll_to_top(),
            KeyCode::End => self.scroll_to_bottom(),
            _ => {}
        }
    }

    /// Handle a mouse event: clicks on action buttons and wheel scrolling.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.pending_confirmation.is_some() {
                    return;
                }
                if let Some(cmd) = self.action_at(mouse.column, mouse.row) {
                    self.request_action(cmd);
                }
            }
            MouseEventKind::ScrollUp => self.scroll_up(1),
            MouseEventKind::ScrollDown => self.scroll_down(1),
            _ => {}
        }
    }
}
