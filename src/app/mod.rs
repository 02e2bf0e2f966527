//! Application state and logic for the dashboard TUI.
//!
//! - [`App`] - owns every piece of visible state
//! - [`AppMessage`] - what background tasks send back
//! - [`ConnectionState`] / [`StreamHealth`] - log stream bookkeeping
//!
//! Background work lives in [`tasks`]; key and mouse handling in `input`.

mod input;
mod messages;
pub mod tasks;

pub use messages::AppMessage;

use std::time::{Duration, Instant};

use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::DashboardApi;
use crate::feed::Feed;
use crate::models::{ActionCommand, StatusDisplay};

/// Lines moved by PageUp / PageDown in the feed.
const PAGE_SIZE: usize = 10;

/// Transport-level state of the log stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// First connection attempt in progress
    Connecting,
    Connected,
    /// Last attempt failed; a reconnect is pending
    Errored(String),
}

/// What the header shows for the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamHealth {
    Connecting,
    /// Connected and a message arrived recently
    Live,
    /// Connected but silent for longer than the stale threshold
    Stale,
    Reconnecting,
}

impl StreamHealth {
    pub fn label(&self) -> &'static str {
        match self {
            StreamHealth::Connecting => "connecting",
            StreamHealth::Live => "live",
            StreamHealth::Stale => "stale",
            StreamHealth::Reconnecting => "reconnecting",
        }
    }
}

/// Main application state.
pub struct App {
    /// Live log feed, newest first
    pub feed: Feed,
    /// Header values
    pub status: StatusDisplay,
    pub connection: ConnectionState,
    /// When the stream last opened or delivered anything
    pub last_stream_activity: Option<Instant>,
    /// Command waiting for a yes/no answer
    pub pending_confirmation: Option<ActionCommand>,
    /// Index into [`ActionCommand::ALL`] for arrow-key selection
    pub selected_action: usize,
    /// Number of newest entries scrolled past (0 = top of feed)
    pub feed_scroll: usize,
    /// Admin commands sent but not yet answered
    pub actions_in_flight: usize,
    /// Screen areas of the action buttons from the last render
    pub action_hit_areas: Vec<(Rect, ActionCommand)>,
    pub should_quit: bool,
    /// Dirty flag; the main loop redraws only when set
    pub needs_redraw: bool,
    pub tick_count: u64,
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Taken by the main loop before it starts selecting
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    api: DashboardApi,
    stale_after: Duration,
    last_health: StreamHealth,
}

impl App {
    pub fn new(api: DashboardApi) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let config = api.config();

        Self {
            feed: Feed::with_capacity(config.feed_capacity),
            status: StatusDisplay::default(),
            connection: ConnectionState::Connecting,
            last_stream_activity: None,
            pending_confirmation: None,
            selected_action: 0,
            feed_scroll: 0,
            actions_in_flight: 0,
            action_hit_areas: Vec::new(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_tx,
            message_rx: Some(message_rx),
            stale_after: config.stale_after,
            last_health: StreamHealth::Connecting,
            api,
        }
    }

    pub fn api(&self) -> &DashboardApi {
        &self.api
    }

    /// Start the log stream subscriber and the status poller.
    pub fn start_background_tasks(&self) -> Vec<JoinHandle<()>> {
        vec![
            tasks::spawn_stream_subscriber(self.api.clone(), self.message_tx.clone()),
            tasks::spawn_status_poller(self.api.clone(), self.message_tx.clone()),
        ]
    }

    /// Apply one message from a background task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::StreamOpened => {
                self.connection = ConnectionState::Connected;
                self.last_stream_activity = Some(Instant::now());
            }
            AppMessage::StreamMessage(message) => {
                self.last_stream_activity = Some(Instant::now());
                if !message.is_default_type() {
                    debug!(event = %message.event, "Ignoring named stream event");
                    return;
                }
                let added = self.feed.push(message.data);
                self.anchor_scroll(added);
            }
            AppMessage::StreamError(reason) => {
                self.connection = ConnectionState::Errored(reason);
            }
            AppMessage::StatusUpdated(snapshot) => {
                self.status.apply(&snapshot);
            }
            AppMessage::StatusFailed(_) => {
                self.status.mark_offline();
            }
            AppMessage::ActionFinished { cmd, event } => {
                debug!(%cmd, "Action outcome received");
                self.actions_in_flight = self.actions_in_flight.saturating_sub(1);
                let added = self.feed.push(event);
                self.anchor_scroll(added);
            }
        }
    }

    /// Keep the entries the operator is reading in place after an insertion.
    fn anchor_scroll(&mut self, added: bool) {
        if added && self.feed_scroll > 0 {
            self.feed_scroll = (self.feed_scroll + 1).min(self.max_scroll());
        }
    }

    /// Ask for `cmd` to run. Commands that need confirmation wait for
    /// [`App::confirm_pending`] instead of being sent.
    pub fn request_action(&mut self, cmd: ActionCommand) {
        self.mark_dirty();
        if cmd.requires_confirmation() {
            self.pending_confirmation = Some(cmd);
        } else {
            self.dispatch_action(cmd);
        }
    }

    /// Operator accepted the pending prompt.
    pub fn confirm_pending(&mut self) {
        if let Some(cmd) = self.pending_confirmation.take() {
            self.mark_dirty();
            self.dispatch_action(cmd);
        }
    }

    /// Operator declined: nothing is sent and nothing is logged.
    pub fn decline_pending(&mut self) {
        if self.pending_confirmation.take().is_some() {
            self.mark_dirty();
        }
    }

    fn dispatch_action(&mut self, cmd: ActionCommand) {
        info!(%cmd, "Action requested");
        self.actions_in_flight += 1;
        tasks::spawn_action(self.api.clone(), cmd, self.message_tx.clone());
    }

    /// Fetch the status right away instead of waiting for the next poll.
    pub fn refresh_status(&mut self) {
        tasks::spawn_status_refresh(self.api.clone(), self.message_tx.clone());
    }

    pub fn selected_command(&self) -> ActionCommand {
        ActionCommand::ALL[self.selected_action % ActionCommand::ALL.len()]
    }

    pub fn select_next_action(&mut self) {
        self.selected_action = (self.selected_action + 1) % ActionCommand::ALL.len();
        self.mark_dirty();
    }

    pub fn select_previous_action(&mut self) {
        let len = ActionCommand::ALL.len();
        self.selected_action = (self.selected_action + len - 1) % len;
        self.mark_dirty();
    }

    /// Action button under a screen cell, if any.
    pub fn action_at(&self, column: u16, row: u16) -> Option<ActionCommand> {
        let position = Position::new(column, row);
        self.action_hit_areas
            .iter()
            .find(|(area, _)| area.contains(position))
            .map(|(_, cmd)| *cmd)
    }

    fn max_scroll(&self) -> usize {
        self.feed.len().saturating_sub(1)
    }

    /// Scroll toward newer entries.
    pub fn scroll_up(&mut self, lines: usize) {
        let new_scroll = self.feed_scroll.saturating_sub(lines);
        if new_scroll != self.feed_scroll {
            self.feed_scroll = new_scroll;
            self.mark_dirty();
        }
    }

    /// Scroll toward older entries.
    pub fn scroll_down(&mut self, lines: usize) {
        let new_scroll = (self.feed_scroll + lines).min(self.max_scroll());
        if new_scroll != self.feed_scroll {
            self.feed_scroll = new_scroll;
            self.mark_dirty();
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_up(self.feed_scroll);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_down(self.max_scroll());
    }

    pub fn stream_health(&self) -> StreamHealth {
        self.stream_health_at(Instant::now())
    }

    pub fn stream_health_at(&self, now: Instant) -> StreamHealth {
        match &self.connection {
            ConnectionState::Connecting => StreamHealth::Connecting,
            ConnectionState::Errored(_) => StreamHealth::Reconnecting,
            ConnectionState::Connected => match self.last_stream_activity {
                Some(at) if now.saturating_duration_since(at) > self.stale_after => {
                    StreamHealth::Stale
                }
                _ => StreamHealth::Live,
            },
        }
    }

    /// Called on every timer tick; redraws when the stream turns stale.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        let health = self.stream_health();
        if health != self.last_health {
            self.last_health = health;
            self.mark_dirty();
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
