//! Background producers: log stream subscriber, status poller, action sender.
//!
//! Each task owns a clone of [`DashboardApi`] and reports back through the
//! app message channel. A task exits quietly once the receiver is gone.

use futures::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::api::{action_outcome_event, DashboardApi};
use crate::app::AppMessage;
use crate::error::DashResult;
use crate::models::{ActionCommand, StatusSnapshot};
use crate::sse::SseFrame;

/// Keep a log stream subscription open for the life of the process.
///
/// Every failure (refused connection, error status, broken body, server
/// closing the stream) is logged and followed by a reconnect after the
/// current delay. The delay starts at the configured value and follows any
/// `retry:` the server sends.
pub async fn run_stream_subscriber(api: DashboardApi, tx: UnboundedSender<AppMessage>) {
    let mut retry_delay = api.config().reconnect_delay;
    let mut last_event_id: Option<String> = None;

    loop {
        let reason = match api.open_stream(last_event_id.as_deref()).await {
            Ok(mut frames) => {
                info!("Log stream connected");
                if tx.send(AppMessage::StreamOpened).is_err() {
                    return;
                }

                loop {
                    match frames.next().await {
                        Some(Ok(SseFrame::Message(message))) => {
                            if message.last_event_id.is_some() {
                                last_event_id = message.last_event_id.clone();
                            }
                            if tx.send(AppMessage::StreamMessage(message)).is_err() {
                                return;
                            }
                        }
                        Some(Ok(SseFrame::Retry(delay))) => {
                            debug!(?delay, "Server changed reconnection delay");
                            retry_delay = delay;
                        }
                        Some(Err(e)) => break e.to_string(),
                        None => break "stream closed by server".to_string(),
                    }
                }
            }
            Err(e) => e.to_string(),
        };

        warn!(%reason, ?retry_delay, "Log stream error, reconnecting");
        if tx.send(AppMessage::StreamError(reason)).is_err() {
            return;
        }
        tokio::time::sleep(retry_delay).await;
    }
}

/// Poll `/status` immediately and then every configured interval.
///
/// A fetch completes before the next one can start; late ticks are delayed
/// rather than bunched up.
pub async fn run_status_poller(api: DashboardApi, tx: UnboundedSender<AppMessage>) {
    let mut interval = tokio::time::interval(api.config().poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let message = status_message(api.fetch_status().await);
        if tx.send(message).is_err() {
            return;
        }
    }
}

/// Translate a status fetch result into the message the UI applies.
pub fn status_message(result: DashResult<StatusSnapshot>) -> AppMessage {
    match result {
        Ok(snapshot) => AppMessage::StatusUpdated(snapshot),
        Err(e) => {
            debug!(error = %e, "Status fetch failed");
            AppMessage::StatusFailed(e.to_string())
        }
    }
}

pub fn spawn_stream_subscriber(
    api: DashboardApi,
    tx: UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(run_stream_subscriber(api, tx))
}

pub fn spawn_status_poller(api: DashboardApi, tx: UnboundedSender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(run_status_poller(api, tx))
}

/// One extra status fetch, outside the regular schedule.
pub fn spawn_status_refresh(api: DashboardApi, tx: UnboundedSender<AppMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _ = tx.send(status_message(api.fetch_status().await));
    })
}

/// Send one admin command and report its outcome as a feed event.
pub fn spawn_action(
    api: DashboardApi,
    cmd: ActionCommand,
    tx: UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(%cmd, "Sending admin action");
        let outcome = api.send_action(cmd).await;
        match &outcome {
            Ok(reply) => info!(%cmd, %reply, "Admin action completed"),
            Err(e) => warn!(%cmd, error = %e, "Admin action failed"),
        }
        let event = action_outcome_event(cmd, &outcome);
        let _ = tx.send(AppMessage::ActionFinished { cmd, event });
    })
}
