//! One-shot commands that run without the TUI.

use std::io::{BufRead, Write};

use tracing::info;

use crate::api::{action_outcome_event, DashboardApi};
use crate::error::DashResult;
use crate::feed::neutralize_controls;
use crate::models::{ActionCommand, LogEvent, StatusDisplay};

/// Outcome of `wendash action`.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRun {
    /// Operator answered no; nothing was sent
    Declined,
    /// Request went out; the event is what the feed would show
    Sent(LogEvent),
}

impl ActionRun {
    pub fn is_failure(&self) -> bool {
        matches!(self, ActionRun::Sent(event) if event.level() == "error")
    }
}

/// Format an event for a plain terminal: `time LEVEL message`.
///
/// Markup characters are printed as-is; only control characters are
/// neutralized.
pub fn format_event(event: &LogEvent) -> String {
    let badge = event.level().to_uppercase();
    let message = neutralize_controls(&event.message);
    if event.time.is_empty() {
        format!("{} {}", badge, message)
    } else {
        format!("{} {} {}", neutralize_controls(&event.time), badge, message)
    }
}

/// Fetch `/status` once and print the three display values.
///
/// Returns `false` when the bot is offline (or unreachable).
pub async fn run_status<W: Write>(api: &DashboardApi, out: &mut W) -> DashResult<bool> {
    let mut display = StatusDisplay::default();
    match api.fetch_status().await {
        Ok(snapshot) => display.apply(&snapshot),
        Err(e) => {
            info!(error = %e, "Status fetch failed");
            display.mark_offline();
        }
    }

    writeln!(out, "status: {}", display.status)?;
    writeln!(out, "uptime: {}", display.uptime)?;
    writeln!(out, "users:  {}", display.users)?;
    Ok(!display.is_offline())
}

/// Send one admin command and print the resulting feed line.
///
/// Commands that need confirmation read an answer from `input` unless
/// `assume_yes` is set. Anything but `y`/`yes` declines.
pub async fn run_action<R: BufRead, W: Write>(
    api: &DashboardApi,
    cmd: ActionCommand,
    assume_yes: bool,
    input: &mut R,
    out: &mut W,
) -> DashResult<ActionRun> {
    if let Some(prompt) = cmd.confirmation_prompt() {
        if !assume_yes {
            write!(out, "{} [y/N] ", prompt)?;
            out.flush()?;

            let mut answer = String::new();
            input.read_line(&mut answer)?;
            if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
                writeln!(out, "Cancelled.")?;
                return Ok(ActionRun::Declined);
            }
        }
    }

    let outcome = api.send_action(cmd).await;
    let event = action_outcome_event(cmd, &outcome);
    writeln!(out, "{}", format_event(&event))?;
    Ok(ActionRun::Sent(event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::config::DashboardConfig;
    use crate::traits::{HttpError, Response};
    use serde_json::json;
    use std::io::Cursor;
    use std::sync::Arc;

    fn api(mock: &MockHttpClient) -> DashboardApi {
        DashboardApi::new(
            Arc::new(mock.clone()),
            DashboardConfig::default().with_base_url("http://dash.test"),
        )
    }

    #[tokio::test]
    async fn test_status_online() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(
            &json!({"status": "online", "uptime": "3h", "users": 12}),
        )));

        let mut out = Vec::new();
        let online = run_status(&api(&mock), &mut out).await.unwrap();

        assert!(online);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "status: online\nuptime: 3h\nusers:  12\n"
        );
    }

    #[tokio::test]
    async fn test_status_offline() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let mut out = Vec::new();
        let online = run_status(&api(&mock), &mut out).await.unwrap();

        assert!(!online);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "status: offline\nuptime: —\nusers:  —\n"
        );
    }

    #[tokio::test]
    async fn test_action_declined_sends_nothing() {
        let mock = MockHttpClient::new();
        let mut input = Cursor::new("n\n");
        let mut out = Vec::new();

        let run = run_action(&api(&mock), ActionCommand::RestartBot, false, &mut input, &mut out)
            .await
            .unwrap();

        assert_eq!(run, ActionRun::Declined);
        assert!(mock.get_requests().is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "Restart bot? [y/N] Cancelled.\n");
    }

    #[tokio::test]
    async fn test_action_confirmed_on_stdin() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(&json!({"ok": 1}))));
        let mut input = Cursor::new("yes\n");
        let mut out = Vec::new();

        let run = run_action(&api(&mock), ActionCommand::RestartBot, false, &mut input, &mut out)
            .await
            .unwrap();

        assert!(!run.is_failure());
        assert_eq!(mock.get_requests().len(), 1);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("ADMIN Action restart_bot → {\"ok\":1}\n"));
    }

    #[tokio::test]
    async fn test_action_without_prompt_ignores_input() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(
            502,
            bytes::Bytes::from("bad gateway"),
        )));
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        let run = run_action(&api(&mock), ActionCommand::TriggerBackup, false, &mut input, &mut out)
            .await
            .unwrap();

        assert!(run.is_failure());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("ERROR Action failed: Server error (502): bad gateway"));
    }

    #[test]
    fn test_format_event_without_time() {
        let event = LogEvent::new("", "info", "a < b && c");
        assert_eq!(format_event(&event), "INFO a < b && c");
    }

    #[test]
    fn test_format_event_neutralizes_controls() {
        let event = LogEvent::new("10:00", "warn", "x\x1b]0;pwned\x07");
        assert_eq!(format_event(&event), "10:00 WARN x\u{fffd}]0;pwned\u{fffd}");
    }

    #[tokio::test]
    async fn test_action_reply_printed_without_entities() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::new(
            200,
            bytes::Bytes::from(r#"{"note":"<ok> & done"}"#),
        )));
        let mut input = Cursor::new("");
        let mut out = Vec::new();

        run_action(&api(&mock), ActionCommand::ClearCache, false, &mut input, &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("ADMIN Action clear_cache → {\"note\":\"<ok> & done\"}\n"));
    }
}
