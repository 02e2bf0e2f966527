//! Typed client for the dashboard backend endpoints.
//!
//! - `GET /status` - bot status snapshot
//! - `POST /action` - admin command
//! - `GET /stream` - server-sent log events

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::debug;

use crate::config::DashboardConfig;
use crate::error::{DashError, DashResult};
use crate::models::{ActionCommand, ActionRequest, LogEvent, StatusSnapshot};
use crate::sse::{sse_frames, SseFrameStream};
use crate::traits::{Headers, HttpClient, HttpError};

/// Client for the three dashboard endpoints.
///
/// Cheap to clone; background tasks each hold their own copy.
#[derive(Clone)]
pub struct DashboardApi {
    http: Arc<dyn HttpClient>,
    config: Arc<DashboardConfig>,
}

impl std::fmt::Debug for DashboardApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardApi")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl DashboardApi {
    pub fn new(http: Arc<dyn HttpClient>, config: DashboardConfig) -> Self {
        Self {
            http,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fetch the current status snapshot.
    ///
    /// Fails on transport errors, non-2xx responses and bodies that are not
    /// a status object.
    pub async fn fetch_status(&self) -> DashResult<StatusSnapshot> {
        let url = self.config.endpoint("/status");
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&url, &headers).await?;
        if !response.is_success() {
            return Err(DashError::server(response.status, &response.text_lossy()));
        }

        let snapshot: StatusSnapshot = response.json()?;
        debug!(?snapshot, "Status fetched");
        Ok(snapshot)
    }

    /// Send an admin command and return the JSON reply.
    ///
    /// Any JSON body is a reply, whatever the status code, so a rejection
    /// such as `{"error":"unauthorized"}` is echoed like a success. Object
    /// keys keep the server's order. Only transport failures and bodies that
    /// are not JSON are errors.
    ///
    /// The `Authorization` header is always present; its value is empty when
    /// no token is configured.
    pub async fn send_action(&self, cmd: ActionCommand) -> DashResult<Value> {
        let url = self.config.endpoint("/action");
        let body = serde_json::to_string(&ActionRequest { cmd })?;

        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert(
            "Authorization".to_string(),
            self.config.authorization_header(),
        );

        let response = self.http.post(&url, &body, &headers).await?;
        match response.json::<Value>() {
            Ok(reply) => {
                if !response.is_success() {
                    debug!(status = response.status, %cmd, "Action rejected with a JSON reply");
                }
                Ok(reply)
            }
            Err(_) if !response.is_success() => {
                Err(DashError::server(response.status, &response.text_lossy()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Open the log stream.
    ///
    /// `last_event_id` is sent back as `Last-Event-ID` on reconnects, the
    /// way a browser event source resumes.
    pub async fn open_stream(
        &self,
        last_event_id: Option<&str>,
    ) -> Result<SseFrameStream, HttpError> {
        let url = self.config.endpoint("/stream");
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "text/event-stream".to_string());
        headers.insert("Cache-Control".to_string(), "no-cache".to_string());
        if let Some(id) = last_event_id {
            headers.insert("Last-Event-ID".to_string(), id.to_string());
        }

        let body = self.http.get_stream(&url, &headers).await?;
        Ok(Box::pin(sse_frames(body)))
    }
}

/// Current UTC time in the ISO form used for synthesized feed entries.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Feed entry describing the outcome of an admin command.
pub fn action_outcome_event(cmd: ActionCommand, outcome: &DashResult<Value>) -> LogEvent {
    match outcome {
        Ok(reply) => LogEvent::new(
            now_timestamp(),
            "admin",
            format!("Action {} → {}", cmd, reply),
        ),
        Err(err) => LogEvent::new(now_timestamp(), "error", format!("Action failed: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;
    use bytes::Bytes;
    use futures::StreamExt;
    use serde_json::json;

    const BASE: &str = "http://dash.test";

    fn api_with(mock: &MockHttpClient, config: DashboardConfig) -> DashboardApi {
        DashboardApi::new(Arc::new(mock.clone()), config.with_base_url(BASE))
    }

    #[tokio::test]
    async fn test_fetch_status_success() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/status",
            MockResponse::Success(Response::json_body(
                &json!({"status": "online", "uptime": "3h", "users": 12}),
            )),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let snapshot = api.fetch_status().await.unwrap();
        assert_eq!(snapshot, StatusSnapshot::new("online", "3h", 12));
    }

    #[tokio::test]
    async fn test_fetch_status_non_success_is_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/status",
            MockResponse::Success(Response::new(503, Bytes::from("maintenance"))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let err = api.fetch_status().await.unwrap_err();
        assert_eq!(err.to_string(), "Server error (503): maintenance");
    }

    #[tokio::test]
    async fn test_fetch_status_non_json_is_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/status",
            MockResponse::Success(Response::new(200, Bytes::from("<html></html>"))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        assert!(matches!(api.fetch_status().await, Err(DashError::Json(_))));
    }

    #[tokio::test]
    async fn test_send_action_wire_format() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Success(Response::json_body(&json!({"ok": true}))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let reply = api.send_action(ActionCommand::TriggerBackup).await.unwrap();
        assert_eq!(reply, json!({"ok": true}));

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://dash.test/action");
        assert_eq!(requests[0].body.as_deref(), Some(r#"{"cmd":"trigger_backup"}"#));
        assert_eq!(
            requests[0].headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("")
        );
    }

    #[tokio::test]
    async fn test_send_action_with_token() {
        let mock = MockHttpClient::new();
        mock.set_default_response(MockResponse::Success(Response::json_body(&json!({}))));

        let api = api_with(&mock, DashboardConfig::default().with_auth_token("k3y"));
        api.send_action(ActionCommand::ClearCache).await.unwrap();

        let requests = mock.get_requests();
        assert_eq!(
            requests[0].headers.get("Authorization").map(String::as_str),
            Some("Bearer k3y")
        );
    }

    #[tokio::test]
    async fn test_send_action_keeps_reply_key_order() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Success(Response::new(
                200,
                Bytes::from(r#"{"status": "queued", "cmd": "trigger_backup", "at": 3}"#),
            )),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let outcome = api.send_action(ActionCommand::TriggerBackup).await;
        let event = action_outcome_event(ActionCommand::TriggerBackup, &outcome);
        assert_eq!(
            event.message,
            r#"Action trigger_backup → {"status":"queued","cmd":"trigger_backup","at":3}"#
        );
    }

    #[tokio::test]
    async fn test_send_action_json_rejection_is_a_reply() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Success(Response::new(401, Bytes::from(r#"{"error":"unauthorized"}"#))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let outcome = api.send_action(ActionCommand::ClearCache).await;
        assert_eq!(outcome.as_ref().unwrap(), &json!({"error": "unauthorized"}));

        let event = action_outcome_event(ActionCommand::ClearCache, &outcome);
        assert_eq!(event.level(), "admin");
        assert_eq!(event.message, r#"Action clear_cache → {"error":"unauthorized"}"#);
    }

    #[tokio::test]
    async fn test_send_action_non_json_rejection_is_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Success(Response::new(502, Bytes::from("bad gateway"))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let err = api.send_action(ActionCommand::ClearCache).await.unwrap_err();
        assert_eq!(err.to_string(), "Server error (502): bad gateway");
    }

    #[tokio::test]
    async fn test_send_action_non_json_success_is_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Success(Response::new(200, Bytes::from("ok"))),
        );

        let api = api_with(&mock, DashboardConfig::default());
        assert!(matches!(
            api.send_action(ActionCommand::ClearCache).await,
            Err(DashError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_send_action_transport_error() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/action",
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let err = api.send_action(ActionCommand::RunGiveaway).await.unwrap_err();
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[tokio::test]
    async fn test_open_stream_sends_sse_headers() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://dash.test/stream",
            MockResponse::Stream(vec![Bytes::from("data: {\"message\":\"hi\"}\n\n")]),
        );

        let api = api_with(&mock, DashboardConfig::default());
        let frames: Vec<_> = api.open_stream(Some("41")).await.unwrap().collect().await;
        assert_eq!(frames.len(), 1);

        let request = &mock.get_requests()[0];
        assert_eq!(
            request.headers.get("Accept").map(String::as_str),
            Some("text/event-stream")
        );
        assert_eq!(
            request.headers.get("Last-Event-ID").map(String::as_str),
            Some("41")
        );
    }

    #[test]
    fn test_action_outcome_event_success() {
        let event = action_outcome_event(
            ActionCommand::TriggerBackup,
            &Ok(json!({"status": "queued"})),
        );
        assert_eq!(event.level(), "admin");
        assert_eq!(event.message, r#"Action trigger_backup → {"status":"queued"}"#);
        assert!(event.time.ends_with('Z'));
    }

    #[test]
    fn test_action_outcome_event_failure() {
        let event = action_outcome_event(
            ActionCommand::ClearCache,
            &Err(DashError::server(503, "maintenance")),
        );
        assert_eq!(event.level(), "error");
        assert_eq!(
            event.message,
            "Action failed: Server error (503): maintenance"
        );
    }
}
