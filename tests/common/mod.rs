//! Common test utilities for integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use wendash::adapters::mock::MockHttpClient;
use wendash::adapters::ReqwestHttpClient;
use wendash::api::DashboardApi;
use wendash::app::{App, AppMessage};
use wendash::config::DashboardConfig;

pub const MOCK_BASE: &str = "http://dash.test";

/// Config pointing at `base` with short timings for tests.
pub fn test_config(base: &str) -> DashboardConfig {
    DashboardConfig::default()
        .with_base_url(base)
        .with_reconnect_delay(Duration::from_millis(20))
        .with_poll_interval(Duration::from_millis(50))
}

/// Real HTTP client against a wiremock server.
pub fn real_api(base: &str) -> DashboardApi {
    DashboardApi::new(Arc::new(ReqwestHttpClient::new()), test_config(base))
}

/// App backed by a recording mock.
pub fn mock_app(mock: &MockHttpClient) -> App {
    App::new(DashboardApi::new(
        Arc::new(mock.clone()),
        test_config(MOCK_BASE),
    ))
}

/// Encode `payloads` as unnamed SSE messages.
pub fn sse_body(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n\n", p))
        .collect()
}

pub async fn next_message(rx: &mut UnboundedReceiver<AppMessage>) -> AppMessage {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for app message")
        .expect("app message channel closed")
}
