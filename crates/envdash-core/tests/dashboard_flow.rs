//! Dashboard flow tests
//!
//! Drive a [`Dashboard`] end to end against a [`MockDevice`]: startup, tab
//! selection, failures and config saves.

use std::sync::Arc;
use std::time::Duration;

use envdash_core::{
    Dashboard, DashboardEvent, FetchRequest, LoaderState, MockDevice, Resource, Tab, fetch,
    humanize_duration,
};
use envdash_types::{PropertyKind, RawHistoryEntry, StatusResponse};
use serde_json::json;

fn sample(time: f64, temp: f64) -> RawHistoryEntry {
    RawHistoryEntry {
        time,
        temp,
        pressure: 1012.0,
        humidity: 40.0,
        gas: 120.0,
    }
}

// =============================================================================
// Status
// =============================================================================

#[tokio::test]
async fn test_status_fetch_builds_properties() {
    let status: StatusResponse = serde_json::from_value(json!({
        "status": [{"name": "Uptime", "value": 65, "type": "seconds"}],
        "hostname": "esp1",
        "ipaddr": "10.0.0.5"
    }))
    .unwrap();
    let device = MockDevice::builder().status(status).build();
    let mut dash = Dashboard::default();

    let request = dash.select_tab("status").unwrap();
    assert_eq!(dash.state(Resource::Status), LoaderState::Loading);

    assert!(dash.load(&device, request).await);

    let props = dash.properties();
    assert_eq!(props.entries.len(), 1);
    assert_eq!(props.entries[0].name, "Uptime");
    assert_eq!(props.entries[0].kind, PropertyKind::Seconds);
    assert_eq!(
        props.entries[0].display_value.as_deref(),
        Some(humanize_duration(65_000).as_str())
    );
    assert_eq!(props.hostname.as_deref(), Some("esp1"));
    assert_eq!(props.ipaddr.as_deref(), Some("10.0.0.5"));
    assert_eq!(dash.state(Resource::Status), LoaderState::Done);
}

#[tokio::test]
async fn test_status_is_rebuilt_wholesale() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    dash.load(&device, FetchRequest::Status).await;
    assert_eq!(dash.properties().entries.len(), 3);

    device
        .set_status(StatusResponse {
            status: vec![],
            hostname: None,
            ipaddr: None,
        })
        .await;
    dash.load(&device, FetchRequest::Status).await;
    assert!(dash.properties().entries.is_empty());
    assert!(dash.properties().hostname.is_none());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_failed_fetch_changes_only_indicator() {
    let device = MockDevice::builder().temp(22.0).build();
    let mut dash = Dashboard::default();
    assert!(dash.load(&device, FetchRequest::Env).await);

    device.set_temp(30.0).await;
    device.set_failure(Resource::Env, Some(500)).await;

    let config_before = dash.config().clone();
    assert!(!dash.load(&device, FetchRequest::Env).await);

    assert_eq!(dash.env().temp, 22.0);
    assert_eq!(dash.state(Resource::Env), LoaderState::Error);
    assert_eq!(dash.state(Resource::Status), LoaderState::Idle);
    assert_eq!(dash.config(), &config_before);
    assert_eq!(dash.properties().entries[0].name, "Loading...");
    assert_eq!(device.request_count(Resource::Env), 2);
}

#[tokio::test]
async fn test_invalid_timestamp_fails_whole_history() {
    let device = MockDevice::builder()
        .history(vec![sample(1000.0, 20.0), sample(2000.0, 21.0)])
        .build();
    let mut dash = Dashboard::default();
    assert!(dash.load(&device, FetchRequest::History).await);
    assert_eq!(dash.history().len(), 2);

    device
        .set_history(vec![sample(3000.0, 22.0), sample(f64::INFINITY, 23.0)])
        .await;
    assert!(!dash.load(&device, FetchRequest::History).await);

    assert_eq!(dash.history().len(), 2);
    assert_eq!(dash.series().temp[1].y, 21.0);
    assert_eq!(dash.state(Resource::History), LoaderState::Error);
}

#[tokio::test]
async fn test_failure_is_not_retried() {
    let device = MockDevice::builder().fail(Resource::Config, 404).build();
    let mut dash = Dashboard::default();
    dash.open_tab(&device, "config").await;
    assert_eq!(device.request_count(Resource::Config), 1);
    assert_eq!(dash.state(Resource::Config), LoaderState::Error);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_history_series() {
    let device = MockDevice::builder()
        .history(vec![sample(1000.0, 20.0), sample(2000.0, 21.0)])
        .build();
    let mut dash = Dashboard::default();
    assert_eq!(dash.open_tab(&device, "history").await, Some(true));

    let temp = &dash.series().temp;
    assert_eq!(temp.len(), 2);
    assert_eq!(temp[0].x.unix_timestamp(), 1000);
    assert_eq!(temp[0].y, 20.0);
    assert_eq!(temp[1].x.unix_timestamp(), 2000);
    assert_eq!(temp[1].y, 21.0);
    assert_eq!(dash.history()[0].time, temp[0].x);
}

#[tokio::test]
async fn test_empty_history() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    assert!(dash.load(&device, FetchRequest::History).await);
    assert!(dash.history().is_empty());
    assert!(dash.series().is_empty());
    assert_eq!(dash.state(Resource::History), LoaderState::Done);
}

// =============================================================================
// Tabs
// =============================================================================

#[tokio::test]
async fn test_unknown_tab_issues_no_fetch() {
    let device = MockDevice::new();
    let mut dash = Dashboard::new(Tab::History);

    assert_eq!(dash.open_tab(&device, "unknown").await, None);
    assert_eq!(dash.active_tab(), Tab::History);
    assert_eq!(device.total_requests(), 0);
}

#[tokio::test]
async fn test_reselecting_tab_refetches() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    dash.open_tab(&device, "env").await;
    dash.open_tab(&device, "env").await;
    assert_eq!(device.request_count(Resource::Env), 2);
}

#[tokio::test]
async fn test_startup_fetches_status_then_tab() {
    let device = MockDevice::new();
    let mut dash = Dashboard::from_fragment(Some("config"));
    dash.start(&device).await;

    assert_eq!(device.request_count(Resource::Status), 1);
    assert_eq!(device.request_count(Resource::Config), 1);
    assert_eq!(device.total_requests(), 2);
    assert_eq!(dash.active_tab(), Tab::Config);
    assert_eq!(dash.properties().hostname.as_deref(), Some("bme680-mock"));
}

#[tokio::test]
async fn test_startup_defaults_to_env() {
    let device = MockDevice::new();
    let mut dash = Dashboard::from_fragment(None);
    dash.start(&device).await;
    assert_eq!(dash.active_tab(), Tab::Env);
    assert_eq!(device.request_count(Resource::Env), 1);
    assert_eq!(dash.state(Resource::Env), LoaderState::Done);
}

// =============================================================================
// Config
// =============================================================================

#[tokio::test]
async fn test_config_read_partial_response() {
    let device = MockDevice::builder()
        .config(serde_json::from_value(json!({"historyInterval": 600})).unwrap())
        .build();
    let mut dash = Dashboard::default();
    dash.config_mut().set_sleep_on_reset(true);

    dash.open_tab(&device, "config").await;

    let config = dash.config();
    assert_eq!(config.server().history_interval, 600);
    assert_eq!(config.local().history_interval, 600);
    assert!(config.server().standard);
    // Absent field leaves both records as they were
    assert!(!config.server().sleep_on_reset);
    assert!(config.local().sleep_on_reset);
}

#[tokio::test]
async fn test_save_clears_dirty_flags() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    dash.open_tab(&device, "config").await;

    dash.config_mut().set_history_interval(3600);
    dash.config_mut().toggle_sleep_on_reset();
    assert!(dash.config().config_changed());

    assert!(dash.save(&device).await);

    assert!(!dash.config().config_changed());
    assert_eq!(dash.config().server().history_interval, 3600);
    assert!(dash.config().server().sleep_on_reset);
    assert_eq!(device.put_count(), 1);
    assert_eq!(dash.state(Resource::Config), LoaderState::Done);
}

#[tokio::test]
async fn test_save_trusts_device_response() {
    let device = MockDevice::builder().max_interval(600).build();
    let mut dash = Dashboard::default();
    dash.config_mut().set_history_interval(3600);

    dash.save(&device).await;

    assert_eq!(dash.config().server().history_interval, 600);
    assert_eq!(dash.config().local().history_interval, 600);
}

#[tokio::test]
async fn test_failed_save_keeps_local_edits() {
    let device = MockDevice::builder().fail(Resource::Config, 500).build();
    let mut dash = Dashboard::default();
    dash.config_mut().set_history_interval(60);

    assert!(!dash.save(&device).await);

    assert_eq!(dash.config().local().history_interval, 60);
    assert_eq!(dash.config().server().history_interval, 10);
    assert!(dash.config().config_changed());
    assert_eq!(dash.state(Resource::Config), LoaderState::Error);
}

#[tokio::test]
async fn test_config_reread_follows_device() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    dash.open_tab(&device, "config").await;
    assert_eq!(dash.config().server().history_interval, 10);

    // Changed on the device by someone else; the interval comes back as a float
    device
        .set_config(
            serde_json::from_value(json!({"historyInterval": 60.0, "sleepOnReset": 1})).unwrap(),
        )
        .await;
    dash.open_tab(&device, "config").await;

    let config = dash.config();
    assert_eq!(config.server().history_interval, 60);
    assert!(config.server().standard);
    assert!(config.server().sleep_on_reset);
    assert!(!config.config_changed());
}

#[tokio::test]
async fn test_unusable_interval_still_applies_sleep_on_reset() {
    let device = MockDevice::builder()
        .config(
            serde_json::from_value(json!({"historyInterval": 45.5, "sleepOnReset": true})).unwrap(),
        )
        .build();
    let mut dash = Dashboard::default();

    assert_eq!(dash.open_tab(&device, "config").await, Some(true));

    assert_eq!(dash.config().server().history_interval, 10);
    assert!(dash.config().server().sleep_on_reset);
    assert!(dash.config().local().sleep_on_reset);
}

// =============================================================================
// Worker-style application
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_fetches_run_concurrently() {
    let device = MockDevice::builder().temp(18.0).build();
    device.set_latency(Duration::from_millis(500));
    let mut dash = Dashboard::default();

    let env = dash.begin(FetchRequest::Env);
    let history = dash.begin(FetchRequest::History);
    assert_eq!(dash.state(Resource::Env), LoaderState::Loading);
    assert_eq!(dash.state(Resource::History), LoaderState::Loading);

    let started = tokio::time::Instant::now();
    let (env, history) = tokio::join!(fetch(&device, &env), fetch(&device, &history));
    assert!(started.elapsed() < Duration::from_millis(1000));

    dash.handle_event(DashboardEvent::Loaded(env.unwrap()));
    dash.handle_event(DashboardEvent::Loaded(history.unwrap()));
    assert_eq!(dash.env().temp, 18.0);
    assert_eq!(dash.state(Resource::Env), LoaderState::Done);
    assert_eq!(dash.state(Resource::History), LoaderState::Done);
}

#[tokio::test]
async fn test_overlapping_fetches_last_applied_wins() {
    let device = Arc::new(MockDevice::builder().temp(10.0).build());
    let mut dash = Dashboard::default();

    let first = dash.begin(FetchRequest::Env);
    let first = fetch(device.as_ref(), &first).await.unwrap();

    device.set_temp(11.0).await;
    let second = dash.begin(FetchRequest::Env);
    let second = fetch(device.as_ref(), &second).await.unwrap();

    // Second result arrives first, the older one is applied last
    dash.handle_event(DashboardEvent::Loaded(second));
    dash.handle_event(DashboardEvent::Loaded(first));

    assert_eq!(dash.env().temp, 10.0);
    assert_eq!(dash.state(Resource::Env), LoaderState::Done);
}

#[tokio::test]
async fn test_save_body_captured_at_issue_time() {
    let device = MockDevice::new();
    let mut dash = Dashboard::default();
    dash.config_mut().set_history_interval(60);
    let request = dash.save_config();
    dash.config_mut().set_history_interval(600);

    let payload = fetch(&device, &request).await.unwrap();
    dash.handle_event(DashboardEvent::Loaded(payload));

    assert_eq!(dash.config().server().history_interval, 60);
    assert_eq!(dash.config().local().history_interval, 60);
}
