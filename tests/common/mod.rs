#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use futures::future::BoxFuture;
use futures::FutureExt;
use http_body_util::BodyExt;
use serde_json::Value;
use time::macros::datetime;
use tower::ServiceExt;

use incampus::app::notifications::{NotificationSource, NotificationStore, DEFAULT_DEBOUNCE};
use incampus::app::realtime::{EventHandler, EventSource};
use incampus::config::latency::{LatencyProfile, MockLatency};
use incampus::domain::event::EventKind;
use incampus::domain::notification::{PostRef, RemoteNotification};
use incampus::domain::user::{Actor, Avatar};
use incampus::infra::mock_api::MockNotificationApi;
use incampus::infra::mock_socket::MockSocket;
use incampus::AppState;

/// Long enough for the default debounce window to elapse.
pub const SETTLE: Duration = Duration::from_millis(60);

pub async fn settle() {
    tokio::time::sleep(SETTLE).await;
}

// ---------------------------------------------------------------------------
// TestApp: in-process router over the mock notification API
// ---------------------------------------------------------------------------

pub struct TestApp {
    router: Router,
    pub api: MockNotificationApi,
}

pub struct TestResponse {
    pub status: StatusCode,
    body_bytes: bytes::Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body_bytes).unwrap_or(Value::Null)
    }

    pub fn error_message(&self) -> String {
        self.json()["error"].as_str().unwrap_or("").to_string()
    }
}

impl TestApp {
    pub fn new() -> Self {
        let api = MockNotificationApi::new(MockLatency::for_profile(LatencyProfile::Instant));
        let router = incampus::http::router(AppState { api: api.clone() });
        TestApp { router, api }
    }

    pub async fn request(&self, method: Method, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header("host", "localhost")
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("oneshot failed");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to collect body")
            .to_bytes();

        TestResponse { status, body_bytes }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path).await
    }

    pub async fn post(&self, path: &str) -> TestResponse {
        self.request(Method::POST, path).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request(Method::DELETE, path).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn actor(id: &str, name: &str) -> Actor {
    Actor {
        id: id.to_string(),
        name: name.to_string(),
        avatar: Some(Avatar::Url(format!("https://avatars.test/{}.png", id))),
    }
}

pub fn remote(id: &str, notification_type: &str, read: bool) -> RemoteNotification {
    RemoteNotification {
        id: id.to_string(),
        notification_type: notification_type.to_string(),
        content: None,
        sender: actor("user-2", "Soumyajit Ghosh"),
        post: None,
        created_at: datetime!(2023-07-10 14:35 UTC),
        read,
    }
}

pub fn remote_on_post(id: &str, notification_type: &str, read: bool, post_id: &str) -> RemoteNotification {
    RemoteNotification {
        post: Some(PostRef::Id(post_id.to_string())),
        ..remote(id, notification_type, read)
    }
}

/// `count` alternating unread/read likes named n0, n1, ...
pub fn remote_batch(count: usize) -> Vec<RemoteNotification> {
    (0..count)
        .map(|i| remote_on_post(&format!("n{}", i), "like", i % 2 == 1, "post-1"))
        .collect()
}

// ---------------------------------------------------------------------------
// RecordingSource: remote double that logs every call
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    List,
    MarkRead(String),
    MarkAllRead,
    Delete(String),
}

#[derive(Default)]
pub struct RecordingSource {
    notifications: Mutex<Vec<RemoteNotification>>,
    calls: Mutex<Vec<RemoteCall>>,
    failing: AtomicBool,
}

impl RecordingSource {
    pub fn new(notifications: Vec<RemoteNotification>) -> Arc<Self> {
        Arc::new(Self {
            notifications: Mutex::new(notifications),
            calls: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        })
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_notifications(&self, notifications: Vec<RemoteNotification>) {
        *self.notifications.lock().unwrap() = notifications;
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RemoteCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!("remote unavailable"));
        }
        Ok(())
    }
}

impl NotificationSource for RecordingSource {
    fn list(&self) -> BoxFuture<'_, Result<Vec<RemoteNotification>>> {
        async move {
            self.record(RemoteCall::List)?;
            Ok(self.notifications.lock().unwrap().clone())
        }
        .boxed()
    }

    fn mark_read<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        async move { self.record(RemoteCall::MarkRead(id.to_string())) }.boxed()
    }

    fn mark_all_read(&self) -> BoxFuture<'_, Result<()>> {
        async move { self.record(RemoteCall::MarkAllRead) }.boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        async move { self.record(RemoteCall::Delete(id.to_string())) }.boxed()
    }
}

/// Store over a recording source, already refreshed and settled.
pub async fn loaded_store(
    notifications: Vec<RemoteNotification>,
) -> (NotificationStore, Arc<RecordingSource>) {
    let source = RecordingSource::new(notifications);
    let store = NotificationStore::new(source.clone(), DEFAULT_DEBOUNCE);
    store.refresh().await;
    settle().await;
    (store, source)
}

// ---------------------------------------------------------------------------
// CountingSocket: event source that counts readiness probes
// ---------------------------------------------------------------------------

pub struct CountingSocket {
    pub inner: MockSocket,
    ready_checks: AtomicU32,
    // becomes ready on this probe (1-based); None = never
    ready_on_check: Option<u32>,
    registrations: AtomicU32,
    failing_registration: AtomicBool,
    on_calls: AtomicU32,
    // `on` call (1-based) rejected exactly once; 0 = none
    fail_once_at: AtomicU32,
}

impl CountingSocket {
    pub fn never_ready() -> Arc<Self> {
        Self::ready_on(None)
    }

    pub fn ready_on(check: Option<u32>) -> Arc<Self> {
        Arc::new(Self {
            inner: MockSocket::new(false),
            ready_checks: AtomicU32::new(0),
            ready_on_check: check,
            registrations: AtomicU32::new(0),
            failing_registration: AtomicBool::new(false),
            on_calls: AtomicU32::new(0),
            fail_once_at: AtomicU32::new(0),
        })
    }

    pub fn set_failing_registration(&self, failing: bool) {
        self.failing_registration.store(failing, Ordering::SeqCst);
    }

    pub fn fail_registration_once_at(&self, call: u32) {
        self.fail_once_at.store(call, Ordering::SeqCst);
    }

    pub fn ready_checks(&self) -> u32 {
        self.ready_checks.load(Ordering::SeqCst)
    }

    pub fn registrations(&self) -> u32 {
        self.registrations.load(Ordering::SeqCst)
    }
}

impl EventSource for CountingSocket {
    fn is_ready(&self) -> bool {
        let check = self.ready_checks.fetch_add(1, Ordering::SeqCst) + 1;
        matches!(self.ready_on_check, Some(ready) if check >= ready)
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<()> {
        let call = self.on_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let fail_once = self
            .fail_once_at
            .compare_exchange(call, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok();
        if fail_once || self.failing_registration.load(Ordering::SeqCst) {
            return Err(anyhow!("socket rejected {}", kind.as_str()));
        }
        self.registrations.fetch_add(1, Ordering::SeqCst);
        self.inner.on(kind, handler)
    }
}
