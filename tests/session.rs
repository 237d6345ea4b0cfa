//! Session Lifecycle Tests

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{actor, CountingSocket};
use incampus::app::realtime::AttachPolicy;
use incampus::app::session::{Session, SessionSettings};
use incampus::config::latency::{LatencyProfile, MockLatency};
use incampus::domain::event::{EventKind, RealtimeEvent};
use incampus::domain::user::SessionUser;
use incampus::infra::mock_api::MockNotificationApi;
use incampus::infra::mock_socket::MockSocket;

fn user() -> SessionUser {
    SessionUser {
        id: "user-1".into(),
        name: "Shombhunath Karan".into(),
    }
}

fn settings() -> SessionSettings {
    SessionSettings {
        debounce: Duration::from_millis(50),
        attach: AttachPolicy::default(),
    }
}

fn api(profile: LatencyProfile) -> Arc<MockNotificationApi> {
    Arc::new(MockNotificationApi::new(MockLatency::for_profile(profile)))
}

#[tokio::test(start_paused = true)]
async fn start_fetches_and_attaches() {
    let socket = Arc::new(MockSocket::new(true));
    let session = Session::start(user(), api(LatencyProfile::Instant), socket.clone(), settings());
    assert_eq!(session.user().id, "user-1");

    tokio::time::sleep(Duration::from_millis(100)).await;
    let snapshot = session.store().snapshot();
    assert_eq!(snapshot.notifications.len(), 5);
    assert_eq!(snapshot.unread_count, 3);
    assert_eq!(snapshot.notifications[0].message, "Soumyajit Ghosh liked your post");
    assert_eq!(socket.handler_count(EventKind::FriendRequest), 0);

    tokio::time::sleep(Duration::from_millis(2_000)).await;
    assert!(session.attachment().is_finished());
    for kind in EventKind::ALL {
        assert_eq!(socket.handler_count(kind), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn initial_fetch_respects_remote_latency() {
    let socket = Arc::new(MockSocket::new(true));
    let session = Session::start(user(), api(LatencyProfile::Realistic), socket, settings());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(session.store().snapshot().is_empty());

    tokio::time::sleep(Duration::from_millis(1_000)).await;
    assert_eq!(session.store().snapshot().notifications.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn end_clears_store_and_cancels_attachment() {
    let socket = CountingSocket::never_ready();
    let session = Session::start(user(), api(LatencyProfile::Instant), socket.clone(), settings());
    let store = session.store().clone();

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    assert_eq!(store.snapshot().notifications.len(), 5);
    assert_eq!(socket.ready_checks(), 1);

    session.end();
    assert!(store.snapshot().is_empty());
    assert_eq!(store.unread_count(), 0);
    assert!(!store.is_active());

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(socket.ready_checks(), 1);
    assert!(store.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn end_before_first_fetch_lands_keeps_store_empty() {
    let socket = Arc::new(MockSocket::new(true));
    let session = Session::start(user(), api(LatencyProfile::Realistic), socket, settings());
    let store = session.store().clone();

    tokio::time::sleep(Duration::from_millis(100)).await;
    session.end();

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(store.snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn events_after_end_are_ignored() {
    let socket = Arc::new(MockSocket::new(true));
    let session = Session::start(user(), api(LatencyProfile::Instant), socket.clone(), settings());
    let store = session.store().clone();

    tokio::time::sleep(Duration::from_millis(2_100)).await;
    assert_eq!(socket.handler_count(EventKind::FriendRequest), 1);

    session.end();
    socket.emit(
        EventKind::FriendRequest,
        RealtimeEvent {
            from_user: Some(actor("user-4", "Rahul Roy")),
            post_id: None,
        },
    );
    assert_eq!(store.unread_count(), 0);
}
