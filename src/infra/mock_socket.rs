use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::app::debounce::lock;
use crate::app::realtime::{EventHandler, EventSource};
use crate::domain::event::{EventKind, RealtimeEvent};
use crate::infra::mock_data;

/// In-process socket: handlers are kept per event kind and invoked
/// synchronously by `emit`.
#[derive(Default)]
pub struct MockSocket {
    ready: AtomicBool,
    handlers: Mutex<HashMap<EventKind, Vec<EventHandler>>>,
}

impl MockSocket {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
            handlers: Mutex::new(HashMap::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        lock(&self.handlers).get(&kind).map_or(0, Vec::len)
    }

    /// Delivers an event to every handler of `kind`; returns how many ran.
    pub fn emit(&self, kind: EventKind, event: RealtimeEvent) -> usize {
        let handlers = lock(&self.handlers).get(&kind).cloned().unwrap_or_default();
        for handler in &handlers {
            handler(event.clone());
        }
        debug!(event = kind.as_str(), delivered = handlers.len(), "mock socket emitted");
        handlers.len()
    }

    /// Same as `emit`, addressed by channel name with a raw JSON payload.
    pub fn emit_json(&self, channel: &str, payload: Value) -> Result<usize> {
        let kind = EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == channel)
            .ok_or_else(|| anyhow!("unknown event channel: {}", channel))?;
        let event: RealtimeEvent = serde_json::from_value(payload)?;
        Ok(self.emit(kind, event))
    }

    /// Replays a fixed script of friend and post events, one per kind.
    pub fn spawn_demo_events(self: &Arc<Self>) -> JoinHandle<()> {
        let socket = self.clone();
        tokio::spawn(async move {
            let users = mock_data::users();
            let script = [
                (Duration::from_secs(5), EventKind::FriendRequest, &users[3], None),
                (Duration::from_secs(3), EventKind::FriendAccept, &users[1], None),
                (Duration::from_secs(2), EventKind::PostLike, &users[2], Some("post-1")),
                (Duration::from_secs(2), EventKind::PostComment, &users[4], Some("post-1")),
            ];
            for (wait, kind, actor, post_id) in script {
                tokio::time::sleep(wait).await;
                socket.emit(
                    kind,
                    RealtimeEvent {
                        from_user: Some(actor.clone()),
                        post_id: post_id.map(str::to_string),
                    },
                );
            }
            info!("mock socket demo script finished");
        })
    }
}

impl EventSource for MockSocket {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<()> {
        debug!(event = kind.as_str(), "mock socket registered handler");
        lock(&self.handlers).entry(kind).or_default().push(handler);
        Ok(())
    }
}
