use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::app::debounce::{lock, DebounceGate};
use crate::domain::event::{EventKind, RealtimeEvent};
use crate::domain::notification::{
    unix_millis, NotificationDraft, NotificationRecord, RemoteNotification,
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Remote side of the notification list.
pub trait NotificationSource: Send + Sync {
    fn list(&self) -> BoxFuture<'_, Result<Vec<RemoteNotification>>>;
    fn mark_read<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
    fn mark_all_read(&self) -> BoxFuture<'_, Result<()>>;
    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationSnapshot {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: usize,
}

impl NotificationSnapshot {
    pub fn get(&self, id: &str) -> Option<&NotificationRecord> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Session-scoped owner of the notification list and its unread counter.
///
/// Every list change goes through a debounce gate; readers only see the
/// committed list. The counter is recomputed from the list at each commit,
/// but `mark_all_as_read`, `add_notification` and `clear_notification` also
/// adjust it immediately so badges update before the commit lands. Remote
/// calls run as background tasks and are never compensated on failure.
///
/// Mutating methods spawn tokio tasks and must be called inside a runtime.
#[derive(Clone)]
pub struct NotificationStore {
    shared: Arc<Shared>,
    gate: DebounceGate<Vec<NotificationRecord>>,
    source: Arc<dyn NotificationSource>,
}

struct Shared {
    state: Mutex<StoreState>,
    updates: watch::Sender<NotificationSnapshot>,
}

struct StoreState {
    committed: Vec<NotificationRecord>,
    // newest list including writes still waiting in the gate
    latest: Vec<NotificationRecord>,
    unread_count: usize,
    active: bool,
}

impl StoreState {
    fn snapshot(&self) -> NotificationSnapshot {
        NotificationSnapshot {
            notifications: self.committed.clone(),
            unread_count: self.unread_count,
        }
    }
}

impl Shared {
    fn commit(&self, notifications: Vec<NotificationRecord>) {
        let mut state = lock(&self.state);
        if !state.active {
            return;
        }
        state.unread_count = count_unread(&notifications);
        state.committed = notifications;
        self.publish(&state);
    }

    fn publish(&self, state: &StoreState) {
        self.updates.send_replace(state.snapshot());
    }
}

impl NotificationStore {
    pub fn new(source: Arc<dyn NotificationSource>, debounce: Duration) -> Self {
        let (updates, _) = watch::channel(NotificationSnapshot::default());
        let shared = Arc::new(Shared {
            state: Mutex::new(StoreState {
                committed: Vec::new(),
                latest: Vec::new(),
                unread_count: 0,
                active: true,
            }),
            updates,
        });

        let target = shared.clone();
        let gate = DebounceGate::new(debounce, move |notifications| target.commit(notifications));

        Self {
            shared,
            gate,
            source,
        }
    }

    pub fn snapshot(&self) -> NotificationSnapshot {
        lock(&self.shared.state).snapshot()
    }

    pub fn unread_count(&self) -> usize {
        lock(&self.shared.state).unread_count
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn is_active(&self) -> bool {
        lock(&self.shared.state).active
    }

    /// Replaces the local list with the remote one. Failures are logged and
    /// leave the list as it was.
    pub async fn refresh(&self) {
        if !self.is_active() {
            return;
        }

        debug!("fetching notifications");
        let remote = match self.source.list().await {
            Ok(remote) => remote,
            Err(err) => {
                error!(error = ?err, "failed to fetch notifications");
                return;
            }
        };

        let notifications: Vec<NotificationRecord> =
            remote.into_iter().map(NotificationRecord::from).collect();
        let count = notifications.len();

        let mut state = lock(&self.shared.state);
        if !state.active {
            return;
        }
        state.latest = notifications.clone();
        self.gate.schedule(notifications);
        info!(count, "fetched notifications");
    }

    pub fn mark_as_read(&self, id: &str) {
        {
            let mut state = lock(&self.shared.state);
            if !state.active {
                return;
            }
            let Some(record) = state.latest.iter_mut().find(|n| n.id == id) else {
                debug!(notification_id = id, "mark read for unknown notification");
                return;
            };
            record.read = true;
            self.gate.schedule(state.latest.clone());
        }

        let source = self.source.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            if let Err(err) = source.mark_read(&id).await {
                error!(error = ?err, notification_id = %id, "failed to mark notification read");
            }
        });
    }

    pub fn mark_all_as_read(&self) {
        {
            let mut state = lock(&self.shared.state);
            if !state.active {
                return;
            }
            for record in state.latest.iter_mut() {
                record.read = true;
            }
            state.unread_count = 0;
            self.shared.publish(&state);
            self.gate.schedule(state.latest.clone());
        }

        let source = self.source.clone();
        tokio::spawn(async move {
            if let Err(err) = source.mark_all_read().await {
                error!(error = ?err, "failed to mark all notifications read");
            }
        });
    }

    /// Prepends a locally synthesized notification. Used for pushed events;
    /// nothing is sent to the remote source.
    pub fn add_notification(&self, draft: NotificationDraft) -> Option<NotificationRecord> {
        let mut state = lock(&self.shared.state);
        if !state.active {
            return None;
        }

        let record = NotificationRecord::from_draft(
            draft,
            Uuid::new_v4().to_string(),
            unix_millis(OffsetDateTime::now_utc()),
        );
        state.latest.insert(0, record.clone());
        state.unread_count += 1;
        self.shared.publish(&state);
        self.gate.schedule(state.latest.clone());

        debug!(notification_id = %record.id, kind = ?record.kind, "added notification");
        Some(record)
    }

    pub fn clear_notification(&self, id: &str) {
        {
            let mut state = lock(&self.shared.state);
            if !state.active {
                return;
            }
            let Some(position) = state.latest.iter().position(|n| n.id == id) else {
                debug!(notification_id = id, "clear for unknown notification");
                return;
            };
            let removed = state.latest.remove(position);
            if !removed.read {
                state.unread_count = state.unread_count.saturating_sub(1);
                self.shared.publish(&state);
            }
            self.gate.schedule(state.latest.clone());
        }

        let source = self.source.clone();
        let id = id.to_string();
        tokio::spawn(async move {
            if let Err(err) = source.delete(&id).await {
                error!(error = ?err, notification_id = %id, "failed to delete notification");
            }
        });
    }

    /// Entry point for real-time events. Incomplete payloads are dropped.
    pub fn handle_event(&self, kind: EventKind, event: RealtimeEvent) {
        match kind.draft(&event) {
            Some(draft) => {
                self.add_notification(draft);
            }
            None => {
                debug!(event = kind.as_str(), "discarding incomplete realtime event");
            }
        }
    }

    /// Commits any pending write without waiting for the debounce window.
    pub fn flush(&self) -> bool {
        self.gate.flush()
    }

    /// Ends the store's session: pending writes are dropped, the list and
    /// counter are emptied, and later mutations are ignored.
    pub fn dispose(&self) {
        let mut state = lock(&self.shared.state);
        state.active = false;
        self.gate.cancel();
        state.committed.clear();
        state.latest.clear();
        state.unread_count = 0;
        self.shared.publish(&state);
    }
}

fn count_unread(notifications: &[NotificationRecord]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
