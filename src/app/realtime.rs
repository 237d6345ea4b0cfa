use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::app::notifications::NotificationStore;
use crate::domain::event::{EventKind, RealtimeEvent};

pub type EventHandler = Arc<dyn Fn(RealtimeEvent) + Send + Sync>;

/// Push channel delivering friend and post events (a socket in production).
pub trait EventSource: Send + Sync {
    fn is_ready(&self) -> bool;
    fn on(&self, kind: EventKind, handler: EventHandler) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachPolicy {
    pub initial_delay: Duration,
    pub retry_interval: Duration,
    pub max_attempts: u32,
}

impl Default for AttachPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(2),
            retry_interval: Duration::from_secs(1),
            max_attempts: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached { attempts: u32 },
    Abandoned { attempts: u32 },
}

/// Handle on the background task wiring store handlers onto an event source.
pub struct RealtimeAttachment {
    task: JoinHandle<AttachOutcome>,
}

impl RealtimeAttachment {
    pub fn spawn(
        store: NotificationStore,
        events: Arc<dyn EventSource>,
        policy: AttachPolicy,
    ) -> Self {
        Self {
            task: tokio::spawn(run(store, events, policy)),
        }
    }

    /// Stops any pending retry. Handlers already registered stay registered
    /// but become inert once the store is disposed.
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the attachment to settle; `None` when it was cancelled.
    pub async fn outcome(self) -> Option<AttachOutcome> {
        self.task.await.ok()
    }
}

async fn run(
    store: NotificationStore,
    events: Arc<dyn EventSource>,
    policy: AttachPolicy,
) -> AttachOutcome {
    tokio::time::sleep(policy.initial_delay).await;

    let mut registered = HashSet::new();
    let mut attempts = 0;
    loop {
        debug!(attempt = attempts + 1, "attaching realtime handlers");

        let failure = if events.is_ready() {
            match register(&store, events.as_ref(), &mut registered) {
                Ok(()) => {
                    info!(attempts = attempts + 1, "realtime handlers attached");
                    return AttachOutcome::Attached {
                        attempts: attempts + 1,
                    };
                }
                Err(err) => format!("{:#}", err),
            }
        } else {
            "event source not ready".to_string()
        };

        attempts += 1;
        if attempts >= policy.max_attempts {
            error!(attempts, reason = %failure, "giving up on realtime handlers");
            return AttachOutcome::Abandoned { attempts };
        }

        warn!(
            attempts,
            max_attempts = policy.max_attempts,
            reason = %failure,
            "realtime attach failed, retrying"
        );
        tokio::time::sleep(policy.retry_interval).await;
    }
}

/// Kinds already in `registered` are skipped, so a retry after a partial
/// failure never installs a second handler for the same kind.
fn register(
    store: &NotificationStore,
    events: &dyn EventSource,
    registered: &mut HashSet<EventKind>,
) -> Result<()> {
    for kind in EventKind::ALL {
        if registered.contains(&kind) {
            continue;
        }
        let store = store.clone();
        events.on(kind, Arc::new(move |event| store.handle_event(kind, event)))?;
        registered.insert(kind);
    }
    Ok(())
}
