use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::app::notifications::{NotificationSource, NotificationStore};
use crate::app::realtime::{AttachPolicy, EventSource, RealtimeAttachment};
use crate::domain::user::SessionUser;

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub debounce: Duration,
    pub attach: AttachPolicy,
}

/// Notification state for one signed-in user, from login to logout.
pub struct Session {
    user: SessionUser,
    store: NotificationStore,
    initial_fetch: JoinHandle<()>,
    attachment: RealtimeAttachment,
}

impl Session {
    pub fn start(
        user: SessionUser,
        source: Arc<dyn NotificationSource>,
        events: Arc<dyn EventSource>,
        settings: SessionSettings,
    ) -> Self {
        info!(user_id = %user.id, "starting notification session");

        let store = NotificationStore::new(source, settings.debounce);
        let initial_fetch = tokio::spawn({
            let store = store.clone();
            async move { store.refresh().await }
        });
        let attachment = RealtimeAttachment::spawn(store.clone(), events, settings.attach);

        Self {
            user,
            store,
            initial_fetch,
            attachment,
        }
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn store(&self) -> &NotificationStore {
        &self.store
    }

    pub fn attachment(&self) -> &RealtimeAttachment {
        &self.attachment
    }

    pub fn end(self) {
        info!(user_id = %self.user.id, "ending notification session");
        self.initial_fetch.abort();
        self.attachment.cancel();
        self.store.dispose();
    }
}
