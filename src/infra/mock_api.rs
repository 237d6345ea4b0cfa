use std::sync::{Arc, Mutex};

use anyhow::Result;
use futures::future::BoxFuture;
use futures::FutureExt;
use rand::Rng;
use tracing::debug;

use crate::app::debounce::lock;
use crate::app::notifications::NotificationSource;
use crate::config::latency::{MockLatency, MockOperation};
use crate::domain::notification::RemoteNotification;
use crate::infra::mock_data;

/// In-memory notification backend standing in for the REST API.
#[derive(Clone)]
pub struct MockNotificationApi {
    notifications: Arc<Mutex<Vec<RemoteNotification>>>,
    latency: MockLatency,
}

impl MockNotificationApi {
    pub fn new(latency: MockLatency) -> Self {
        Self::with_notifications(mock_data::notifications(), latency)
    }

    pub fn with_notifications(notifications: Vec<RemoteNotification>, latency: MockLatency) -> Self {
        Self {
            notifications: Arc::new(Mutex::new(notifications)),
            latency,
        }
    }

    async fn simulate(&self, operation: MockOperation) {
        let base = self.latency.base_delay(operation);
        if base.is_zero() {
            return;
        }
        tokio::time::sleep(base.mul_f64(1.0 + self.jitter())).await;
    }

    fn jitter(&self) -> f64 {
        if self.latency.jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..self.latency.jitter)
        } else {
            0.0
        }
    }

    pub async fn fetch_all(&self) -> Vec<RemoteNotification> {
        self.simulate(MockOperation::List).await;
        lock(&self.notifications).clone()
    }

    /// Returns whether a notification with `id` exists.
    pub async fn set_read(&self, id: &str) -> bool {
        self.simulate(MockOperation::MarkRead).await;
        let mut notifications = lock(&self.notifications);
        match notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub async fn set_all_read(&self) -> usize {
        self.simulate(MockOperation::MarkAllRead).await;
        let mut notifications = lock(&self.notifications);
        let mut updated = 0;
        for notification in notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            updated += 1;
        }
        updated
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.simulate(MockOperation::Delete).await;
        let mut notifications = lock(&self.notifications);
        let before = notifications.len();
        notifications.retain(|n| n.id != id);
        debug!(notification_id = id, "mock api deleted notification");
        notifications.len() < before
    }

    /// Inserts a notification at the head of the list, as a server would
    /// when something new happens.
    pub fn push(&self, notification: RemoteNotification) {
        lock(&self.notifications).insert(0, notification);
    }
}

impl NotificationSource for MockNotificationApi {
    fn list(&self) -> BoxFuture<'_, Result<Vec<RemoteNotification>>> {
        async move { Ok(self.fetch_all().await) }.boxed()
    }

    fn mark_read<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            self.set_read(id).await;
            Ok(())
        }
        .boxed()
    }

    fn mark_all_read(&self) -> BoxFuture<'_, Result<()>> {
        async move {
            self.set_all_read().await;
            Ok(())
        }
        .boxed()
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            self.remove(id).await;
            Ok(())
        }
        .boxed()
    }
}
