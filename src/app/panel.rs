use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::app::notifications::NotificationStore;
use crate::app::window::{RenderedList, ViewportWindow, WindowLayout, WindowedList};
use crate::domain::notification::{NotificationKind, NotificationRecord};

/// Where the router should go after a notification is clicked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationTarget {
    pub page: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<&'static str>,
}

impl NavigationTarget {
    pub fn for_record(record: &NotificationRecord) -> Option<Self> {
        match record.kind {
            NotificationKind::FriendRequest if record.actor_id.is_some() => Some(Self {
                page: "friends",
                tab: Some("requests"),
            }),
            NotificationKind::Like if record.related_post_id.is_some() => Some(Self {
                page: "feed",
                tab: None,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelInput {
    Escape,
    OutsideClick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    /// Badge next to the title; hidden when nothing is unread.
    pub unread_badge: Option<usize>,
    pub show_mark_all: bool,
    pub list: RenderedList,
}

/// The notification dropdown: visibility, row interactions and rendering.
pub struct NotificationPanel {
    store: NotificationStore,
    list: WindowedList,
    open: bool,
    navigate: mpsc::UnboundedSender<NavigationTarget>,
}

impl NotificationPanel {
    pub fn new(
        store: NotificationStore,
        layout: WindowLayout,
        navigate: mpsc::UnboundedSender<NavigationTarget>,
    ) -> Self {
        Self {
            store,
            list: WindowedList::new(layout),
            open: false,
            navigate,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn handle_input(&mut self, input: PanelInput) {
        if self.open {
            debug!(?input, "closing notification panel");
            self.close();
        }
    }

    pub fn mount(&mut self, viewport_height: u32) -> ViewportWindow {
        let len = self.store.snapshot().notifications.len();
        self.list.mount(viewport_height, len)
    }

    pub fn scroll(&mut self, scroll_offset: u32, viewport_height: u32) -> ViewportWindow {
        let len = self.store.snapshot().notifications.len();
        self.list.on_scroll(scroll_offset, viewport_height, len)
    }

    /// Marks the record read, signals navigation when the record points
    /// somewhere, and closes the panel.
    pub fn click(&mut self, id: &str) -> Option<NavigationTarget> {
        let snapshot = self.store.snapshot();
        let record = snapshot.get(id)?;

        self.store.mark_as_read(id);
        let target = NavigationTarget::for_record(record);
        if let Some(target) = &target {
            if self.navigate.send(target.clone()).is_err() {
                debug!(page = target.page, "navigation receiver dropped");
            }
        }
        self.close();
        target
    }

    pub fn dismiss(&self, id: &str) {
        self.store.clear_notification(id);
    }

    pub fn mark_all_read(&self) {
        self.store.mark_all_as_read();
    }

    pub fn render(&self, now_millis: i64) -> PanelView {
        let snapshot = self.store.snapshot();
        let unread = snapshot.unread_count;
        PanelView {
            unread_badge: (unread > 0).then_some(unread),
            show_mark_all: unread > 0,
            list: self.list.render(&snapshot.notifications, now_millis),
        }
    }
}
