use std::ops::Range;

use crate::app::format::{self, RowIcon};
use crate::domain::notification::NotificationRecord;

pub const ITEM_HEIGHT: u32 = 68;
pub const OVERSCAN: usize = 2;

/// Rows shown before the viewport has been measured.
const UNMEASURED_ROWS: usize = 10;

/// Row geometry. Rows are not measured individually: every row must render
/// at exactly `item_height` for the fillers to line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub item_height: u32,
    pub overscan: usize,
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self {
            item_height: ITEM_HEIGHT,
            overscan: OVERSCAN,
        }
    }
}

/// Half-open range of list indices to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportWindow {
    pub start_index: usize,
    pub end_index: usize,
}

impl ViewportWindow {
    pub fn compute(
        scroll_offset: u32,
        viewport_height: u32,
        layout: WindowLayout,
        list_len: usize,
    ) -> Self {
        let item_height = layout.item_height.max(1);
        let first_visible = (scroll_offset / item_height) as usize;
        let visible_rows = viewport_height.div_ceil(item_height) as usize;

        let end_index = first_visible
            .saturating_add(visible_rows)
            .saturating_add(layout.overscan)
            .min(list_len);
        let start_index = first_visible.saturating_sub(layout.overscan).min(end_index);

        Self {
            start_index,
            end_index,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Heights of the blank regions above and below the materialized rows.
    pub fn fillers(&self, item_height: u32, list_len: usize) -> (u64, u64) {
        let item_height = u64::from(item_height);
        let top = self.start_index as u64 * item_height;
        let bottom = list_len.saturating_sub(self.end_index) as u64 * item_height;
        (top, bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    Unmeasured,
    Measured {
        scroll_offset: u32,
        viewport_height: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    pub id: String,
    pub message: String,
    pub relative_time: String,
    pub avatar_url: Option<String>,
    pub icon: RowIcon,
    pub unread: bool,
}

impl NotificationRow {
    pub fn from_record(record: &NotificationRecord, now_millis: i64) -> Self {
        Self {
            id: record.id.clone(),
            message: record.message.clone(),
            relative_time: format::relative_time(record.created_at_millis, now_millis),
            avatar_url: record
                .actor_avatar
                .as_ref()
                .map(|avatar| format::avatar_url(Some(avatar), "User", format::AVATAR_SIZE)),
            icon: RowIcon::for_kind(record.kind),
            unread: !record.read,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: &'static str,
    pub hint: &'static str,
}

impl Default for EmptyState {
    fn default() -> Self {
        Self {
            title: "No new notifications",
            hint: "We'll let you know when something new happens.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedList {
    Empty(EmptyState),
    Window {
        window: ViewportWindow,
        top_filler: u64,
        rows: Vec<NotificationRow>,
        bottom_filler: u64,
    },
}

/// Virtualized notification list: only rows inside the viewport (plus
/// overscan) are materialized, the rest is blank filler of equal height.
#[derive(Debug, Clone)]
pub struct WindowedList {
    layout: WindowLayout,
    measurement: Measurement,
}

impl WindowedList {
    pub fn new(layout: WindowLayout) -> Self {
        Self {
            layout,
            measurement: Measurement::Unmeasured,
        }
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn mount(&mut self, viewport_height: u32, list_len: usize) -> ViewportWindow {
        self.on_scroll(0, viewport_height, list_len)
    }

    pub fn on_scroll(
        &mut self,
        scroll_offset: u32,
        viewport_height: u32,
        list_len: usize,
    ) -> ViewportWindow {
        self.measurement = Measurement::Measured {
            scroll_offset,
            viewport_height,
        };
        self.window(list_len)
    }

    pub fn window(&self, list_len: usize) -> ViewportWindow {
        match self.measurement {
            Measurement::Unmeasured => ViewportWindow {
                start_index: 0,
                end_index: UNMEASURED_ROWS.min(list_len),
            },
            Measurement::Measured {
                scroll_offset,
                viewport_height,
            } => ViewportWindow::compute(scroll_offset, viewport_height, self.layout, list_len),
        }
    }

    pub fn render(&self, records: &[NotificationRecord], now_millis: i64) -> RenderedList {
        if records.is_empty() {
            return RenderedList::Empty(EmptyState::default());
        }

        let window = self.window(records.len());
        let (top_filler, bottom_filler) = window.fillers(self.layout.item_height, records.len());
        let rows = records[window.range()]
            .iter()
            .map(|record| NotificationRow::from_record(record, now_millis))
            .collect();

        RenderedList::Window {
            window,
            top_filler,
            rows,
            bottom_filler,
        }
    }
}
