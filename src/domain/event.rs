use serde::{Deserialize, Serialize};

use crate::domain::notification::{NotificationDraft, NotificationKind};
use crate::domain::user::Actor;

/// Real-time events the notification store subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    FriendRequest,
    FriendAccept,
    PostLike,
    PostComment,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::FriendRequest,
        EventKind::FriendAccept,
        EventKind::PostLike,
        EventKind::PostComment,
    ];

    /// Channel name on the socket.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::FriendRequest => "friend:request",
            EventKind::FriendAccept => "friend:accept",
            EventKind::PostLike => "post:like",
            EventKind::PostComment => "post:comment",
        }
    }

    pub fn is_post_scoped(&self) -> bool {
        matches!(self, EventKind::PostLike | EventKind::PostComment)
    }

    /// Builds the notification for an event, or `None` when the payload lacks
    /// the actor or, for post-scoped kinds, the post id.
    pub fn draft(&self, event: &RealtimeEvent) -> Option<NotificationDraft> {
        let actor = event.from_user.as_ref()?;
        let post_id = if self.is_post_scoped() {
            Some(event.post_id.as_deref()?)
        } else {
            None
        };

        let (kind, message) = match self {
            EventKind::FriendRequest => (
                NotificationKind::FriendRequest,
                format!("{} sent you a friend request", actor.name),
            ),
            EventKind::FriendAccept => (
                NotificationKind::FriendRequest,
                format!("{} accepted your friend request", actor.name),
            ),
            EventKind::PostLike => (NotificationKind::Like, format!("{} liked your post", actor.name)),
            EventKind::PostComment => (
                NotificationKind::Comment,
                format!("{} commented on your post", actor.name),
            ),
        };

        let draft = NotificationDraft::from_actor(kind, message, actor);
        Some(match post_id {
            Some(post_id) => draft.with_post(post_id),
            None => draft,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeEvent {
    #[serde(default)]
    pub from_user: Option<Actor>,
    #[serde(default)]
    pub post_id: Option<String>,
}
