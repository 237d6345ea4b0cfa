use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::user::{Actor, Avatar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FriendRequest,
    Like,
    Comment,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at_millis: i64,
    pub read: bool,
    pub actor_id: Option<String>,
    pub related_post_id: Option<String>,
    pub actor_avatar: Option<Avatar>,
}

/// A notification before the store has assigned its id, timestamp and read flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    pub kind: NotificationKind,
    pub message: String,
    pub actor_id: Option<String>,
    pub related_post_id: Option<String>,
    pub actor_avatar: Option<Avatar>,
}

impl NotificationDraft {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            actor_id: None,
            related_post_id: None,
            actor_avatar: None,
        }
    }

    pub fn from_actor(kind: NotificationKind, message: impl Into<String>, actor: &Actor) -> Self {
        Self {
            kind,
            message: message.into(),
            actor_id: Some(actor.id.clone()),
            related_post_id: None,
            actor_avatar: actor.avatar.clone(),
        }
    }

    pub fn with_post(mut self, post_id: impl Into<String>) -> Self {
        self.related_post_id = Some(post_id.into());
        self
    }
}

impl NotificationRecord {
    pub fn from_draft(draft: NotificationDraft, id: String, created_at_millis: i64) -> Self {
        Self {
            id,
            kind: draft.kind,
            message: draft.message,
            created_at_millis,
            read: false,
            actor_id: draft.actor_id,
            related_post_id: draft.related_post_id,
            actor_avatar: draft.actor_avatar,
        }
    }
}

/// Post reference as sent by the remote source: a bare id or an embedded post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostRef {
    Id(String),
    Post { id: String },
}

impl PostRef {
    pub fn id(&self) -> &str {
        match self {
            PostRef::Id(id) => id,
            PostRef::Post { id } => id,
        }
    }
}

/// Wire format of the remote notification source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub sender: Actor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<PostRef>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub read: bool,
}

impl From<RemoteNotification> for NotificationRecord {
    fn from(remote: RemoteNotification) -> Self {
        let name = &remote.sender.name;
        let (kind, message) = match remote.notification_type.as_str() {
            "friend_request" => (
                NotificationKind::FriendRequest,
                format!("{} sent you a friend request", name),
            ),
            "friend_accepted" => (
                NotificationKind::FriendRequest,
                format!("{} accepted your friend request", name),
            ),
            "like" if remote.post.is_some() => {
                (NotificationKind::Like, format!("{} liked your post", name))
            }
            "like" => (NotificationKind::Like, format!("{} liked your profile", name)),
            "comment" => (
                NotificationKind::Comment,
                format!("{} commented on your post", name),
            ),
            _ => match remote.content.as_deref() {
                Some(content) => (NotificationKind::System, format!("{} {}", name, content)),
                None => (
                    NotificationKind::System,
                    "You have a new notification".to_string(),
                ),
            },
        };

        Self {
            id: remote.id,
            kind,
            message,
            created_at_millis: unix_millis(remote.created_at),
            read: remote.read,
            actor_id: Some(remote.sender.id),
            related_post_id: remote.post.map(|post| post.id().to_string()),
            actor_avatar: remote.sender.avatar,
        }
    }
}

pub fn unix_millis(at: OffsetDateTime) -> i64 {
    (at.unix_timestamp_nanos() / 1_000_000) as i64
}
