use time::macros::datetime;

use crate::domain::notification::{PostRef, RemoteNotification};
use crate::domain::user::{Actor, Avatar};

fn user(id: &str, name: &str, avatar_url: &str, public_id: &str) -> Actor {
    Actor {
        id: id.to_string(),
        name: name.to_string(),
        avatar: Some(Avatar::Reference {
            url: avatar_url.to_string(),
            public_id: Some(public_id.to_string()),
        }),
    }
}

pub fn users() -> Vec<Actor> {
    vec![
        user(
            "user-1",
            "Shombhunath Karan",
            "https://avatar.iran.liara.run/public/17",
            "avatar-1",
        ),
        user(
            "user-2",
            "Soumyajit Ghosh",
            "https://avatar.iran.liara.run/public/21",
            "avatar-2",
        ),
        user(
            "user-3",
            "Prof. Sourav Saha",
            "https://avatar.iran.liara.run/public/33",
            "avatar-3",
        ),
        user(
            "user-4",
            "Rahul Roy",
            "https://avatar.iran.liara.run/public/50",
            "avatar-4",
        ),
        user(
            "user-5",
            "Saptarshi Mukherjee",
            "https://avatar.iran.liara.run/public/48",
            "avatar-5",
        ),
    ]
}

/// Canned notifications for `user-1`, newest first.
pub fn notifications() -> Vec<RemoteNotification> {
    let users = users();
    let post = |id: &str| Some(PostRef::Post { id: id.to_string() });

    vec![
        RemoteNotification {
            id: "notif-1".into(),
            notification_type: "like".into(),
            content: Some("liked your post".into()),
            sender: users[1].clone(),
            post: post("post-1"),
            created_at: datetime!(2023-07-10 14:35 UTC),
            read: false,
        },
        RemoteNotification {
            id: "notif-2".into(),
            notification_type: "comment".into(),
            content: Some("commented on your post".into()),
            sender: users[2].clone(),
            post: post("post-1"),
            created_at: datetime!(2023-07-10 15:00 UTC),
            read: true,
        },
        RemoteNotification {
            id: "notif-3".into(),
            notification_type: "friend_request".into(),
            content: Some("sent you a friend request".into()),
            sender: users[3].clone(),
            post: None,
            created_at: datetime!(2023-07-09 11:20 UTC),
            read: false,
        },
        RemoteNotification {
            id: "notif-4".into(),
            notification_type: "friend_accepted".into(),
            content: Some("accepted your friend request".into()),
            sender: users[4].clone(),
            post: None,
            created_at: datetime!(2023-07-08 09:30 UTC),
            read: false,
        },
        RemoteNotification {
            id: "notif-5".into(),
            notification_type: "like".into(),
            content: Some("liked your post".into()),
            sender: users[4].clone(),
            post: post("post-4"),
            created_at: datetime!(2023-07-07 17:15 UTC),
            read: true,
        },
    ]
}
