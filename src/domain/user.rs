use serde::{Deserialize, Serialize};

/// Avatar as stored on a profile: either a direct URL or an uploaded-image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Avatar {
    Url(String),
    Reference {
        url: String,
        #[serde(rename = "publicId", default, skip_serializing_if = "Option::is_none")]
        public_id: Option<String>,
    },
}

impl Avatar {
    pub fn url(&self) -> &str {
        match self {
            Avatar::Url(url) => url,
            Avatar::Reference { url, .. } => url,
        }
    }
}

/// The user who triggered a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<Avatar>,
}

/// The signed-in user owning a notification session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
}
