use serde::Deserialize;
use uuid::Uuid;

/// Payload for registering a message. Any `id` sent by the client is not
/// read; the service always assigns one.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub author: String,
    pub content: String,
}

/// Payload for updating a message. Only `content` is applied; `id` must
/// match the identifier the update is addressed to.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMessage {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub author: Option<String>,
    pub content: String,
}

impl NewMessage {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self { author: author.into(), content: content.into() }
    }
}

impl UpdateMessage {
    pub fn new(id: Uuid, content: impl Into<String>) -> Self {
        Self { id: Some(id), author: None, content: content.into() }
    }
}
