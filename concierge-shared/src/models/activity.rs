use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Free-text note attached to a booking or a customer account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    pub id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: author.into(),
            body: body.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityKind {
    Created,
    ItemApproved,
    ItemDeclined,
    ItemReset,
    NoteAdded,
}

/// Append-only audit trail entry on a booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    pub actor: String,
    pub kind: ActivityKind,
    pub message: String,
}

impl ActivityEntry {
    pub fn new(actor: impl Into<String>, kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            at: Utc::now(),
            actor: actor.into(),
            kind,
            message: message.into(),
        }
    }
}
