//! Domain events for the application.
//!
//! Events are published on the broadcast bus. They drive two things: the
//! transient notifications shown to admins after a write, and the live change
//! stream clients subscribe to in order to refresh their views.

use serde::Serialize;

use super::{Collection, WriteKind};

/// Events sent to connected clients via SSE (Server-Sent Events).
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "payload")]
pub enum NotificationEvent {
    /// A write was dispatched. Published optimistically before the store
    /// acknowledges it.
    WriteDispatched {
        collection: Collection,
        kind: WriteKind,
        id: String,
        title: String,
        description: String,
    },

    /// A collection changed in the store. Subscribers should re-read.
    CollectionChanged {
        collection: Collection,
        kind: WriteKind,
        id: String,
    },

    /// A dispatched write failed after the fact.
    Error {
        message: String,
    },
}

impl NotificationEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WriteDispatched { .. } => "WriteDispatched",
            Self::CollectionChanged { .. } => "CollectionChanged",
            Self::Error { .. } => "Error",
        }
    }
}
