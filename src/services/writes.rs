//! Fire-and-forget writes to the catalog collections.
//!
//! A handler validates its form, builds a [`WriteOp`] and hands it to the
//! [`WriteDispatcher`]. The dispatcher publishes an optimistic
//! `WriteDispatched` notification right away and runs the store call on a
//! background task. Success is announced with `CollectionChanged`; failure
//! only with an `Error` notification. There is no retry and no cancellation.

use crate::db::{Store, now_timestamp};
use crate::domain::events::NotificationEvent;
use crate::domain::{Collection, DramaId, GenreId, PartId, WriteKind};
use crate::forms::{DramaFields, GenreFields, PartFields};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{collection} {id} not found")]
    NotFound { collection: &'static str, id: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Write task aborted: {0}")]
    Aborted(String),
}

impl From<anyhow::Error> for WriteError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A single store mutation. Create ids are assigned before dispatch so the
/// caller can hand them back immediately.
#[derive(Debug, Clone)]
pub enum WriteOp {
    CreateDrama { id: DramaId, fields: DramaFields },
    UpdateDrama { id: DramaId, fields: DramaFields },
    DeleteDrama { id: DramaId },
    CreateGenre { id: GenreId, fields: GenreFields },
    UpdateGenre { id: GenreId, fields: GenreFields },
    DeleteGenre { id: GenreId },
    CreatePart { id: PartId, fields: PartFields },
    UpdatePart { id: PartId, fields: PartFields },
    DeletePart { id: PartId },
}

impl WriteOp {
    #[must_use]
    pub const fn collection(&self) -> Collection {
        match self {
            Self::CreateDrama { .. } | Self::UpdateDrama { .. } | Self::DeleteDrama { .. } => {
                Collection::Dramas
            }
            Self::CreateGenre { .. } | Self::UpdateGenre { .. } | Self::DeleteGenre { .. } => {
                Collection::Genres
            }
            Self::CreatePart { .. } | Self::UpdatePart { .. } | Self::DeletePart { .. } => {
                Collection::Parts
            }
        }
    }

    #[must_use]
    pub const fn kind(&self) -> WriteKind {
        match self {
            Self::CreateDrama { .. } | Self::CreateGenre { .. } | Self::CreatePart { .. } => {
                WriteKind::Create
            }
            Self::UpdateDrama { .. } | Self::UpdateGenre { .. } | Self::UpdatePart { .. } => {
                WriteKind::Update
            }
            Self::DeleteDrama { .. } | Self::DeleteGenre { .. } | Self::DeletePart { .. } => {
                WriteKind::Delete
            }
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::CreateDrama { id, .. } | Self::UpdateDrama { id, .. } | Self::DeleteDrama { id } => {
                id.as_str()
            }
            Self::CreateGenre { id, .. } | Self::UpdateGenre { id, .. } | Self::DeleteGenre { id } => {
                id.as_str()
            }
            Self::CreatePart { id, .. } | Self::UpdatePart { id, .. } | Self::DeletePart { id } => {
                id.as_str()
            }
        }
    }

    /// Notification text shown as soon as the write is dispatched.
    #[must_use]
    pub fn dispatched_message(&self) -> (String, String) {
        let label = self.collection().label();
        let title = match self.kind() {
            WriteKind::Create => format!("{label} Created"),
            WriteKind::Update => format!("{label} Updated"),
            WriteKind::Delete => format!("{label} Deleted"),
        };

        let description = match self {
            Self::CreateDrama { fields, .. } => format!("\"{}\" has been added.", fields.title),
            Self::UpdateDrama { fields, .. } => format!("\"{}\" has been updated.", fields.title),
            Self::CreateGenre { fields, .. } => format!("\"{}\" has been added.", fields.name),
            Self::UpdateGenre { fields, .. } => format!("\"{}\" has been updated.", fields.name),
            Self::CreatePart { fields, .. } => format!(
                "Part {} \"{}\" has been added.",
                fields.part_number, fields.title
            ),
            Self::UpdatePart { fields, .. } => format!(
                "Part {} \"{}\" has been updated.",
                fields.part_number, fields.title
            ),
            Self::DeleteDrama { .. } => {
                "The drama has been removed. Its parts are kept.".to_string()
            }
            Self::DeleteGenre { .. } => {
                "The genre has been removed. Dramas that list it are not changed.".to_string()
            }
            Self::DeletePart { .. } => "The part has been removed.".to_string(),
        };

        (title, description)
    }

    fn dispatched_event(&self) -> NotificationEvent {
        let (title, description) = self.dispatched_message();
        NotificationEvent::WriteDispatched {
            collection: self.collection(),
            kind: self.kind(),
            id: self.id().to_string(),
            title,
            description,
        }
    }

    fn not_found(&self) -> WriteError {
        WriteError::NotFound {
            collection: self.collection().label(),
            id: self.id().to_string(),
        }
    }

    async fn apply(&self, store: &Store) -> Result<(), WriteError> {
        let affected = match self {
            Self::CreateDrama { id, fields } => {
                store.insert_drama(id, fields, &now_timestamp()).await?;
                1
            }
            Self::UpdateDrama { id, fields } => store.update_drama(id, fields).await?,
            Self::DeleteDrama { id } => store.delete_drama(id).await?,
            Self::CreateGenre { id, fields } => {
                store.insert_genre(id, fields, &now_timestamp()).await?;
                1
            }
            Self::UpdateGenre { id, fields } => store.update_genre(id, fields).await?,
            Self::DeleteGenre { id } => store.delete_genre(id).await?,
            Self::CreatePart { id, fields } => {
                store.insert_part(id, fields, &now_timestamp()).await?;
                1
            }
            Self::UpdatePart { id, fields } => store.update_part(id, fields).await?,
            Self::DeletePart { id } => store.delete_part(id).await?,
        };

        if affected == 0 {
            return Err(self.not_found());
        }
        Ok(())
    }
}

/// Handle on a dispatched write. Dropping it does not cancel the write.
pub struct WriteHandle {
    id: String,
    task: JoinHandle<Result<(), WriteError>>,
}

impl WriteHandle {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Waits for the store to acknowledge the write.
    pub async fn wait(self) -> Result<(), WriteError> {
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(WriteError::Aborted(e.to_string())),
        }
    }
}

#[derive(Clone)]
pub struct WriteDispatcher {
    store: Store,
    event_bus: broadcast::Sender<NotificationEvent>,
}

impl WriteDispatcher {
    #[must_use]
    pub const fn new(store: Store, event_bus: broadcast::Sender<NotificationEvent>) -> Self {
        Self { store, event_bus }
    }

    /// Publishes the optimistic notification and starts the write.
    /// Returns before the store has seen it.
    pub fn dispatch(&self, op: WriteOp) -> WriteHandle {
        let id = op.id().to_string();
        let _ = self.event_bus.send(op.dispatched_event());

        let store = self.store.clone();
        let event_bus = self.event_bus.clone();

        let task = tokio::spawn(async move {
            let collection = op.collection();
            let kind = op.kind();
            let result = op.apply(&store).await;

            let outcome = if result.is_ok() { "ok" } else { "error" };
            metrics::counter!(
                "catalog_writes_total",
                "collection" => collection.as_str(),
                "op" => kind.as_str(),
                "outcome" => outcome
            )
            .increment(1);

            match &result {
                Ok(()) => {
                    debug!(
                        collection = collection.as_str(),
                        op = kind.as_str(),
                        id = op.id(),
                        "Write applied"
                    );
                    let _ = event_bus.send(NotificationEvent::CollectionChanged {
                        collection,
                        kind,
                        id: op.id().to_string(),
                    });
                }
                Err(e) => {
                    error!(
                        collection = collection.as_str(),
                        op = kind.as_str(),
                        id = op.id(),
                        error = %e,
                        "Write failed"
                    );
                    let _ = event_bus.send(NotificationEvent::Error {
                        message: format!(
                            "Failed to {} {}: {e}",
                            kind.as_str(),
                            collection.label().to_lowercase()
                        ),
                    });
                }
            }

            result
        });

        WriteHandle { id, task }
    }
}
