use crate::domain::events::NotificationEvent;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Mirrors every bus notification into the log.
pub struct NotificationLogger {
    event_bus: broadcast::Sender<NotificationEvent>,
}

impl NotificationLogger {
    #[must_use]
    pub const fn new(event_bus: broadcast::Sender<NotificationEvent>) -> Self {
        Self { event_bus }
    }

    pub fn start_listener(self) {
        let mut rx = self.event_bus.subscribe();

        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => log_event(&event),
                    Err(broadcast::error::RecvError::Lagged(count)) => {
                        warn!(count, "Notification listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Notification listener event bus closed");
                        break;
                    }
                }
            }
        });
    }
}

fn log_event(event: &NotificationEvent) {
    match event {
        NotificationEvent::WriteDispatched {
            collection,
            kind,
            id,
            title,
            ..
        } => info!(
            collection = collection.as_str(),
            op = kind.as_str(),
            id = %id,
            "{title}"
        ),
        NotificationEvent::CollectionChanged {
            collection,
            kind,
            id,
        } => debug!(
            collection = collection.as_str(),
            op = kind.as_str(),
            id = %id,
            "Collection changed"
        ),
        NotificationEvent::Error { message } => error!(event = event.name(), "{message}"),
    }
}
