use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::models::schedule::ScheduleOwner;

/// Typed directory-change notifications. Payloads are explicit so that
/// subscribers never have to re-derive what changed from a bare topic
/// string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    StaffDeleted { staff_id: String },
    ScheduleChanged { owner: ScheduleOwner },
    AppointmentsChanged { location_id: Option<String> },
}

/// Broadcast channel carrying DirectoryEvents from the editing screens
/// to the calendar controller.
#[derive(Clone)]
pub struct DirectoryBus {
    tx: broadcast::Sender<DirectoryEvent>,
}

impl DirectoryBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: DirectoryEvent) {
        // A send with no live subscribers is not an error here.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DirectoryEvent> {
        self.tx.subscribe()
    }
}
