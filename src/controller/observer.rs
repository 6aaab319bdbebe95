//! Observers receive controller events after the lock is released.

use std::sync::{mpsc, Mutex, PoisonError};

use tracing::trace;

use super::event::GameEvent;

/// Receiver of controller notifications.
///
/// Called from whichever thread processed the request, never while the
/// controller lock is held, so an observer may call back into the
/// controller (for example to answer a `GameOver`).
pub trait GameObserver: Send + Sync {
    fn on_event(&self, event: &GameEvent);
}

impl GameObserver for mpsc::Sender<GameEvent> {
    fn on_event(&self, event: &GameEvent) {
        if self.send(event.clone()).is_err() {
            trace!("event receiver dropped");
        }
    }
}

/// Observer that keeps every event in memory.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<GameEvent>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events seen so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all events seen so far.
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl GameObserver for EventLog {
    fn on_event(&self, event: &GameEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
