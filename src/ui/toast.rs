/// Short-lived message at the bottom of the window
///
/// Showing a toast replaces the current one. Each toast gets an id so that
/// the timer of an older toast does not dismiss a newer one.

use std::time::Duration;

use crate::notify::{Notification, Notifier};

/// How long a toast stays visible
pub const TOAST_DURATION: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: &'static str,
}

#[derive(Debug, Default)]
pub struct Toasts {
    current: Option<Toast>,
    next_id: u64,
    /// Ids shown since the last `take_started`, waiting for a dismiss timer
    started: Vec<u64>,
}

impl Toasts {
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Hide the toast with this id, if it is still the one on screen
    pub fn expire(&mut self, id: u64) {
        if self.current.as_ref().is_some_and(|t| t.id == id) {
            self.current = None;
        }
    }

    /// Ids of toasts that need a dismiss timer
    pub fn take_started(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.started)
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        self.next_id += 1;
        self.current = Some(Toast {
            id: self.next_id,
            message: notification.message(),
        });
        self.started.push(self.next_id);
    }
}

/// Sleep for the toast duration, then report which toast to hide
pub async fn dismiss_after(id: u64) -> u64 {
    tokio::time::sleep(TOAST_DURATION).await;
    id
}
