/// User-visible notifications
///
/// The UI only ever shows one of these fixed messages; no status codes or
/// error text reach the user.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Button pressed with an empty URL field
    InvalidUrl,
    /// Fetch and decode succeeded (storage may still have failed)
    Downloaded,
    /// Fetch or decode failed
    Failed,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::InvalidUrl => "Please enter a valid URL",
            Notification::Downloaded => "Image downloaded successfully",
            Notification::Failed => "Failed to download image",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Something that can show a transient message to the user
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications instead of showing them
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
