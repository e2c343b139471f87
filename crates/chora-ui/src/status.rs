//! Status-bar message with optional expiry.

use std::time::{Duration, Instant};

pub const READY: &str = "Ready";

/// Timeout used for file operation messages.
pub const FILE_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
    expires_at: Option<Instant>,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY.to_string(),
            expires_at: None,
        }
    }
}

impl StatusLine {
    /// Shows `message` until `timeout` has passed since `now`.
    pub fn show_for(&mut self, message: impl Into<String>, timeout: Duration, now: Instant) {
        self.message = message.into();
        self.expires_at = Some(now + timeout);
    }

    /// Reverts to `Ready` once the current message has expired. Returns
    /// whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(at) if now >= at => {
                *self = Self::default();
                true
            }
            _ => false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether a timer is pending.
    pub fn is_timed(&self) -> bool {
        self.expires_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ready() {
        let status = StatusLine::default();
        assert_eq!(status.message(), "Ready");
        assert!(!status.is_timed());
    }

    #[test]
    fn test_timed_message_expires() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.show_for("Saved: a.txt", FILE_MESSAGE_TIMEOUT, start);

        assert!(!status.tick(start + Duration::from_millis(4999)));
        assert_eq!(status.message(), "Saved: a.txt");

        assert!(status.tick(start + FILE_MESSAGE_TIMEOUT));
        assert_eq!(status.message(), READY);
        assert!(!status.is_timed());
    }

    #[test]
    fn test_new_message_replaces_timer() {
        let start = Instant::now();
        let mut status = StatusLine::default();
        status.show_for("first", Duration::from_secs(1), start);
        status.show_for("second", Duration::from_secs(10), start);

        assert!(!status.tick(start + Duration::from_secs(5)));
        assert_eq!(status.message(), "second");
    }
}
