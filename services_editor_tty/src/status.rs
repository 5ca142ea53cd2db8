//! Transient status message

use std::time::{Duration, Instant};

/// How long a message stays on the message bar
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Message text stamped with the time it was set
#[derive(Debug, Clone)]
pub struct StatusMessage {
    text: String,
    set_at: Option<Instant>,
    timeout: Duration,
}

impl StatusMessage {
    pub fn new(timeout: Duration) -> Self {
        Self {
            text: String::new(),
            set_at: None,
            timeout,
        }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.set_at(text, Instant::now());
    }

    pub fn set_at(&mut self, text: impl Into<String>, at: Instant) {
        self.text = text.into();
        self.set_at = Some(at);
    }

    /// Full text, expired or not
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text to show at `now`; empty once the timeout has passed
    pub fn visible_at(&self, now: Instant) -> &str {
        match self.set_at {
            Some(at) if now.saturating_duration_since(at) < self.timeout => &self.text,
            _ => "",
        }
    }

    pub fn visible(&self) -> &str {
        self.visible_at(Instant::now())
    }
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_expires() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(5));
        status.set_at("saved", start);

        assert_eq!(status.visible_at(start), "saved");
        assert_eq!(status.visible_at(start + Duration::from_secs(4)), "saved");
        assert_eq!(status.visible_at(start + Duration::from_secs(5)), "");
        assert_eq!(status.text(), "saved");
    }

    #[test]
    fn test_unset_is_empty() {
        let mut status = StatusMessage::default();
        assert_eq!(status.visible(), "");

        status.set("hello");
        assert_eq!(status.visible(), "hello");
    }

    #[test]
    fn test_replacing_restarts_timer() {
        let start = Instant::now();
        let mut status = StatusMessage::new(Duration::from_secs(1));
        status.set_at("first", start);
        status.set_at("second", start + Duration::from_secs(2));
        assert_eq!(status.visible_at(start + Duration::from_millis(2500)), "second");
    }
}
