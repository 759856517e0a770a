//! Single-slot transient status message with auto-dismiss.
//!
//! At most one message is live at a time. Showing a new message replaces any
//! pending one and restarts the dismissal window (debounce, not a queue).
//! Expiry is evaluated lazily against the clock, so there is no detached
//! timer callback to cancel; dropping the notifier drops any pending message.

use std::time::{Duration, Instant};

/// How long a message stays visible after its most recent `show`.
pub const DISMISS_AFTER: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    kind: NoticeKind,
    shown_at: Instant,
}

#[derive(Debug, Default)]
pub struct Notifier {
    current: Option<Notice>,
}

impl Notifier {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn show<T: Into<String>>(&mut self, text: T) {
        self.show_at(text, NoticeKind::Info, Instant::now());
    }

    pub fn show_error<T: Into<String>>(&mut self, text: T) {
        self.show_at(text, NoticeKind::Error, Instant::now());
    }

    /// The live message text, or `""` when nothing is live or the window
    /// has elapsed.
    pub fn current(&mut self) -> &str {
        self.current_at(Instant::now())
    }

    /// Kind of the live message, `None` once it expires.
    pub fn kind(&mut self) -> Option<NoticeKind> {
        self.kind_at(Instant::now())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn show_at<T: Into<String>>(&mut self, text: T, kind: NoticeKind, now: Instant) {
        self.current = Some(Notice {
            text: text.into(),
            kind,
            shown_at: now,
        });
    }

    fn current_at(&mut self, now: Instant) -> &str {
        self.expire(now);
        self.current
            .as_ref()
            .map(|notice| notice.text.as_str())
            .unwrap_or("")
    }

    fn kind_at(&mut self, now: Instant) -> Option<NoticeKind> {
        self.expire(now);
        self.current.as_ref().map(|notice| notice.kind)
    }

    fn expire(&mut self, now: Instant) {
        if let Some(notice) = &self.current {
            if now.duration_since(notice.shown_at) > DISMISS_AFTER {
                self.current = None;
            }
        }
    }
}
