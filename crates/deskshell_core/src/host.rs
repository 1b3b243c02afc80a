//! Collaborator contracts consumed from the host UI runtime.
//!
//! The core never renders; it asks the host for the viewport width, pushes
//! user-visible advisories to the host toast surface, and asks the host to
//! scroll to page sections.

use log::{info, warn};
use std::time::{SystemTime, UNIX_EPOCH};

/// Severity of a non-blocking user-visible message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisoryLevel {
    Info,
    Warning,
}

/// Non-blocking message for the host toast/alert surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub level: AdvisoryLevel,
    /// Stable machine-readable code, e.g. `note_empty`.
    pub code: &'static str,
    pub message: String,
}

impl Advisory {
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: AdvisoryLevel::Info,
            code,
            message: message.into(),
        }
    }
}

/// Services implemented by the host UI runtime.
pub trait Host {
    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> u32;

    /// Shows a non-blocking advisory.
    fn advise(&self, advisory: &Advisory);

    /// Scrolls or routes to a named page section.
    fn navigate(&self, section: &str) {
        info!("event=navigate module=host status=ignored section={section}");
    }
}

/// Host that reports a fixed width and only logs advisories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadlessHost {
    pub width: u32,
}

impl Host for HeadlessHost {
    fn viewport_width(&self) -> u32 {
        self.width
    }

    fn advise(&self, advisory: &Advisory) {
        warn!(
            "event=advisory module=host status=logged code={} message={}",
            advisory.code, advisory.message
        );
    }
}

/// Wall clock abstraction for note timestamps.
pub trait Clock {
    /// Unix epoch milliseconds.
    fn now_ms(&self) -> i64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}
