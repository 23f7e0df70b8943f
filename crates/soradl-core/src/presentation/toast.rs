//! Transient notifications.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

/// Holds at most one toast; a new one replaces the old. Toasts dismiss
/// themselves after the configured lifetime.
#[derive(Debug)]
pub struct ToastCenter {
    ttl: Duration,
    current: Option<Toast>,
}

impl ToastCenter {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity) -> &Toast {
        self.show_at(message, severity, Instant::now())
    }

    pub fn show_at(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> &Toast {
        let message = message.into();
        match severity {
            Severity::Error => tracing::warn!(%message, "notification"),
            _ => tracing::info!(%message, "notification"),
        }
        self.current.insert(Toast {
            message,
            severity,
            expires_at: now + self.ttl,
        })
    }

    /// The toast on screen at `now`, if it has not expired.
    pub fn current(&self, now: Instant) -> Option<&Toast> {
        self.current.as_ref().filter(|t| now < t.expires_at)
    }

    /// Last toast shown, expired or not.
    pub fn latest(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// Close button.
    pub fn dismiss(&mut self) {
        self.current = None;
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}
