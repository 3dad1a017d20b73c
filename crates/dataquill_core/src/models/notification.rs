//! Transient user notifications (toasts).

use std::fmt;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Neutral progress information.
    #[default]
    Info,
    /// An operation completed.
    Success,
    /// Something worth attention that did not fail.
    Warning,
    /// An operation failed.
    Error,
}

impl Severity {
    /// Lowercase label used in log output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short title.
    pub title: String,
    /// One-line description.
    pub description: String,
    /// Severity.
    pub severity: Severity,
}

impl Notification {
    /// Create a notification with an explicit severity.
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self { title: title.into(), description: description.into(), severity }
    }

    /// Create an info notification.
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Info)
    }

    /// Create a success notification.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Success)
    }

    /// Create a warning notification.
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Warning)
    }

    /// Create an error notification.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, Severity::Error)
    }
}
