//! User-visible notices (toasts) produced by session actions.

use serde::Serialize;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NoticeLevel {
    /// Action completed.
    Success,
    /// An outside action could not be carried out; nothing was lost.
    Warning,
    /// Action failed.
    Error,
}

/// Short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Headline.
    pub title: String,
    /// Body text.
    pub description: String,
}

impl Notice {
    /// Builds a notice.
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    /// Success notice.
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, description)
    }

    /// Warning notice.
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, description)
    }

    /// Error notice.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, description)
    }
}
