use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notification, e.g. "Using cached solar data due to network
/// issues". Distinct from log events: these are meant for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notifications. The UI layer provides its own
/// implementation; headless contexts fall back to [`LogSink`].
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Default sink that forwards notices to tracing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => error!("{}", notice.message),
            NoticeLevel::Warning => warn!("{}", notice.message),
            NoticeLevel::Info | NoticeLevel::Success => info!("{}", notice.message),
        }
    }
}
