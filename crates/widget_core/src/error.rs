use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("advance_time_to requires target >= now_ms (target={target_ms}, now_ms={now_ms})")]
    ClockRewind { target_ms: u64, now_ms: u64 },
    #[error("timer step limit exceeded (limit={limit}, now_ms={now_ms}, next_due_at={next_due_at:?})")]
    TimerStepLimit {
        limit: usize,
        now_ms: u64,
        next_due_at: Option<u64>,
    },
    #[error("failed to read settings file '{}': {source}", path.display())]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file '{}': {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, WidgetError>;
