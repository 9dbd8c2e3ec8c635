use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::{Result, WidgetError};

pub const DEFAULT_SETTINGS_FILE: &str = "reservations.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Weekend slots at or after this `HH:MM` time are unavailable.
    pub weekend_cutoff: String,
    pub max_party_size: i64,
    pub close_delay_ms: u64,
    /// Upper bound on timers run by one advance or flush.
    pub timer_step_limit: usize,
    /// Redirect target of the open control on pages without the dialog.
    pub reservations_href: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            weekend_cutoff: "20:30".into(),
            max_party_size: 8,
            close_delay_ms: 3000,
            timer_step_limit: 10_000,
            reservations_href: "reservas.html".into(),
        }
    }
}

impl WidgetSettings {
    pub fn validate(&self) -> Result<()> {
        if !is_hh_mm(&self.weekend_cutoff) {
            return Err(WidgetError::InvalidSetting {
                key: "weekend_cutoff",
                reason: format!("expected zero-padded HH:MM, got {:?}", self.weekend_cutoff),
            });
        }
        if self.max_party_size < 1 {
            return Err(WidgetError::InvalidSetting {
                key: "max_party_size",
                reason: format!("must be at least 1, got {}", self.max_party_size),
            });
        }
        if self.timer_step_limit == 0 {
            return Err(WidgetError::InvalidSetting {
                key: "timer_step_limit",
                reason: "requires at least 1 step".into(),
            });
        }
        if self.reservations_href.trim().is_empty() {
            return Err(WidgetError::InvalidSetting {
                key: "reservations_href",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Loads settings from `path` (or `reservations.toml` in the working directory),
/// then applies environment overrides. A missing default file is not an error.
pub fn load_settings(path: Option<&Path>) -> Result<WidgetSettings> {
    load_settings_with(path, |key| std::env::var(key).ok())
}

pub fn load_settings_with(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<WidgetSettings> {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_SETTINGS_FILE), false),
    };

    let mut settings = match fs::read_to_string(&file) {
        Ok(raw) => toml::from_str::<WidgetSettings>(&raw).map_err(|source| {
            WidgetError::SettingsParse {
                path: file.clone(),
                source,
            }
        })?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            WidgetSettings::default()
        }
        Err(source) => return Err(WidgetError::SettingsIo { path: file, source }),
    };

    if let Some(v) = lookup(&env, "WEEKEND_CUTOFF") {
        settings.weekend_cutoff = v;
    }
    if let Some(v) = lookup(&env, "MAX_PARTY_SIZE") {
        settings.max_party_size = v.trim().parse().map_err(|_| WidgetError::InvalidSetting {
            key: "max_party_size",
            reason: format!("not an integer: {v:?}"),
        })?;
    }
    if let Some(v) = lookup(&env, "CLOSE_DELAY_MS") {
        settings.close_delay_ms = v.trim().parse().map_err(|_| WidgetError::InvalidSetting {
            key: "close_delay_ms",
            reason: format!("not a non-negative integer: {v:?}"),
        })?;
    }
    if let Some(v) = lookup(&env, "TIMER_STEP_LIMIT") {
        settings.timer_step_limit = v.trim().parse().map_err(|_| WidgetError::InvalidSetting {
            key: "timer_step_limit",
            reason: format!("not a non-negative integer: {v:?}"),
        })?;
    }
    if let Some(v) = lookup(&env, "HREF") {
        settings.reservations_href = v;
    }

    settings.validate()?;
    tracing::debug!(?settings, file = %file.display(), "loaded widget settings");
    Ok(settings)
}

// `APP__` prefixed names win over the plain `RESERVATIONS_` ones.
fn lookup(env: &impl Fn(&str) -> Option<String>, suffix: &str) -> Option<String> {
    env(&format!("APP__RESERVATIONS_{suffix}")).or_else(|| env(&format!("RESERVATIONS_{suffix}")))
}

fn is_hh_mm(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = |a: u8, b: u8| -> Option<u32> {
        if a.is_ascii_digit() && b.is_ascii_digit() {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        } else {
            None
        }
    };
    matches!(
        (digits(bytes[0], bytes[1]), digits(bytes[3], bytes[4])),
        (Some(h), Some(m)) if h < 24 && m < 60
    )
}
