use serde::{Deserialize, Serialize};

use crate::args;
use crate::error::Result;
use crate::schema::{decode_first, FromRow, Row, Store};

const SETTINGS_ROW: u32 = 1;

/// The single `user_settings` row. Every field is optional so a partial
/// document (e.g. from an older backup) can be applied over the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub preferred_version: Option<String>,
    pub preferred_language: Option<String>,
    pub font_size: Option<i64>,
    pub theme: Option<String>,
    pub notifications_enabled: Option<i64>,
    pub notification_time: Option<String>,
}

impl FromRow for UserSettings {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            preferred_version: row.opt_text("preferred_version")?,
            preferred_language: row.opt_text("preferred_language")?,
            font_size: row.opt_i64("font_size")?,
            theme: row.opt_text("theme")?,
            notifications_enabled: row.opt_i64("notifications_enabled")?,
            notification_time: row.opt_text("notification_time")?,
        })
    }
}

pub fn get(store: &dyn Store) -> Result<UserSettings> {
    let row = store.query_first(
        "SELECT * FROM user_settings WHERE id = ?1",
        &args![SETTINGS_ROW],
    )?;
    Ok(decode_first(row)?.unwrap_or_default())
}

/// Overwrite the fields that are `Some` in `settings`, leaving the rest.
pub fn apply(store: &dyn Store, settings: &UserSettings) -> Result<()> {
    store.run(
        "INSERT OR IGNORE INTO user_settings (id) VALUES (?1)",
        &args![SETTINGS_ROW],
    )?;
    store.run(
        "UPDATE user_settings SET
             preferred_version = COALESCE(?1, preferred_version),
             preferred_language = COALESCE(?2, preferred_language),
             font_size = COALESCE(?3, font_size),
             theme = COALESCE(?4, theme),
             notifications_enabled = COALESCE(?5, notifications_enabled),
             notification_time = COALESCE(?6, notification_time)
         WHERE id = ?7",
        &args![
            settings.preferred_version.as_deref(),
            settings.preferred_language.as_deref(),
            settings.font_size,
            settings.theme.as_deref(),
            settings.notifications_enabled,
            settings.notification_time.as_deref(),
            SETTINGS_ROW,
        ],
    )?;
    Ok(())
}
