use std::collections::VecDeque;

use gloo_storage::Storage as GlooStorage;
use ::log::warn;
use vigor_web_app::{Settings, SettingsRepository, log};

pub struct UI;

const KEY_SETTINGS: &str = "settings";

impl SettingsRepository for UI {
    async fn read_settings(&self) -> Result<Settings, String> {
        match gloo_storage::LocalStorage::get(KEY_SETTINGS) {
            Ok(settings) => Ok(settings),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(Settings::default()),
            Err(err) => {
                warn!("discarding unreadable settings: {err}");
                Ok(Settings::default())
            }
        }
    }

    async fn write_settings(&self, settings: Settings) -> Result<(), String> {
        gloo_storage::LocalStorage::set(KEY_SETTINGS, settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

const KEY_LOG: &str = "log";
const MAX_LOG_ENTRIES: usize = 100;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        match gloo_storage::LocalStorage::get(KEY_LOG) {
            Ok(entries) => Ok(entries),
            Err(err) => match err {
                gloo_storage::errors::StorageError::KeyNotFound(_) => Ok(VecDeque::new()),
                err => Err(err),
            },
        }
        .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        entries.push_front(entry);
        entries.truncate(MAX_LOG_ENTRIES);
        gloo_storage::LocalStorage::set(KEY_LOG, entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
