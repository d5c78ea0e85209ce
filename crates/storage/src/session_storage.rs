//! Play-mode progress in browser `sessionStorage`.
//!
//! Progress lives for the lifetime of the tab. Missing or malformed records
//! load as empty state so a corrupted record can never block the play view.

use gloo_storage::Storage as GlooStorage;
use log::warn;
use vigor_domain as domain;
use vigor_web_app::{SessionProgress, SessionProgressRepository, SetProgress};

pub struct Session;

fn progress_key(id: domain::SessionID) -> String {
    format!("session-progress:{}", *id)
}

fn set_progress_key(id: domain::SessionID) -> String {
    format!("session-progress-sets:{}", *id)
}

fn read_or_default<T>(key: &str) -> T
where
    T: Default + for<'de> serde::Deserialize<'de>,
{
    match gloo_storage::SessionStorage::get(key) {
        Ok(value) => value,
        Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => T::default(),
        Err(err) => {
            warn!("discarding unreadable record `{key}`: {err}");
            T::default()
        }
    }
}

impl SessionProgressRepository for Session {
    async fn read_session_progress(
        &self,
        id: domain::SessionID,
    ) -> Result<SessionProgress, String> {
        Ok(read_or_default(&progress_key(id)))
    }

    async fn write_session_progress(
        &self,
        id: domain::SessionID,
        progress: &SessionProgress,
    ) -> Result<(), String> {
        gloo_storage::SessionStorage::set(progress_key(id), progress)
            .map_err(|err| err.to_string())
    }

    async fn read_set_progress(&self, id: domain::SessionID) -> Result<SetProgress, String> {
        Ok(read_or_default(&set_progress_key(id)))
    }

    async fn write_set_progress(
        &self,
        id: domain::SessionID,
        progress: &SetProgress,
    ) -> Result<(), String> {
        gloo_storage::SessionStorage::set(set_progress_key(id), progress)
            .map_err(|err| err.to_string())
    }

    async fn delete_progress(&self, id: domain::SessionID) -> Result<(), String> {
        gloo_storage::SessionStorage::delete(progress_key(id));
        gloo_storage::SessionStorage::delete(set_progress_key(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_progress_keys() {
        let id = domain::SessionID::from(1);
        assert_eq!(
            progress_key(id),
            "session-progress:00000000-0000-0000-0000-000000000001"
        );
        assert_eq!(
            set_progress_key(id),
            "session-progress-sets:00000000-0000-0000-0000-000000000001"
        );
    }
}
