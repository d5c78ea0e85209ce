use std::collections::VecDeque;

use vigor_domain as domain;

use crate::{
    SessionProgress, SessionProgressRepository, SessionProgressService, SetProgress, Settings,
    SettingsRepository, SettingsService, log,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: log::Repository> log::Service for Service<R> {
    fn get_log_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        self.repository.read_entries()
    }

    fn add_log_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        self.repository.write_entry(entry)
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, String> {
        self.repository.read_settings().await
    }

    async fn set_settings(&self, settings: Settings) -> Result<(), String> {
        self.repository.write_settings(settings).await
    }
}

impl<R: SessionProgressRepository> SessionProgressService for Service<R> {
    async fn get_session_progress(
        &self,
        id: domain::SessionID,
    ) -> Result<SessionProgress, String> {
        self.repository.read_session_progress(id).await
    }

    async fn set_session_progress(
        &self,
        id: domain::SessionID,
        progress: &SessionProgress,
    ) -> Result<(), String> {
        self.repository.write_session_progress(id, progress).await
    }

    async fn get_set_progress(&self, id: domain::SessionID) -> Result<SetProgress, String> {
        self.repository.read_set_progress(id).await
    }

    async fn set_set_progress(
        &self,
        id: domain::SessionID,
        progress: &SetProgress,
    ) -> Result<(), String> {
        self.repository.write_set_progress(id, progress).await
    }

    async fn delete_progress(&self, id: domain::SessionID) -> Result<(), String> {
        self.repository.delete_progress(id).await
    }
}
