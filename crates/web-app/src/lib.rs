#![warn(clippy::pedantic)]

pub mod chart;
pub mod image;
pub mod log;
pub mod progress;
pub mod rest_timer;
mod service;
mod settings;

pub use progress::{
    SessionProgress, SessionProgressRepository, SessionProgressService, SetProgress,
};
pub use rest_timer::RestTimer;
pub use service::Service;
pub use settings::{Settings, SettingsRepository, SettingsService, Theme};
