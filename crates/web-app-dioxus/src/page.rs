pub mod body_weight;
pub mod exercise;
pub mod exercise_progression;
pub mod exercises;
pub mod home;
pub mod login;
pub mod not_found;
pub mod program;
pub mod programs;
pub mod session;
pub mod session_play;
pub mod sessions;
