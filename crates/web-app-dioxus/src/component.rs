pub mod element;
pub mod form;
pub mod navbar;
mod timer;

pub use timer::{Timer, TimerControl};
