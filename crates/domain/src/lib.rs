#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod exercise_weight;
mod name;
mod profile;
mod program;
mod search;
mod service;
mod session;
mod weight;

pub use error::{CreateError, DeleteError, ReadError, StorageError, UpdateError, ValidationError};
pub use exercise::{
    Exercise, ExerciseFilter, ExerciseID, ExerciseMode, ExerciseModeError, ExerciseRepository,
    ExerciseService, ImageRepository, UploadTarget,
};
pub use exercise_weight::{
    ExerciseProgression, ExerciseWeight, ExerciseWeightID, ExerciseWeightRepository,
    ExerciseWeightService, Load, LoadError, ProgressionSession,
};
pub use name::{Name, NameError};
pub use profile::{Profile, ProfileRepository, ProfileService};
pub use program::{
    Program, ProgramID, ProgramRepository, ProgramService, ScheduleEntry, ScheduleEntryID,
    ScheduleError, Slot, SlotError, Weeks, WeeksError,
};
pub use search::{matches_search_term, normalize};
pub use service::Service;
pub use session::{
    Duration, DurationError, Reps, RepsError, Rest, RestError, Session, SessionID, SessionItem,
    SessionRepository, SessionService, Sets, SetsError, renumber,
};
pub use weight::{
    BodyWeight, BodyWeightError, WeightEntry, WeightEntryID, WeightRepository, WeightService,
    WeightTrend, WeightUnit, WeightUnitError, trend,
};
