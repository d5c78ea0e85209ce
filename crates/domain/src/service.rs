use chrono::NaiveDate;
use log::{debug, error};

use crate::{
    BodyWeight, CreateError, DeleteError, Exercise, ExerciseID, ExerciseMode, ExerciseProgression,
    ExerciseRepository, ExerciseService, ExerciseWeight, ExerciseWeightID,
    ExerciseWeightRepository, ExerciseWeightService, ImageRepository, Load, Name, Profile,
    ProfileRepository, ProfileService, Program, ProgramID, ProgramRepository, ProgramService,
    ReadError, Reps, ScheduleEntry, ScheduleEntryID, Session, SessionID, SessionItem,
    SessionRepository, SessionService, Slot, UpdateError, UploadTarget, WeightEntry,
    WeightEntryID, WeightRepository, WeightService, WeightUnit, Weeks,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: ProfileRepository> ProfileService for Service<R> {
    async fn get_profile(&self) -> Result<Profile, ReadError> {
        log_on_error!(self.repository.read_profile(), ReadError, "get", "profile")
    }
}

impl<R: ExerciseRepository + ImageRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError> {
        log_on_error!(
            self.repository.read_exercise(id),
            ReadError,
            "get",
            "exercise"
        )
    }

    async fn create_exercise(
        &self,
        name: Name,
        mode: ExerciseMode,
        image_key: String,
        notes: Option<String>,
    ) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(name, mode, image_key, notes),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise(id),
            DeleteError,
            "delete",
            "exercise"
        )
    }

    async fn request_image_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTarget, CreateError> {
        log_on_error!(
            self.repository.request_image_upload(file_name, content_type),
            CreateError,
            "request",
            "image upload"
        )
    }

    async fn upload_image(
        &self,
        target: &UploadTarget,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), CreateError> {
        log_on_error!(
            self.repository.upload_image(target, content_type, data),
            CreateError,
            "upload",
            "image"
        )
    }
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn get_sessions(&self) -> Result<Vec<Session>, ReadError> {
        log_on_error!(self.repository.read_sessions(), ReadError, "get", "sessions")
    }

    async fn get_session(&self, id: SessionID) -> Result<Session, ReadError> {
        log_on_error!(
            self.repository.read_session(id),
            ReadError,
            "get",
            "session"
        )
    }

    async fn create_session(
        &self,
        name: Name,
        items: Vec<SessionItem>,
    ) -> Result<Session, CreateError> {
        log_on_error!(
            self.repository.create_session(name, items),
            CreateError,
            "create",
            "session"
        )
    }

    async fn modify_session(
        &self,
        id: SessionID,
        name: Option<Name>,
        items: Option<Vec<SessionItem>>,
    ) -> Result<Session, UpdateError> {
        log_on_error!(
            self.repository.modify_session(id, name, items),
            UpdateError,
            "modify",
            "session"
        )
    }

    async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError> {
        log_on_error!(
            self.repository.delete_session(id),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R: ProgramRepository> ProgramService for Service<R> {
    async fn get_programs(&self) -> Result<Vec<Program>, ReadError> {
        log_on_error!(self.repository.read_programs(), ReadError, "get", "programs")
    }

    async fn get_program(&self, id: ProgramID) -> Result<Program, ReadError> {
        log_on_error!(
            self.repository.read_program(id),
            ReadError,
            "get",
            "program"
        )
    }

    async fn create_program(
        &self,
        name: Name,
        goal: Option<String>,
        weeks: Weeks,
        sessions_per_week: Slot,
    ) -> Result<Program, CreateError> {
        log_on_error!(
            self.repository
                .create_program(name, goal, weeks, sessions_per_week),
            CreateError,
            "create",
            "program"
        )
    }

    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        goal: Option<Option<String>>,
    ) -> Result<Program, UpdateError> {
        log_on_error!(
            self.repository.modify_program(id, name, goal),
            UpdateError,
            "modify",
            "program"
        )
    }

    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError> {
        log_on_error!(
            self.repository.delete_program(id),
            DeleteError,
            "delete",
            "program"
        )
    }

    async fn create_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, CreateError> {
        log_on_error!(
            self.repository.create_schedule_entry(program_id, entry),
            CreateError,
            "create",
            "schedule entry"
        )
    }

    async fn modify_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, UpdateError> {
        log_on_error!(
            self.repository.modify_schedule_entry(program_id, entry),
            UpdateError,
            "modify",
            "schedule entry"
        )
    }

    async fn delete_schedule_entry(
        &self,
        program_id: ProgramID,
        id: ScheduleEntryID,
    ) -> Result<ScheduleEntryID, DeleteError> {
        log_on_error!(
            self.repository.delete_schedule_entry(program_id, id),
            DeleteError,
            "delete",
            "schedule entry"
        )
    }
}

impl<R: ExerciseWeightRepository> ExerciseWeightService for Service<R> {
    async fn get_exercise_weights(
        &self,
        exercise_id: Option<ExerciseID>,
        session_id: Option<SessionID>,
    ) -> Result<Vec<ExerciseWeight>, ReadError> {
        log_on_error!(
            self.repository.read_exercise_weights(exercise_id, session_id),
            ReadError,
            "get",
            "exercise weights"
        )
    }

    async fn create_exercise_weight(
        &self,
        exercise_id: ExerciseID,
        session_id: SessionID,
        set_number: u32,
        weight: Load,
        reps: Reps,
        unit: WeightUnit,
        date: NaiveDate,
    ) -> Result<ExerciseWeight, CreateError> {
        log_on_error!(
            self.repository
                .create_exercise_weight(exercise_id, session_id, set_number, weight, reps, unit, date),
            CreateError,
            "create",
            "exercise weight"
        )
    }

    async fn modify_exercise_weight(
        &self,
        id: ExerciseWeightID,
        weight: Option<Load>,
        reps: Option<Reps>,
        unit: Option<WeightUnit>,
    ) -> Result<ExerciseWeight, UpdateError> {
        log_on_error!(
            self.repository.modify_exercise_weight(id, weight, reps, unit),
            UpdateError,
            "modify",
            "exercise weight"
        )
    }

    async fn delete_exercise_weight(
        &self,
        id: ExerciseWeightID,
    ) -> Result<ExerciseWeightID, DeleteError> {
        log_on_error!(
            self.repository.delete_exercise_weight(id),
            DeleteError,
            "delete",
            "exercise weight"
        )
    }

    async fn get_exercise_progression(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseProgression, ReadError> {
        log_on_error!(
            self.repository.read_exercise_progression(exercise_id),
            ReadError,
            "get",
            "exercise progression"
        )
    }
}

impl<R: WeightRepository> WeightService for Service<R> {
    async fn get_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError> {
        log_on_error!(
            self.repository.read_weight_entries(),
            ReadError,
            "get",
            "weight entries"
        )
    }

    async fn create_weight_entry(
        &self,
        date: NaiveDate,
        weight: BodyWeight,
        unit: WeightUnit,
        notes: Option<String>,
    ) -> Result<WeightEntry, CreateError> {
        log_on_error!(
            self.repository.create_weight_entry(date, weight, unit, notes),
            CreateError,
            "create",
            "weight entry"
        )
    }

    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError> {
        log_on_error!(
            self.repository.replace_weight_entry(entry),
            UpdateError,
            "replace",
            "weight entry"
        )
    }

    async fn delete_weight_entry(&self, id: WeightEntryID) -> Result<WeightEntryID, DeleteError> {
        log_on_error!(
            self.repository.delete_weight_entry(id),
            DeleteError,
            "delete",
            "weight entry"
        )
    }
}
