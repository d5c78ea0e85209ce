use derive_more::Deref;
use strum::{Display, EnumIter};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, Name, ReadError, UpdateError, ValidationError, matches_search_term,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn get_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        mode: ExerciseMode,
        image_key: String,
        notes: Option<String>,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
    async fn request_image_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTarget, CreateError>;
    async fn upload_image(
        &self,
        target: &UploadTarget,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), CreateError>;

    async fn validate_exercise_name(
        &self,
        name: &str,
        id: ExerciseID,
    ) -> Result<Name, ValidationError> {
        match Name::new(name) {
            Ok(name) => match self.get_exercises().await {
                Ok(exercises) => {
                    if exercises.iter().all(|e| e.id == id || e.name != name) {
                        Ok(name)
                    } else {
                        Err(ValidationError::Conflict("name".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn read_exercise(&self, id: ExerciseID) -> Result<Exercise, ReadError>;
    async fn create_exercise(
        &self,
        name: Name,
        mode: ExerciseMode,
        image_key: String,
        notes: Option<String>,
    ) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, id: ExerciseID) -> Result<ExerciseID, DeleteError>;
}

/// Two-step upload: request an upload target from the backend, then PUT the
/// file directly to the returned URL. The object key is what gets stored on
/// the exercise.
#[allow(async_fn_in_trait)]
pub trait ImageRepository {
    async fn request_image_upload(
        &self,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadTarget, CreateError>;
    async fn upload_image(
        &self,
        target: &UploadTarget,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), CreateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadTarget {
    pub upload_url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: Name,
    pub mode: ExerciseMode,
    pub image_key: String,
    pub notes: Option<String>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl std::fmt::Display for ExerciseID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ExerciseID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ExerciseMode {
    #[default]
    #[strum(serialize = "reps")]
    Reps,
    #[strum(serialize = "time")]
    Time,
}

impl TryFrom<&str> for ExerciseMode {
    type Error = ExerciseModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "reps" => Ok(ExerciseMode::Reps),
            "time" => Ok(ExerciseMode::Time),
            _ => Err(ExerciseModeError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseModeError {
    #[error("Unknown exercise mode `{0}`")]
    Unknown(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub search_term: String,
    pub mode: Option<ExerciseMode>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_term.trim().is_empty() && self.mode.is_none()
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        matches_search_term(&self.search_term, exercise.name.as_ref())
            && self.mode.is_none_or(|mode| mode == exercise.mode)
    }

    #[must_use]
    pub fn exercises<'a>(
        &self,
        exercises: impl Iterator<Item = &'a Exercise>,
    ) -> Vec<&'a Exercise> {
        exercises.filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn exercise(id: u128, name: &str, mode: ExerciseMode) -> Exercise {
        Exercise {
            id: id.into(),
            name: Name::new(name).unwrap(),
            mode,
            image_key: format!("uploads/{id}.jpg"),
            notes: None,
        }
    }

    #[rstest]
    #[case("reps", Ok(ExerciseMode::Reps))]
    #[case("time", Ok(ExerciseMode::Time))]
    #[case("weight", Err(ExerciseModeError::Unknown("weight".to_string())))]
    fn test_exercise_mode_try_from(
        #[case] value: &str,
        #[case] expected: Result<ExerciseMode, ExerciseModeError>,
    ) {
        assert_eq!(ExerciseMode::try_from(value), expected);
    }

    #[rstest]
    #[case(ExerciseMode::Reps, "reps")]
    #[case(ExerciseMode::Time, "time")]
    fn test_exercise_mode_display(#[case] mode: ExerciseMode, #[case] expected: &str) {
        assert_eq!(mode.to_string(), expected);
    }

    #[rstest]
    #[case("", None, vec![1, 2, 3])]
    #[case("developpe", None, vec![1])]
    #[case("", Some(ExerciseMode::Time), vec![3])]
    #[case("plank", Some(ExerciseMode::Time), vec![3])]
    #[case("plank", Some(ExerciseMode::Reps), vec![])]
    fn test_exercise_filter(
        #[case] search_term: &str,
        #[case] mode: Option<ExerciseMode>,
        #[case] expected: Vec<u128>,
    ) {
        let exercises = vec![
            exercise(1, "Développé couché", ExerciseMode::Reps),
            exercise(2, "Squat", ExerciseMode::Reps),
            exercise(3, "Plank", ExerciseMode::Time),
        ];
        let filter = ExerciseFilter {
            search_term: search_term.to_string(),
            mode,
        };
        assert_eq!(
            filter
                .exercises(exercises.iter())
                .iter()
                .map(|e| e.id)
                .collect::<Vec<_>>(),
            expected
                .into_iter()
                .map(ExerciseID::from)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_exercise_id_nil() {
        assert!(ExerciseID::nil().is_nil());
        assert!(!ExerciseID::from(1).is_nil());
    }
}
