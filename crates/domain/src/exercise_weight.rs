use chrono::NaiveDate;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, ExerciseID, ReadError, Reps, SessionID, UpdateError, WeightUnit,
};

#[allow(async_fn_in_trait)]
pub trait ExerciseWeightService {
    async fn get_exercise_weights(
        &self,
        exercise_id: Option<ExerciseID>,
        session_id: Option<SessionID>,
    ) -> Result<Vec<ExerciseWeight>, ReadError>;
    async fn create_exercise_weight(
        &self,
        exercise_id: ExerciseID,
        session_id: SessionID,
        set_number: u32,
        weight: Load,
        reps: Reps,
        unit: WeightUnit,
        date: NaiveDate,
    ) -> Result<ExerciseWeight, CreateError>;
    async fn modify_exercise_weight(
        &self,
        id: ExerciseWeightID,
        weight: Option<Load>,
        reps: Option<Reps>,
        unit: Option<WeightUnit>,
    ) -> Result<ExerciseWeight, UpdateError>;
    async fn delete_exercise_weight(
        &self,
        id: ExerciseWeightID,
    ) -> Result<ExerciseWeightID, DeleteError>;
    async fn get_exercise_progression(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseProgression, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseWeightRepository {
    async fn read_exercise_weights(
        &self,
        exercise_id: Option<ExerciseID>,
        session_id: Option<SessionID>,
    ) -> Result<Vec<ExerciseWeight>, ReadError>;
    async fn create_exercise_weight(
        &self,
        exercise_id: ExerciseID,
        session_id: SessionID,
        set_number: u32,
        weight: Load,
        reps: Reps,
        unit: WeightUnit,
        date: NaiveDate,
    ) -> Result<ExerciseWeight, CreateError>;
    async fn modify_exercise_weight(
        &self,
        id: ExerciseWeightID,
        weight: Option<Load>,
        reps: Option<Reps>,
        unit: Option<WeightUnit>,
    ) -> Result<ExerciseWeight, UpdateError>;
    async fn delete_exercise_weight(
        &self,
        id: ExerciseWeightID,
    ) -> Result<ExerciseWeightID, DeleteError>;
    async fn read_exercise_progression(
        &self,
        exercise_id: ExerciseID,
    ) -> Result<ExerciseProgression, ReadError>;
}

/// The weight moved for one set of an exercise within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseWeight {
    pub id: ExerciseWeightID,
    pub exercise_id: ExerciseID,
    pub session_id: SessionID,
    pub set_number: u32,
    pub weight: Load,
    pub reps: Reps,
    pub unit: WeightUnit,
    pub date: NaiveDate,
}

impl ExerciseWeight {
    #[must_use]
    pub fn weight_in_kg(&self) -> f32 {
        self.unit.to_kg(f32::from(self.weight))
    }

    /// Weight times repetitions, in kilograms.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn volume_kg(&self) -> f32 {
        self.weight_in_kg() * u32::from(self.reps) as f32
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseWeightID(Uuid);

impl ExerciseWeightID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseWeightID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseWeightID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Load(f32);

impl Load {
    pub fn new(value: f32) -> Result<Self, LoadError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(LoadError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(LoadError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Load {
    type Error = LoadError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Load::new(parsed_value),
            Err(_) => Err(LoadError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum LoadError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

/// Per-exercise history of logged set weights, grouped by session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseProgression {
    pub total_sessions: usize,
    pub sessions: Vec<ProgressionSession>,
}

impl ExerciseProgression {
    /// Sum of weight times repetitions over all logged sets, in kilograms.
    #[must_use]
    pub fn total_volume_kg(&self) -> f32 {
        self.sessions
            .iter()
            .flat_map(|s| &s.weights)
            .map(ExerciseWeight::volume_kg)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionSession {
    pub session_id: SessionID,
    pub date: NaiveDate,
    pub weights: Vec<ExerciseWeight>,
}

impl ProgressionSession {
    /// The heaviest logged set of the session, in kilograms.
    #[must_use]
    pub fn max_weight_kg(&self) -> Option<f32> {
        self.weights
            .iter()
            .map(ExerciseWeight::weight_in_kg)
            .reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn weight(value: f32, reps: u32, unit: WeightUnit) -> ExerciseWeight {
        ExerciseWeight {
            id: 1.into(),
            exercise_id: 1.into(),
            session_id: 1.into(),
            set_number: 1,
            weight: Load::new(value).unwrap(),
            reps: Reps::new(reps).unwrap(),
            unit,
            date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
        }
    }

    #[rstest]
    #[case("60.0", Ok(Load(60.0)))]
    #[case("62,5", Ok(Load(62.5)))]
    #[case(" 0.0 ", Ok(Load(0.0)))]
    #[case("1000.0", Err(LoadError::OutOfRange))]
    #[case("-0.1", Err(LoadError::OutOfRange))]
    #[case("60.05", Err(LoadError::InvalidResolution))]
    #[case("sixty", Err(LoadError::ParseError))]
    fn test_load_try_from(#[case] value: &str, #[case] expected: Result<Load, LoadError>) {
        assert_eq!(Load::try_from(value), expected);
    }

    #[test]
    fn test_volume() {
        assert!((weight(60.0, 5, WeightUnit::Kg).volume_kg() - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_volume_converts_units() {
        let volume = weight(100.0, 2, WeightUnit::Lbs).volume_kg();
        assert!((volume - 2.0 * 45.359_237).abs() < 1e-3);
    }

    #[test]
    fn test_progression_max_weight() {
        let session = ProgressionSession {
            session_id: 1.into(),
            date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
            weights: vec![
                weight(60.0, 5, WeightUnit::Kg),
                weight(62.5, 3, WeightUnit::Kg),
            ],
        };
        assert_eq!(session.max_weight_kg(), Some(62.5));
    }

    #[test]
    fn test_progression_max_weight_empty() {
        let session = ProgressionSession {
            session_id: 1.into(),
            date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
            weights: vec![],
        };
        assert_eq!(session.max_weight_kg(), None);
    }

    #[test]
    fn test_progression_total_volume() {
        let progression = ExerciseProgression {
            total_sessions: 2,
            sessions: vec![
                ProgressionSession {
                    session_id: 1.into(),
                    date: NaiveDate::from_ymd_opt(2020, 2, 2).unwrap(),
                    weights: vec![weight(60.0, 5, WeightUnit::Kg)],
                },
                ProgressionSession {
                    session_id: 2.into(),
                    date: NaiveDate::from_ymd_opt(2020, 2, 9).unwrap(),
                    weights: vec![weight(62.5, 4, WeightUnit::Kg)],
                },
            ],
        };
        assert!((progression.total_volume_kg() - 550.0).abs() < 1e-3);
    }
}
