use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ExerciseID, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn get_sessions(&self) -> Result<Vec<Session>, ReadError>;
    async fn get_session(&self, id: SessionID) -> Result<Session, ReadError>;
    async fn create_session(&self, name: Name, items: Vec<SessionItem>)
    -> Result<Session, CreateError>;
    async fn modify_session(
        &self,
        id: SessionID,
        name: Option<Name>,
        items: Option<Vec<SessionItem>>,
    ) -> Result<Session, UpdateError>;
    async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn read_sessions(&self) -> Result<Vec<Session>, ReadError>;
    async fn read_session(&self, id: SessionID) -> Result<Session, ReadError>;
    async fn create_session(&self, name: Name, items: Vec<SessionItem>)
    -> Result<Session, CreateError>;
    async fn modify_session(
        &self,
        id: SessionID,
        name: Option<Name>,
        items: Option<Vec<SessionItem>>,
    ) -> Result<Session, UpdateError>;
    async fn delete_session(&self, id: SessionID) -> Result<SessionID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionID,
    pub name: Name,
    pub items: Vec<SessionItem>,
}

impl Session {
    /// One entry per item: the number of configured sets, or zero for
    /// time-mode items which have no per-set tracking.
    #[must_use]
    pub fn expected_set_counts(&self) -> Vec<usize> {
        self.items
            .iter()
            .map(|item| item.sets.map_or(0, |sets| u32::from(sets) as usize))
            .collect()
    }

    #[must_use]
    pub fn has_contiguous_order(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(i, item)| item.order == i)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionItem {
    pub exercise_id: ExerciseID,
    pub order: usize,
    pub sets: Option<Sets>,
    pub reps: Option<Reps>,
    pub duration: Option<Duration>,
    pub rest: Rest,
    pub notes: Option<String>,
}

/// Restore contiguous, unique order indices after insert, remove or reorder.
pub fn renumber(items: &mut [SessionItem]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.order = i;
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionID(Uuid);

impl SessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl std::fmt::Display for SessionID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for SessionID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Sets(u32);

impl Sets {
    pub fn new(value: u32) -> Result<Self, SetsError> {
        if !(1..=99).contains(&value) {
            return Err(SetsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Sets {
    type Error = SetsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Sets::new(parsed_value),
            Err(_) => Err(SetsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetsError {
    #[error("Sets must be in the range 1 to 99")]
    OutOfRange,
    #[error("Sets must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(1..=999).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 1 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Duration(u32);

impl Duration {
    pub fn new(value: u32) -> Result<Self, DurationError> {
        if !(1..=9999).contains(&value) {
            return Err(DurationError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Duration {
    type Error = DurationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Duration::new(parsed_value),
            Err(_) => Err(DurationError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DurationError {
    #[error("Duration must be in the range 1 to 9999 s")]
    OutOfRange,
    #[error("Duration must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Rest(u32);

impl Rest {
    pub fn new(value: u32) -> Result<Self, RestError> {
        if !(0..=9999).contains(&value) {
            return Err(RestError::OutOfRange);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<&str> for Rest {
    type Error = RestError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Rest::new(parsed_value),
            Err(_) => Err(RestError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestError {
    #[error("Rest must be in the range 0 to 9999 s")]
    OutOfRange,
    #[error("Rest must be an integer")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn item(exercise_id: u128, order: usize, sets: Option<u32>) -> SessionItem {
        SessionItem {
            exercise_id: exercise_id.into(),
            order,
            sets: sets.map(|s| Sets::new(s).unwrap()),
            reps: sets.map(|_| Reps::new(10).unwrap()),
            duration: if sets.is_none() {
                Some(Duration::new(60).unwrap())
            } else {
                None
            },
            rest: Rest::new(90).unwrap(),
            notes: None,
        }
    }

    #[rstest]
    #[case("0", Err(SetsError::OutOfRange))]
    #[case("1", Ok(Sets(1)))]
    #[case("99", Ok(Sets(99)))]
    #[case("100", Err(SetsError::OutOfRange))]
    #[case("three", Err(SetsError::ParseError))]
    fn test_sets_try_from(#[case] value: &str, #[case] expected: Result<Sets, SetsError>) {
        assert_eq!(Sets::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Err(RepsError::OutOfRange))]
    #[case("1", Ok(Reps(1)))]
    #[case("999", Ok(Reps(999)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Err(DurationError::OutOfRange))]
    #[case("1", Ok(Duration(1)))]
    #[case("9999", Ok(Duration(9999)))]
    #[case("10000", Err(DurationError::OutOfRange))]
    #[case("1.5", Err(DurationError::ParseError))]
    fn test_duration_try_from(
        #[case] value: &str,
        #[case] expected: Result<Duration, DurationError>,
    ) {
        assert_eq!(Duration::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Ok(Rest(0)))]
    #[case("9999", Ok(Rest(9999)))]
    #[case("10000", Err(RestError::OutOfRange))]
    #[case("-1", Err(RestError::ParseError))]
    fn test_rest_try_from(#[case] value: &str, #[case] expected: Result<Rest, RestError>) {
        assert_eq!(Rest::try_from(value), expected);
    }

    #[test]
    fn test_renumber() {
        let mut items = vec![item(1, 7, Some(3)), item(2, 0, None), item(3, 3, Some(5))];
        renumber(&mut items);
        assert_eq!(
            items.iter().map(|i| i.order).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_expected_set_counts() {
        let session = Session {
            id: 1.into(),
            name: Name::new("Push Day").unwrap(),
            items: vec![item(1, 0, Some(3)), item(2, 1, None), item(3, 2, Some(5))],
        };
        assert_eq!(session.expected_set_counts(), vec![3, 0, 5]);
    }

    #[rstest]
    #[case(vec![0, 1, 2], true)]
    #[case(vec![0, 2, 1], false)]
    #[case(vec![1, 2, 3], false)]
    #[case(vec![], true)]
    fn test_has_contiguous_order(#[case] orders: Vec<usize>, #[case] expected: bool) {
        let session = Session {
            id: 1.into(),
            name: Name::new("Push Day").unwrap(),
            items: orders
                .into_iter()
                .map(|order| item(1, order, Some(3)))
                .collect(),
        };
        assert_eq!(session.has_contiguous_order(), expected);
    }
}
