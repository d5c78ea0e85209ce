use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, SessionID, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ProgramService {
    async fn get_programs(&self) -> Result<Vec<Program>, ReadError>;
    async fn get_program(&self, id: ProgramID) -> Result<Program, ReadError>;
    async fn create_program(
        &self,
        name: Name,
        goal: Option<String>,
        weeks: Weeks,
        sessions_per_week: Slot,
    ) -> Result<Program, CreateError>;
    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        goal: Option<Option<String>>,
    ) -> Result<Program, UpdateError>;
    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError>;
    async fn create_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, CreateError>;
    async fn modify_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, UpdateError>;
    async fn delete_schedule_entry(
        &self,
        program_id: ProgramID,
        id: ScheduleEntryID,
    ) -> Result<ScheduleEntryID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ProgramRepository {
    async fn read_programs(&self) -> Result<Vec<Program>, ReadError>;
    async fn read_program(&self, id: ProgramID) -> Result<Program, ReadError>;
    async fn create_program(
        &self,
        name: Name,
        goal: Option<String>,
        weeks: Weeks,
        sessions_per_week: Slot,
    ) -> Result<Program, CreateError>;
    async fn modify_program(
        &self,
        id: ProgramID,
        name: Option<Name>,
        goal: Option<Option<String>>,
    ) -> Result<Program, UpdateError>;
    async fn delete_program(&self, id: ProgramID) -> Result<ProgramID, DeleteError>;
    async fn create_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, CreateError>;
    async fn modify_schedule_entry(
        &self,
        program_id: ProgramID,
        entry: ScheduleEntry,
    ) -> Result<ScheduleEntry, UpdateError>;
    async fn delete_schedule_entry(
        &self,
        program_id: ProgramID,
        id: ScheduleEntryID,
    ) -> Result<ScheduleEntryID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub id: ProgramID,
    pub name: Name,
    pub goal: Option<String>,
    pub weeks: Weeks,
    pub sessions_per_week: Slot,
    pub schedule: Vec<ScheduleEntry>,
}

impl Program {
    /// The entry occupying the given cell, if any. At most one entry per
    /// cell.
    #[must_use]
    pub fn entry_at(&self, week: u32, slot: u32) -> Option<&ScheduleEntry> {
        self.schedule
            .iter()
            .find(|e| e.week == week && e.slot == slot)
    }

    pub fn assign(
        &mut self,
        week: u32,
        slot: u32,
        session_id: SessionID,
    ) -> Result<ScheduleEntry, ScheduleError> {
        if week == 0 || week > u32::from(self.weeks) {
            return Err(ScheduleError::WeekOutOfRange(week));
        }

        if slot == 0 || slot > u32::from(self.sessions_per_week) {
            return Err(ScheduleError::SlotOutOfRange(slot));
        }

        self.schedule.retain(|e| e.week != week || e.slot != slot);

        let entry = ScheduleEntry {
            id: ScheduleEntryID::from(Uuid::new_v4()),
            week,
            slot,
            session_id,
        };
        self.schedule.push(entry.clone());

        Ok(entry)
    }

    /// Point an occupied cell at a different session, keeping the entry id
    /// so the change updates the existing entry instead of creating a
    /// second one for the cell.
    pub fn reassign(
        &mut self,
        week: u32,
        slot: u32,
        session_id: SessionID,
    ) -> Option<ScheduleEntry> {
        let entry = self
            .schedule
            .iter_mut()
            .find(|e| e.week == week && e.slot == slot)?;
        entry.session_id = session_id;
        Some(entry.clone())
    }

    pub fn clear(&mut self, week: u32, slot: u32) -> Option<ScheduleEntryID> {
        let id = self.entry_at(week, slot)?.id;
        self.schedule.retain(|e| e.id != id);
        Some(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: ScheduleEntryID,
    pub week: u32,
    pub slot: u32,
    pub session_id: SessionID,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgramID(Uuid);

impl ProgramID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ProgramID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ProgramID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

impl std::fmt::Display for ProgramID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ProgramID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScheduleEntryID(Uuid);

impl From<Uuid> for ScheduleEntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ScheduleEntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weeks(u32);

impl Weeks {
    pub fn new(value: u32) -> Result<Self, WeeksError> {
        if !(1..=52).contains(&value) {
            return Err(WeeksError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weeks {
    type Error = WeeksError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Weeks::new(parsed_value),
            Err(_) => Err(WeeksError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeeksError {
    #[error("Weeks must be in the range 1 to 52")]
    OutOfRange,
    #[error("Weeks must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Slot(u32);

impl Slot {
    pub fn new(value: u32) -> Result<Self, SlotError> {
        if !(1..=14).contains(&value) {
            return Err(SlotError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Slot {
    type Error = SlotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Slot::new(parsed_value),
            Err(_) => Err(SlotError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("Sessions per week must be in the range 1 to 14")]
    OutOfRange,
    #[error("Sessions per week must be an integer")]
    ParseError,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Week {0} is outside the program")]
    WeekOutOfRange(u32),
    #[error("Slot {0} is outside the program")]
    SlotOutOfRange(u32),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn program() -> Program {
        Program {
            id: 1.into(),
            name: Name::new("Strength Block").unwrap(),
            goal: Some("Add 10 kg to the squat".to_string()),
            weeks: Weeks::new(4).unwrap(),
            sessions_per_week: Slot::new(3).unwrap(),
            schedule: vec![],
        }
    }

    #[rstest]
    #[case("0", Err(WeeksError::OutOfRange))]
    #[case("1", Ok(Weeks(1)))]
    #[case("52", Ok(Weeks(52)))]
    #[case("53", Err(WeeksError::OutOfRange))]
    #[case("four", Err(WeeksError::ParseError))]
    fn test_weeks_try_from(#[case] value: &str, #[case] expected: Result<Weeks, WeeksError>) {
        assert_eq!(Weeks::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Err(SlotError::OutOfRange))]
    #[case("1", Ok(Slot(1)))]
    #[case("14", Ok(Slot(14)))]
    #[case("15", Err(SlotError::OutOfRange))]
    fn test_slot_try_from(#[case] value: &str, #[case] expected: Result<Slot, SlotError>) {
        assert_eq!(Slot::try_from(value), expected);
    }

    #[test]
    fn test_assign_replaces_cell() {
        let mut program = program();

        let first = program.assign(2, 1, 10.into()).unwrap();
        assert_eq!(program.entry_at(2, 1), Some(&first));

        let second = program.assign(2, 1, 11.into()).unwrap();
        assert_eq!(program.schedule.len(), 1);
        assert_eq!(program.entry_at(2, 1), Some(&second));
        assert_eq!(program.entry_at(2, 1).unwrap().session_id, 11.into());
    }

    #[rstest]
    #[case(0, 1, ScheduleError::WeekOutOfRange(0))]
    #[case(5, 1, ScheduleError::WeekOutOfRange(5))]
    #[case(1, 0, ScheduleError::SlotOutOfRange(0))]
    #[case(1, 4, ScheduleError::SlotOutOfRange(4))]
    fn test_assign_out_of_range(#[case] week: u32, #[case] slot: u32, #[case] expected: ScheduleError) {
        let mut program = program();
        assert_eq!(program.assign(week, slot, 10.into()).unwrap_err(), expected);
        assert_eq!(program.schedule, vec![]);
    }

    #[test]
    fn test_reassign_keeps_entry_id() {
        let mut program = program();
        let entry = program.assign(2, 1, 10.into()).unwrap();

        let updated = program.reassign(2, 1, 11.into()).unwrap();
        assert_eq!(updated.id, entry.id);
        assert_eq!(updated.session_id, 11.into());
        assert_eq!(program.schedule.len(), 1);
        assert_eq!(program.entry_at(2, 1), Some(&updated));
    }

    #[test]
    fn test_reassign_empty_cell() {
        let mut program = program();
        assert_eq!(program.reassign(1, 1, 10.into()), None);
        assert_eq!(program.schedule, vec![]);
    }

    #[test]
    fn test_clear() {
        let mut program = program();
        let entry = program.assign(1, 1, 10.into()).unwrap();

        assert_eq!(program.clear(1, 2), None);
        assert_eq!(program.clear(1, 1), Some(entry.id));
        assert_eq!(program.schedule, vec![]);
        assert_eq!(program.clear(1, 1), None);
    }
}
