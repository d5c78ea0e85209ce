use chrono::{Local, NaiveDate};
use derive_more::{Deref, Display, Into};
use strum::EnumIter;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError, ValidationError};

pub const KG_PER_LB: f32 = 0.453_592_37;

/// Dead band for the trend computation, in kilograms.
const TREND_DEAD_BAND_KG: f32 = 0.5;

#[allow(async_fn_in_trait)]
pub trait WeightService {
    async fn get_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError>;
    async fn create_weight_entry(
        &self,
        date: NaiveDate,
        weight: BodyWeight,
        unit: WeightUnit,
        notes: Option<String>,
    ) -> Result<WeightEntry, CreateError>;
    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError>;
    async fn delete_weight_entry(&self, id: WeightEntryID) -> Result<WeightEntryID, DeleteError>;

    fn validate_weight_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= Local::now().date_naive() {
                    Ok(parsed_date)
                } else {
                    Err(ValidationError::Other(
                        "Date must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }

    #[must_use]
    fn weight_trend(&self, entries: &[WeightEntry]) -> WeightTrend {
        trend(entries)
    }
}

#[allow(async_fn_in_trait)]
pub trait WeightRepository {
    async fn read_weight_entries(&self) -> Result<Vec<WeightEntry>, ReadError>;
    async fn create_weight_entry(
        &self,
        date: NaiveDate,
        weight: BodyWeight,
        unit: WeightUnit,
        notes: Option<String>,
    ) -> Result<WeightEntry, CreateError>;
    async fn replace_weight_entry(&self, entry: WeightEntry) -> Result<WeightEntry, UpdateError>;
    async fn delete_weight_entry(&self, id: WeightEntryID) -> Result<WeightEntryID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
    pub id: WeightEntryID,
    pub date: NaiveDate,
    pub weight: BodyWeight,
    pub unit: WeightUnit,
    pub notes: Option<String>,
}

impl WeightEntry {
    #[must_use]
    pub fn weight_in_kg(&self) -> f32 {
        self.unit.to_kg(f32::from(self.weight))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeightEntryID(Uuid);

impl WeightEntryID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WeightEntryID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WeightEntryID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct BodyWeight(f32);

impl BodyWeight {
    pub fn new(value: f32) -> Result<Self, BodyWeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(BodyWeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(BodyWeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for BodyWeight {
    type Error = BodyWeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => BodyWeight::new(parsed_value),
            Err(_) => Err(BodyWeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BodyWeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, strum::Display, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum WeightUnit {
    #[default]
    #[strum(serialize = "kg")]
    Kg,
    #[strum(serialize = "lbs")]
    Lbs,
}

impl WeightUnit {
    #[must_use]
    pub fn to_kg(self, value: f32) -> f32 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
        }
    }

    #[must_use]
    pub fn from_kg(self, value: f32) -> f32 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / KG_PER_LB,
        }
    }
}

impl TryFrom<&str> for WeightUnit {
    type Error = WeightUnitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" => Ok(WeightUnit::Lbs),
            _ => Err(WeightUnitError::Unknown(value.to_string())),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightUnitError {
    #[error("Unknown weight unit `{0}`")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightTrend {
    Increasing,
    Decreasing,
    Stable,
    InsufficientData,
}

/// Compare the oldest and newest of the last five entries, in kilograms,
/// with a dead band of ±0.5 kg.
#[must_use]
pub fn trend(entries: &[WeightEntry]) -> WeightTrend {
    if entries.len() < 2 {
        return WeightTrend::InsufficientData;
    }

    let mut entries = entries.to_vec();
    entries.sort_by_key(|e| e.date);

    let window = &entries[entries.len().saturating_sub(5)..];
    let first = window[0].weight_in_kg();
    let last = window[window.len() - 1].weight_in_kg();

    let diff = last - first;

    if diff > TREND_DEAD_BAND_KG {
        WeightTrend::Increasing
    } else if diff < -TREND_DEAD_BAND_KG {
        WeightTrend::Decreasing
    } else {
        WeightTrend::Stable
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn entry(days: i32, weight: f32, unit: WeightUnit) -> WeightEntry {
        WeightEntry {
            id: WeightEntryID::from(u128::try_from(days).unwrap()),
            date: from_num_days(days),
            weight: BodyWeight::new(weight).unwrap(),
            unit,
            notes: None,
        }
    }

    #[rstest]
    #[case("80.0", Ok(BodyWeight(80.0)))]
    #[case("80,5", Ok(BodyWeight(80.5)))]
    #[case(" 0.0 ", Ok(BodyWeight(0.0)))]
    #[case("1000.0", Err(BodyWeightError::OutOfRange))]
    #[case("-0.1", Err(BodyWeightError::OutOfRange))]
    #[case("80.05", Err(BodyWeightError::InvalidResolution))]
    #[case("eighty", Err(BodyWeightError::ParseError))]
    fn test_body_weight_try_from(
        #[case] value: &str,
        #[case] expected: Result<BodyWeight, BodyWeightError>,
    ) {
        assert_eq!(BodyWeight::try_from(value), expected);
    }

    #[rstest]
    #[case(WeightUnit::Kg, 80.0, 80.0)]
    #[case(WeightUnit::Lbs, 100.0, 45.359_237)]
    fn test_to_kg(#[case] unit: WeightUnit, #[case] value: f32, #[case] expected: f32) {
        assert!((unit.to_kg(value) - expected).abs() < 1e-4);
    }

    #[test]
    fn test_kg_lbs_round_trip() {
        let kg = WeightUnit::Lbs.to_kg(180.0);
        assert!((WeightUnit::Lbs.from_kg(kg) - 180.0).abs() < 1e-4);
    }

    #[rstest]
    #[case::no_entries(vec![], WeightTrend::InsufficientData)]
    #[case::one_entry(vec![(0, 80.0)], WeightTrend::InsufficientData)]
    #[case::within_dead_band(vec![(0, 80.0), (1, 80.4)], WeightTrend::Stable)]
    #[case::increasing(vec![(0, 80.0), (1, 81.0)], WeightTrend::Increasing)]
    #[case::decreasing(vec![(0, 81.0), (1, 80.0)], WeightTrend::Decreasing)]
    #[case::only_last_five_considered(
        vec![(0, 90.0), (1, 80.0), (2, 80.1), (3, 80.2), (4, 80.3), (5, 80.4)],
        WeightTrend::Stable
    )]
    #[case::unsorted_input(vec![(1, 81.0), (0, 80.0)], WeightTrend::Increasing)]
    fn test_trend(#[case] entries: Vec<(i32, f32)>, #[case] expected: WeightTrend) {
        let entries = entries
            .into_iter()
            .map(|(days, weight)| entry(days, weight, WeightUnit::Kg))
            .collect::<Vec<_>>();
        assert_eq!(trend(&entries), expected);
    }

    #[test]
    fn test_trend_converts_units() {
        // 177 lbs ≈ 80.3 kg, within the dead band of 80.0 kg.
        let entries = vec![
            entry(0, 80.0, WeightUnit::Kg),
            entry(1, 177.0, WeightUnit::Lbs),
        ];
        assert_eq!(trend(&entries), WeightTrend::Stable);
    }

    fn from_num_days(days: i32) -> NaiveDate {
        NaiveDate::from_num_days_from_ce_opt(days).unwrap()
    }
}
