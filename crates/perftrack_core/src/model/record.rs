//! Performance record domain model.
//!
//! # Responsibility
//! - Define `PerformanceRecord`, its write-side `RecordDraft`, and `Period`.
//! - Parse untyped form strings (`RecordInput`) into a `RecordDraft`.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `name` and `metric` are non-empty after trimming.
//! - `date` uses the `YYYY-MM-DD` wire format everywhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Store-assigned identifier of a performance record.
pub type RecordId = i64;

/// Wire and storage format for record dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reporting cadence of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
}

impl Period {
    /// All periods in display order.
    pub const ALL: [Period; 3] = [Period::Daily, Period::Weekly, Period::Monthly];

    /// Canonical label, also used as the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = RecordValidationError;

    /// Matches case-insensitively after trimming.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(RecordValidationError::InvalidPeriod(value.to_string())),
        }
    }
}

/// Persisted performance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub id: RecordId,
    /// Employee identifier. Free text, no referential integrity.
    pub name: String,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
    /// Label of what was measured, e.g. `Sales`.
    pub metric: String,
    pub score: i64,
    pub period: Period,
}

impl PerformanceRecord {
    /// Attaches a store-assigned id to a draft.
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            name: draft.name,
            date: draft.date,
            metric: draft.metric,
            score: draft.score,
            period: draft.period,
        }
    }
}

/// Validated field values for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub date: NaiveDate,
    pub metric: String,
    pub score: i64,
    pub period: Period,
}

impl RecordDraft {
    /// Re-checks the text invariants on a draft built by hand.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.name.trim().is_empty() {
            return Err(RecordValidationError::EmptyField("name"));
        }
        if self.metric.trim().is_empty() {
            return Err(RecordValidationError::EmptyField("metric"));
        }
        Ok(())
    }
}

/// Raw, untyped field values as collected from input widgets or CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordInput {
    pub name: String,
    pub date: String,
    pub metric: String,
    pub score: String,
    pub period: String,
}

impl RecordInput {
    /// Parses and validates every field.
    ///
    /// Fields are checked in form order and the first failure is returned.
    pub fn parse(&self) -> Result<RecordDraft, RecordValidationError> {
        let name = required("name", &self.name)?;
        let date_text = required("date", &self.date)?;
        let date = NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| RecordValidationError::InvalidDate(date_text.to_string()))?;
        let metric = required("metric", &self.metric)?;
        let score_text = required("score", &self.score)?;
        let score = score_text
            .parse::<i64>()
            .map_err(|_| RecordValidationError::InvalidScore(score_text.to_string()))?;
        let period = required("period", &self.period)?.parse::<Period>()?;

        Ok(RecordDraft {
            name: name.to_string(),
            date,
            metric: metric.to_string(),
            score,
            period,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::EmptyField(field));
    }
    Ok(trimmed)
}

/// Rejection reasons for malformed record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A required field is missing or blank.
    EmptyField(&'static str),
    /// Date is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Score is not an integer.
    InvalidScore(String),
    /// Period is not one of Daily, Weekly, Monthly.
    InvalidPeriod(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{field} is required"),
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidScore(value) => {
                write!(f, "invalid score `{value}`; expected a whole number")
            }
            Self::InvalidPeriod(value) => {
                write!(f, "invalid period `{value}`; expected Daily|Weekly|Monthly")
            }
        }
    }
}

impl Error for RecordValidationError {}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Period, RecordInput, RecordValidationError};
    use chrono::NaiveDate;

    fn input() -> RecordInput {
        RecordInput {
            name: " Alice ".to_string(),
            date: "2024-03-01".to_string(),
            metric: "Sales".to_string(),
            score: "42".to_string(),
            period: "weekly".to_string(),
        }
    }

    #[test]
    fn parse_trims_and_types_fields() {
        let draft = input().parse().unwrap();
        assert_eq!(draft.name, "Alice");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(draft.score, 42);
        assert_eq!(draft.period, Period::Weekly);
    }

    #[test]
    fn parse_rejects_blank_name() {
        let mut raw = input();
        raw.name = "   ".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            RecordValidationError::EmptyField("name")
        );
    }

    #[test]
    fn parse_rejects_impossible_date() {
        let mut raw = input();
        raw.date = "2024-02-30".to_string();
        assert!(matches!(
            raw.parse().unwrap_err(),
            RecordValidationError::InvalidDate(_)
        ));
    }

    #[test]
    fn parse_rejects_fractional_score() {
        let mut raw = input();
        raw.score = "9.5".to_string();
        assert_eq!(
            raw.parse().unwrap_err(),
            RecordValidationError::InvalidScore("9.5".to_string())
        );
    }

    #[test]
    fn period_accepts_canonical_labels_only() {
        assert_eq!("Monthly".parse::<Period>().unwrap(), Period::Monthly);
        assert!("Yearly".parse::<Period>().is_err());
    }
}
