//! Due-date parsing and human-readable due labels.

use super::TaskDomainError;
use chrono::NaiveDate;
use std::fmt;

const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Relative description of a due date as shown on task cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    /// The task has no due date.
    NoDueDate,
    /// Due on the current day.
    Today,
    /// Due on the next day.
    Tomorrow,
    /// Due the given number of days from now.
    InDays(u64),
    /// Past due by the given number of days.
    Overdue(u64),
}

impl DueLabel {
    /// Computes the label for `due_date` relative to `today`.
    #[must_use]
    pub fn relative_to(due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        let Some(due) = due_date else {
            return Self::NoDueDate;
        };
        let days = due.signed_duration_since(today).num_days();
        match days {
            0 => Self::Today,
            1 => Self::Tomorrow,
            d if d > 1 => Self::InDays(d.unsigned_abs()),
            d => Self::Overdue(d.unsigned_abs()),
        }
    }

    /// Parses a due date from form input.
    ///
    /// Blank input means "no due date".
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDueDate`] when the input is not a
    /// `YYYY-MM-DD` calendar date.
    pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, TaskDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(trimmed, DUE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| TaskDomainError::InvalidDueDate(raw.to_owned()))
    }
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDueDate => f.write_str("No due date"),
            Self::Today => f.write_str("Due today"),
            Self::Tomorrow => f.write_str("Due tomorrow"),
            Self::InDays(days) => write!(f, "Due in {days} {}", day_unit(*days)),
            Self::Overdue(days) => write!(f, "Overdue by {days} {}", day_unit(*days)),
        }
    }
}

const fn day_unit(days: u64) -> &'static str {
    if days == 1 { "day" } else { "days" }
}
