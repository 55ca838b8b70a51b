//! List filters for a user's tasks.
//!
//! A [`TaskFilter`] is built from the raw `status` and `date` query values
//! (both optional, both validated here) and turned into a conjunction of
//! [`Predicate`]s that the store renders as SQL conditions.
//!
//! A date filter selects a whole calendar day: it expands to an inclusive
//! range from midnight to one nanosecond before the next midnight, so a task
//! scheduled at any time of that day matches.

use super::error::ValidationError;
use super::messages::Message;
use super::task::TaskStatus;
use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Calendar-date format accepted by the `date` query parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One condition of a task query. A query matches rows satisfying all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    OwnedBy(i64),
    Live,
    StatusIs(TaskStatus),
    ScheduledFrom(DateTime<Utc>),
    ScheduledUntil(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub owner_id: i64,
    pub status: Option<TaskStatus>,
    pub date: Option<NaiveDate>,
}

impl TaskFilter {
    /// All live tasks of `owner_id`.
    pub fn new(owner_id: i64) -> Self {
        TaskFilter {
            owner_id,
            status: None,
            date: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Builds a filter from raw query values.
    ///
    /// Empty strings are treated as absent.
    pub fn parse(owner_id: i64, status: Option<&str>, date: Option<&str>) -> Result<Self, ValidationError> {
        let mut filter = TaskFilter::new(owner_id);

        if let Some(raw) = status.filter(|s| !s.is_empty()) {
            filter.status = Some(parse_status_filter(raw)?);
        }
        if let Some(raw) = date.filter(|s| !s.is_empty()) {
            filter.date = Some(parse_date_filter(raw)?);
        }

        Ok(filter)
    }

    /// The conjunction this filter stands for.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = vec![Predicate::OwnedBy(self.owner_id), Predicate::Live];

        if let Some(status) = self.status {
            predicates.push(Predicate::StatusIs(status));
        }
        if let Some(date) = self.date {
            let (start, end) = day_range(date);
            predicates.push(Predicate::ScheduledFrom(start));
            predicates.push(Predicate::ScheduledUntil(end));
        }

        predicates
    }
}

pub fn parse_status_filter(raw: &str) -> Result<TaskStatus, ValidationError> {
    raw.parse()
        .map_err(|_| ValidationError::single("status", Message::InvalidStatusFilter.to_string()))
}

/// Parses `YYYY-MM-DD`, insisting on zero-padded fields.
pub fn parse_date_filter(raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::single("date", Message::InvalidDateFormat.to_string());

    let bytes = raw.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });
    if !shape_ok {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

/// Inclusive bounds covering every instant of `date`.
pub fn day_range(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = match date.checked_add_days(Days::new(1)) {
        Some(next) => next.and_time(NaiveTime::MIN).and_utc() - TimeDelta::nanoseconds(1),
        // Last representable day: nothing follows it.
        None => DateTime::<Utc>::MAX_UTC,
    };
    (start, end)
}
