//! # Schedule Slot Model
//!
//! A [`ScheduleSlot`] is a single bookable time interval on a calendar
//! date, anchored by a start time and either an end time or a duration in
//! minutes. The three time attributes are kept mutually consistent: at all
//! times `end == start + duration` when interpreted as absolute instants on
//! the slot's date. Construction goes through [`SlotBuilder`], which
//! validates and derives the missing attribute exactly once; the mutators
//! on a built slot re-derive dependent attributes and fail without leaving
//! partial state behind.
//!
//! Collision checks between two slots compare the half-open intervals
//! `[start, end)` of their derived absolute instants, so slots that merely
//! touch at a boundary do not collide.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde_json::Value;
use tracing::debug;

use crate::datetime;
use crate::errors::{ScheduleError, ScheduleResult};
use crate::export::serialize_attributes;
use crate::models::location::Location;

/// A single bookable time interval within the scheduling component.
///
/// Instances are single-threaded value objects: cloneable, comparable, and
/// not designed for concurrent mutation. The location descriptor is a
/// shared reference owned by the surrounding system; the attribute bag is
/// owned by the slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSlot {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration: i64,
    location: Option<Arc<Location>>,
    attributes: HashMap<String, Value>,
}

impl ScheduleSlot {
    pub fn builder() -> SlotBuilder {
        SlotBuilder::new()
    }

    /// Validates the collected builder fields and derives the missing time
    /// attribute.
    ///
    /// Rules, in order:
    /// - a start time and a date are mandatory;
    /// - a positive duration without an end time derives the end time;
    /// - a positive duration with an end time must agree with the duration
    ///   implied by `end - start`, computed on absolute instants;
    /// - an end time without a positive duration derives the duration,
    ///   which must come out strictly positive;
    /// - neither an end time nor a positive duration is an error.
    fn from_parts(parts: SlotBuilder) -> ScheduleResult<Self> {
        let start_raw = parts
            .start_time
            .ok_or(ScheduleError::MissingField("start time"))?;
        let date = parts.date.ok_or(ScheduleError::MissingField("date"))?;
        let start_time = datetime::parse_time(&start_raw)?;
        let supplied_end = parts
            .end_time
            .as_deref()
            .map(datetime::parse_time)
            .transpose()?;
        let supplied_duration = parts.duration.filter(|duration| *duration > 0);

        let (end_time, duration) = match (supplied_end, supplied_duration) {
            (None, Some(duration)) => {
                let end = datetime::add_minutes(datetime::combine(date, start_time), duration);
                debug!(%date, duration, "derived end time from start time and duration");
                (end.time(), duration)
            }
            (Some(end_time), Some(duration)) => {
                let implied = datetime::minutes_between(
                    datetime::combine(date, start_time),
                    datetime::combine(date, end_time),
                );
                if implied != duration {
                    return Err(ScheduleError::InconsistentTiming {
                        supplied: duration,
                        implied,
                    });
                }
                (end_time, duration)
            }
            (Some(end_time), None) => {
                let implied = datetime::minutes_between(
                    datetime::combine(date, start_time),
                    datetime::combine(date, end_time),
                );
                if implied <= 0 {
                    return Err(ScheduleError::InvalidInterval);
                }
                debug!(%date, implied, "derived duration from start and end times");
                (end_time, implied)
            }
            (None, None) => return Err(ScheduleError::UnderspecifiedInterval),
        };

        Ok(Self {
            date,
            start_time,
            end_time,
            duration,
            location: parts.location,
            attributes: parts.attributes,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Duration of the slot in minutes, strictly positive.
    pub fn duration_minutes(&self) -> i64 {
        self.duration
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_deref()
    }

    /// The absolute instant the slot starts, in milliseconds since the
    /// Unix epoch.
    ///
    /// Always recomputed from the current date and start time, never
    /// cached.
    pub fn start_instant_millis(&self) -> i64 {
        datetime::instant_millis(self.date, self.start_time)
    }

    /// The absolute instant the slot ends: the start instant plus the
    /// duration.
    pub fn end_instant_millis(&self) -> i64 {
        self.start_instant_millis() + self.duration * datetime::MILLIS_PER_MINUTE
    }

    /// Checks whether this slot overlaps another slot in time.
    ///
    /// Both slots are taken as half-open intervals `[start, end)` over
    /// their derived absolute instants, so a slot ending exactly when the
    /// other starts does not collide. The relation is symmetric and free
    /// of side effects.
    pub fn is_colliding_with(&self, other: &ScheduleSlot) -> bool {
        let start_1 = self.start_instant_millis();
        let end_1 = self.end_instant_millis();
        let start_2 = other.start_instant_millis();
        let end_2 = other.end_instant_millis();

        (start_1 <= start_2 && start_2 < end_1) || (start_2 <= start_1 && start_1 < end_2)
    }

    /// Replaces the slot's date.
    ///
    /// The end time and duration are not re-validated against the new
    /// date; callers moving a slot across days are responsible for
    /// re-checking the interval themselves.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Replaces the start time and recomputes the duration from the new
    /// start and the current end time.
    ///
    /// Fails with [`ScheduleError::InvalidInterval`] if the new start
    /// instant falls after the end instant; the slot is unchanged on
    /// failure.
    pub fn set_start_time(&mut self, start_time: &str) -> ScheduleResult<()> {
        let start_time = datetime::parse_time(start_time)?;
        let duration = self.recompute_duration(start_time, self.end_time)?;
        self.start_time = start_time;
        self.duration = duration;
        Ok(())
    }

    /// Replaces the end time and recomputes the duration from the current
    /// start and the new end time.
    ///
    /// Fails with [`ScheduleError::InvalidInterval`] if the start instant
    /// falls after the new end instant; the slot is unchanged on failure.
    pub fn set_end_time(&mut self, end_time: &str) -> ScheduleResult<()> {
        let end_time = datetime::parse_time(end_time)?;
        let duration = self.recompute_duration(self.start_time, end_time)?;
        self.end_time = end_time;
        self.duration = duration;
        Ok(())
    }

    /// Recomputes the duration from the current date, start time and end
    /// time.
    pub fn update_duration(&mut self) -> ScheduleResult<()> {
        self.duration = self.recompute_duration(self.start_time, self.end_time)?;
        Ok(())
    }

    fn recompute_duration(
        &self,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> ScheduleResult<i64> {
        let start = datetime::combine(self.date, start_time);
        let end = datetime::combine(self.date, end_time);
        if start > end {
            return Err(ScheduleError::InvalidInterval);
        }
        let duration = datetime::minutes_between(start, end);
        debug!(%start, %end, duration, "recomputed slot duration");
        Ok(duration)
    }

    /// Replaces the duration and re-derives the end time as the start
    /// instant plus the new duration; the start time is left unchanged.
    ///
    /// A non-positive duration fails with
    /// [`ScheduleError::InvalidInterval`].
    pub fn set_duration(&mut self, duration: i64) -> ScheduleResult<()> {
        if duration <= 0 {
            return Err(ScheduleError::InvalidInterval);
        }
        let start = datetime::combine(self.date, self.start_time);
        let end = datetime::add_minutes(start, duration);
        self.duration = duration;
        self.end_time = end.time();
        Ok(())
    }

    pub fn set_location(&mut self, location: Arc<Location>) {
        self.location = Some(location);
    }

    /// Inserts or replaces an attribute, returning the slot for chained
    /// configuration calls.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Returns a copy of the attribute bag; mutating the returned map does
    /// not affect the slot.
    pub fn attributes(&self) -> HashMap<String, Value> {
        self.attributes.clone()
    }

    /// The week day the slot's date falls on, under the Monday-first
    /// convention documented in [`crate::datetime`].
    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }
}

impl fmt::Display for ScheduleSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<on day: {}> <starts at: {}> <ends at: {}> <location: {}> <properties: {}>",
            datetime::format_date(self.date),
            datetime::format_time(self.start_time),
            datetime::format_time(self.end_time),
            self.location
                .as_deref()
                .map(|location| location.name.as_str())
                .unwrap_or("unassigned"),
            serialize_attributes(&self.attributes),
        )
    }
}

/// Collects the optional fields of a [`ScheduleSlot`].
///
/// Setters consume and return the builder for chaining; nothing is
/// validated until [`SlotBuilder::build`], which parses the raw time
/// strings, checks the interval rules once, and moves the attribute bag
/// into the slot.
#[derive(Debug, Clone, Default)]
pub struct SlotBuilder {
    date: Option<NaiveDate>,
    start_time: Option<String>,
    end_time: Option<String>,
    duration: Option<i64>,
    location: Option<Arc<Location>>,
    attributes: HashMap<String, Value>,
}

impl SlotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the start time as an `HH:MM` string, parsed at build time.
    pub fn set_start_time(mut self, start_time: impl Into<String>) -> Self {
        self.start_time = Some(start_time.into());
        self
    }

    /// Sets the end time as an `HH:MM` string, parsed at build time.
    pub fn set_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    /// Sets the duration in minutes; values of zero or less are treated as
    /// "not supplied" at build time.
    pub fn set_duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn set_location(mut self, location: Arc<Location>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn set_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Replaces the whole attribute bag.
    pub fn set_attributes(mut self, attributes: HashMap<String, Value>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Validates the collected fields and constructs the slot.
    ///
    /// Either returns a fully consistent slot or an error with nothing
    /// constructed; see [`crate::errors::ScheduleError`] for the failure
    /// cases.
    pub fn build(self) -> ScheduleResult<ScheduleSlot> {
        ScheduleSlot::from_parts(self)
    }
}
