//! The assistance policy carried by timed-location reminders
//!
//! A timed-location reminder says: the user is expected at some location at some time, and if they are still there `maxTime` minutes later, someone should check on them. \
//! Nothing in this crate enforces it. This module only turns the policy into concrete instants, for whoever wants to watch them.

use chrono::{Duration, NaiveDateTime};

use crate::{LocationId, Reminder, ReminderKind};


/// The time span during which the user is expected at a location
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistanceWindow {
    location_id: LocationId,
    starts_at: NaiveDateTime,
    max_time: u32,
}

impl AssistanceWindow {
    /// Returns `None` for standard reminders
    pub fn of(reminder: &Reminder) -> Option<Self> {
        match reminder.kind() {
            ReminderKind::Standard => None,
            ReminderKind::TimedLocation{ location_id, max_time } => Some(Self {
                location_id: location_id.clone(),
                starts_at: reminder.date().and_time(reminder.time()),
                max_time: *max_time,
            }),
        }
    }

    pub fn location_id(&self) -> &LocationId    { &self.location_id }
    pub fn starts_at(&self) -> NaiveDateTime    { self.starts_at    }
    /// In minutes
    pub fn max_time(&self) -> u32               { self.max_time     }

    /// When an assistance check becomes warranted
    pub fn deadline(&self) -> NaiveDateTime {
        self.starts_at + Duration::minutes(self.max_time as i64)
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        now > self.deadline()
    }
}
