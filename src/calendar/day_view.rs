//! The reminders of a single day, laid out in hourly slots

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::collection::Collection;
use crate::{Location, Reminder};

pub const HOURS_PER_DAY: u32 = 24;


/// One hour of a day
#[derive(Clone, Debug, PartialEq)]
pub struct HourSlot<'a> {
    /// From 0 to 23
    pub hour: u32,
    /// Reminders whose time falls within this hour, in the order they were given
    pub reminders: Vec<&'a Reminder>,
    /// Adding a reminder to an hour of today that is already over is not allowed
    pub add_disabled: bool,
}

impl<'a> HourSlot<'a> {
    /// The time a reminder added from this slot is prefilled with
    pub fn start_time(&self) -> NaiveTime {
        slot_time(self.hour)
    }
}


/// A day, split into 24 hourly slots
#[derive(Clone, Debug, PartialEq)]
pub struct DaySchedule<'a> {
    date: NaiveDate,
    slots: Vec<HourSlot<'a>>,
}

impl<'a> DaySchedule<'a> {
    /// Lay out `reminders` (usually the result of a [`ReminderStore::query`](crate::reminders::ReminderStore::query)) into hourly slots.
    ///
    /// `now` is only used to disable the slots of today that are over.
    pub fn build(date: NaiveDate, reminders: &[&'a Reminder], now: NaiveDateTime) -> Self {
        let is_today = now.date() == date;

        let mut slots: Vec<HourSlot<'a>> = (0..HOURS_PER_DAY)
            .map(|hour| HourSlot {
                hour,
                reminders: Vec::new(),
                add_disabled: is_today && hour < now.hour(),
            })
            .collect();

        for reminder in reminders {
            if reminder.date() != date {
                log::warn!("Reminder {} is on {}, not on {}. Skipping it", reminder.id(), reminder.date(), date);
                continue;
            }
            slots[reminder.time().hour() as usize].reminders.push(reminder);
        }

        Self { date, slots }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn slots(&self) -> &[HourSlot<'a>] {
        &self.slots
    }

    pub fn slot(&self, hour: u32) -> Option<&HourSlot<'a>> {
        self.slots.get(hour as usize)
    }

    /// Slots that contain at least one reminder
    pub fn busy_slots(&self) -> impl Iterator<Item = &HourSlot<'a>> {
        self.slots.iter().filter(|slot| slot.reminders.is_empty() == false)
    }
}

/// The `HH:00` time of an hourly slot
pub fn slot_time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour % HOURS_PER_DAY, 0, 0).unwrap(/* hour is within 0..24 */)
}

/// The place a timed-location reminder points to.
///
/// Returns `None` for standard reminders, and for locations that have been deleted since.
pub fn location_of<'l>(reminder: &Reminder, locations: &'l Collection<Location>) -> Option<&'l Location> {
    reminder.kind().location_id().and_then(|id| locations.get(id))
}
