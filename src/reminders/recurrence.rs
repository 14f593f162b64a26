//! Expansion of a recurring creation request into one reminder per day

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::config;
use crate::reminder::{ReminderDraft, Recurrence};


/// Returns how many daily instances `draft` must be expanded to, or `None` if it must be saved as a single reminder.
///
/// Only brand new (id-less) standard reminders with a positive number of days recur.
/// Longer spans than [`MAX_RECURRENCE_DAYS`](config::MAX_RECURRENCE_DAYS) are cut short.
pub fn expansion_days(draft: &ReminderDraft, recurrence: Option<Recurrence>) -> Option<u32> {
    let recurrence = recurrence?;
    if draft.id.is_some() || draft.kind.is_standard() == false || recurrence.days <= 0 {
        return None;
    }
    if recurrence.days > config::MAX_RECURRENCE_DAYS {
        log::warn!("Recurrence of {} days is capped to {} days", recurrence.days, config::MAX_RECURRENCE_DAYS);
        return Some(config::MAX_RECURRENCE_DAYS as u32);
    }
    Some(recurrence.days as u32)
}

/// Returns `days` consecutive calendar dates, starting at (and including) `start`.
///
/// Day arithmetic is done on a noon anchor, one whole day at a time.
pub fn consecutive_dates(start: NaiveDate, days: u32) -> Vec<NaiveDate> {
    let anchor = NaiveDateTime::new(start, noon());

    let mut dates = Vec::new();
    for i in 0..days {
        match anchor.checked_add_signed(Duration::days(i as i64)) {
            Some(dt) => dates.push(dt.date()),
            None => {
                log::warn!("Recurrence from {} stops after {} days: date out of range", start, i);
                break;
            },
        }
    }
    dates
}

fn noon() -> NaiveTime {
    NaiveTime::from_hms_opt(12, 0, 0).unwrap(/* valid constant time */)
}
