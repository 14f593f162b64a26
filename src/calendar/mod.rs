//! Date-bucketed views over the reminders: the month grid, and the [`day_view`] of a single date

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::Reminder;

pub mod day_view;


/// How many reminders exist on each date.
///
/// This is rebuilt from scratch whenever reminders change, so that a calendar cell can tell whether it has reminders without scanning every reminder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalendarIndex {
    counts: HashMap<NaiveDate, usize>,
}

impl CalendarIndex {
    pub fn build<'a, I>(reminders: I) -> Self
    where
        I: IntoIterator<Item = &'a Reminder>,
    {
        let mut counts = HashMap::new();
        for reminder in reminders {
            *counts.entry(reminder.date()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, date: NaiveDate) -> usize {
        self.counts.get(&date).copied().unwrap_or(0)
    }

    pub fn has_reminders(&self, date: NaiveDate) -> bool {
        self.counts.contains_key(&date)
    }

    /// Number of distinct dates that have reminders
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}


/// Where a date stands relative to today
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayClass {
    Past,
    Today,
    Future,
}

impl DayClass {
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        if date < today {
            DayClass::Past
        } else if date == today {
            DayClass::Today
        } else {
            DayClass::Future
        }
    }

    /// Past days cannot be selected
    pub fn is_selectable(&self) -> bool {
        *self != DayClass::Past
    }
}


/// Everything needed to draw one cell of the month grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub class: DayClass,
    /// Shown regardless of the day being in the past or not
    pub has_reminders: bool,
    pub is_selected: bool,
}


/// A month, as displayed by the calendar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    /// The month that contains `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self { first: date.with_day(1).unwrap(/* every month has a first day */) }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// The month before this one. This saturates at the earliest supported month
    pub fn previous(&self) -> Self {
        let (year, month) = match self.first.month() {
            1 => (self.first.year() - 1, 12),
            m => (self.first.year(), m - 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    /// The month after this one. This saturates at the latest supported month
    pub fn next(&self) -> Self {
        let (year, month) = match self.first.month() {
            12 => (self.first.year() + 1, 1),
            m => (self.first.year(), m + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        let (year, month) = (self.first.year(), self.first.month());
        (28..=31).rev()
            .find(|day| NaiveDate::from_ymd_opt(year, month, *day).is_some())
            .unwrap_or(28)
    }

    /// How many empty cells precede the first day, in a grid whose weeks start on Sunday
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// e.g. "June 2024"
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.first.year() && date.month() == self.first.month()
    }

    /// One cell per day of this month
    pub fn cells(&self, index: &CalendarIndex, today: NaiveDate, selected: Option<NaiveDate>) -> Vec<DayCell> {
        (0..self.days_in_month())
            .filter_map(|offset| self.first.with_day(offset + 1))
            .map(|date| DayCell {
                date,
                class: DayClass::classify(date, today),
                has_reminders: index.has_reminders(date),
                is_selected: selected == Some(date),
            })
            .collect()
    }
}


/// The date whose reminders are shown in the day view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    date: NaiveDate,
}

impl Selection {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Select another date.
    ///
    /// Clicking a past day does nothing. Returns whether the selection changed
    pub fn select(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if DayClass::classify(date, today).is_selectable() == false {
            log::debug!("Ignoring selection of past day {}", date);
            return false;
        }
        let changed = self.date != date;
        self.date = date;
        changed
    }

    /// New reminders cannot be added to a selected date that is already over
    pub fn is_in_past(&self, today: NaiveDate) -> bool {
        DayClass::classify(self.date, today) == DayClass::Past
    }

    /// The month grid that shows the selected date
    pub fn month(&self) -> MonthView {
        MonthView::containing(self.date)
    }
}
