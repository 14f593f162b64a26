//! Some utility functions

use chrono::NaiveDate;

use crate::calendar::{CalendarIndex, DayClass, MonthView};
use crate::calendar::day_view::{self, DaySchedule};
use crate::collection::Collection;
use crate::{Caregiver, CaregiverId, Location, Reminder, ReminderKind};

pub mod comparison;
use comparison::{compare_caregivers_alpha, compare_locations_alpha};


/// A debug utility that pretty-prints a month grid.
///
/// `.` marks days that have reminders, `[]` the selected day, `*` today, and past days are dimmed with `-`
pub fn print_month(month: &MonthView, index: &CalendarIndex, today: NaiveDate, selected: Option<NaiveDate>) {
    println!("{:^28}", month.title());
    println!(" Sun Mon Tue Wed Thu Fri Sat");

    let mut line = String::new();
    for _ in 0..month.leading_blanks() {
        line.push_str("    ");
    }
    let mut column = month.leading_blanks();

    for cell in month.cells(index, today, selected) {
        let day = cell.date.format("%e").to_string();
        let marker = if cell.has_reminders { "." } else { " " };
        let text = match (cell.is_selected, cell.class) {
            (true, _) => format!("[{}]", day.trim()),
            (false, DayClass::Past) => format!("-{}{}", day, marker),
            (false, DayClass::Today) => format!("*{}{}", day, marker),
            (false, DayClass::Future) => format!(" {}{}", day, marker),
        };
        line.push_str(&format!("{:>4}", text));

        column += 1;
        if column % 7 == 0 {
            println!("{}", line);
            line.clear();
        }
    }
    if line.is_empty() == false {
        println!("{}", line);
    }
}

/// A debug utility that pretty-prints the busy hours of a day
pub fn print_day(schedule: &DaySchedule, locations: &Collection<Location>) {
    println!("{}", schedule.date().format("%A, %B %e, %Y"));
    if schedule.busy_slots().next().is_none() {
        println!("    (nothing planned)");
        return;
    }
    for slot in schedule.busy_slots() {
        for reminder in &slot.reminders {
            print_reminder(reminder, locations);
        }
    }
}

pub fn print_reminder(reminder: &Reminder, locations: &Collection<Location>) {
    match reminder.kind() {
        ReminderKind::Standard => {
            println!("    {}  {}\t{}", reminder.time_label(), reminder.title(), reminder.id());
        },
        ReminderKind::TimedLocation{ max_time, .. } => {
            let place = day_view::location_of(reminder, locations)
                .map(|l| l.name().to_string())
                .unwrap_or_else(|| "unknown location".to_string());
            println!("    {}  {} @ {} (max {} min)\t{}", reminder.time_label(), reminder.title(), place, max_time, reminder.id());
        },
    }
}

/// A debug utility that pretty-prints caregivers, the primary one first marked with a star
pub fn print_caregivers(caregivers: &Collection<Caregiver>, primary: Option<&CaregiverId>) {
    let mut sorted: Vec<&Caregiver> = caregivers.iter().collect();
    sorted.sort_by(compare_caregivers_alpha);
    for caregiver in sorted {
        let star = if Some(caregiver.id()) == primary { "*" } else { " " };
        println!("    {} {} ({})\t{}", star, caregiver.name(), caregiver.relation(), caregiver.contact());
    }
}

pub fn print_locations(locations: &Collection<Location>) {
    let mut sorted: Vec<&Location> = locations.iter().collect();
    sorted.sort_by(compare_locations_alpha);
    for location in sorted {
        println!("    {}\t{}\t({:.4}, {:.4})", location.name(), location.address(), location.lat(), location.lng());
    }
}
