//! The dataset a fresh install starts with (also used when saved data cannot be read back)

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::collection::Collection;
use crate::{Caregiver, CaregiverId, Location, LocationId};
use crate::{Reminder, ReminderId, ReminderKind};

const MORNING_MEDS: &str = "Take the blue and white pills with a full glass of water. It's important for your health.";
const EVENING_MEDS: &str = "Time for your evening pills. The green one before bed.";

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap(/* valid constant time */)
}

fn standard(id: String, date: NaiveDate, time: NaiveTime, title: &str, description: &str) -> Reminder {
    Reminder::new(ReminderId::from(id), date, time, title.to_string(), description.to_string(), ReminderKind::Standard)
}

/// A week of medication, a doctor's appointment, a family lunch and a walk, all relative to `today`
pub fn reminders(today: NaiveDate) -> Collection<Reminder> {
    let mut reminders = Collection::new();

    for i in 0..7 {
        let date = today + Duration::days(i);
        reminders.upsert(standard(format!("reminder-meds-{}", i), date, hm(8, 0), "Take Morning Medication", MORNING_MEDS));
        if i > 0 {
            reminders.upsert(standard(format!("reminder-evening-meds-{}", i), date, hm(20, 0), "Take Evening Medication", EVENING_MEDS));
        }
    }

    reminders.upsert(standard(
        "reminder-doctor".to_string(), today + Duration::days(1), hm(10, 0),
        "Doctor's Appointment", "Appointment with Dr. Sharma at AIIMS. Emily will drive you there.",
    ));
    reminders.upsert(standard(
        "reminder-lunch".to_string(), today + Duration::days(2), hm(12, 30),
        "Lunch with Emily", "Emily is coming over for lunch today. Remember she loves your stories.",
    ));
    reminders.upsert(standard(
        "reminder-walk".to_string(), today, hm(18, 0),
        "Evening Walk", "A gentle walk in Lodhi Garden if the weather is nice.",
    ));

    reminders
}

pub fn caregivers() -> Collection<Caregiver> {
    [
        ("cg-1", "Emily Carter", "Daughter", "123-456-7890"),
        ("cg-2", "John Doe", "Son", "098-765-4321"),
        ("cg-3", "Maria Garcia", "Nurse", "555-555-5555"),
    ].iter()
        .map(|(id, name, relation, contact)| Caregiver::new(CaregiverId::from(*id), name.to_string(), relation.to_string(), contact.to_string()))
        .collect()
}

pub fn locations() -> Collection<Location> {
    [
        ("loc-1", "Home", "Hauz Khas, New Delhi, Delhi", 28.5493, 77.2052),
        ("loc-2", "Daughter's House", "Vasant Kunj, New Delhi, Delhi", 28.5222, 77.1588),
        ("loc-3", "Hospital", "AIIMS, Ansari Nagar East, New Delhi", 28.5668, 77.2113),
        ("loc-4", "Society Park", "Lodhi Garden, New Delhi, Delhi", 28.5931, 77.2215),
    ].iter()
        .map(|(id, name, address, lat, lng)| Location::new(LocationId::from(*id), name.to_string(), address.to_string(), *lat, *lng))
        .collect()
}
