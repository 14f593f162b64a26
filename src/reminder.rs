//! Reminders (the dated, timed notes shown to the user)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use chrono::{NaiveDate, NaiveTime, Utc};

use crate::location::LocationId;
use crate::traits::Entity;


/// The identifier of a [`Reminder`]
///
/// Ids minted by this crate (see [`ReminderIdGenerator`]) sort in creation order, but ids coming from older saves can be any string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderId(String);

impl ReminderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for ReminderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for ReminderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for ReminderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// What kind of reminder this is.
///
/// Timed-location fields only exist for the `TimedLocation` variant, so that a standard reminder can never carry a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReminderKind {
    /// A plain note, shown at a given time
    Standard,
    /// The user is expected at `location_id`. If they are still there `max_time` minutes later, an assistance check is warranted
    TimedLocation {
        location_id: LocationId,
        /// In minutes
        max_time: u32,
    },
}

impl ReminderKind {
    pub const STANDARD_TAG: &'static str = "standard";
    pub const TIMED_LOCATION_TAG: &'static str = "timed-location";

    /// The `reminderType` tag, as persisted
    pub fn tag(&self) -> &'static str {
        match self {
            ReminderKind::Standard => Self::STANDARD_TAG,
            ReminderKind::TimedLocation{ .. } => Self::TIMED_LOCATION_TAG,
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, ReminderKind::Standard)
    }

    pub fn location_id(&self) -> Option<&LocationId> {
        match self {
            ReminderKind::TimedLocation{ location_id, .. } => Some(location_id),
            ReminderKind::Standard => None,
        }
    }

    pub fn max_time(&self) -> Option<u32> {
        match self {
            ReminderKind::TimedLocation{ max_time, .. } => Some(*max_time),
            ReminderKind::Standard => None,
        }
    }
}

impl Default for ReminderKind {
    fn default() -> Self {
        ReminderKind::Standard
    }
}


/// A reminder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawReminder", into = "RawReminder")]
pub struct Reminder {
    id: ReminderId,
    /// A calendar date, without any time zone
    date: NaiveDate,
    /// Hour and minute
    time: NaiveTime,
    title: String,
    description: String,
    kind: ReminderKind,
}

impl Reminder {
    pub fn new(id: ReminderId, date: NaiveDate, time: NaiveTime, title: String, description: String, kind: ReminderKind) -> Self {
        Self { id, date, time, title, description, kind }
    }

    pub fn id(&self) -> &ReminderId         { &self.id          }
    pub fn date(&self) -> NaiveDate         { self.date         }
    pub fn time(&self) -> NaiveTime         { self.time         }
    pub fn title(&self) -> &str             { &self.title       }
    pub fn description(&self) -> &str       { &self.description }
    pub fn kind(&self) -> &ReminderKind     { &self.kind        }

    /// The time, formatted as a zero-padded `HH:MM`
    pub fn time_label(&self) -> String {
        self.time.format(hh_mm::FORMAT).to_string()
    }

    /// Returns a draft that, once saved, replaces this reminder
    pub fn to_draft(&self) -> ReminderDraft {
        ReminderDraft {
            id: Some(self.id.clone()),
            date: self.date,
            time: self.time,
            title: self.title.clone(),
            description: self.description.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl Entity for Reminder {
    type Id = ReminderId;

    fn id(&self) -> &ReminderId {
        &self.id
    }
}


/// A reminder that may not have an id yet.
///
/// A draft without id is a creation request, a draft with an id replaces the reminder that has this id.
#[derive(Clone, Debug, PartialEq)]
pub struct ReminderDraft {
    pub id: Option<ReminderId>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub title: String,
    pub description: String,
    pub kind: ReminderKind,
}

impl ReminderDraft {
    /// A new standard reminder, with an empty description
    pub fn new(date: NaiveDate, time: NaiveTime, title: String) -> Self {
        Self {
            id: None,
            date, time, title,
            description: String::new(),
            kind: ReminderKind::Standard,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_kind(mut self, kind: ReminderKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_id(mut self, id: ReminderId) -> Self {
        self.id = Some(id);
        self
    }

    /// Build the actual reminder. This ignores the id of the draft, if any
    pub(crate) fn to_reminder(&self, id: ReminderId, date: NaiveDate) -> Reminder {
        Reminder::new(id, date, self.time, self.title.clone(), self.description.clone(), self.kind.clone())
    }
}


/// A request to repeat a new reminder over consecutive days
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Recurrence {
    /// How many days (including the first one) the reminder spans
    pub days: i64,
}

impl Recurrence {
    pub fn days(days: i64) -> Self {
        Self { days }
    }
}


/// Mints reminder ids such as `reminder-1717228800000-0003`.
///
/// Ids are built from the current timestamp (in milliseconds) and a sequence number, so that ids minted during the same millisecond still differ.
/// Every id is strictly greater (both as a string and as a [`ReminderId`]) than the previous one minted by the same generator.
#[derive(Debug, Default)]
pub struct ReminderIdGenerator {
    last_stamp: i64,
    seq: u32,
}

const MAX_SEQ: u32 = 9999;

impl ReminderIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new id
    pub fn next_id(&mut self) -> ReminderId {
        self.next_at(Utc::now().timestamp_millis())
    }

    fn next_at(&mut self, now_millis: i64) -> ReminderId {
        if now_millis > self.last_stamp {
            self.last_stamp = now_millis;
            self.seq = 0;
        } else if self.seq >= MAX_SEQ {
            // Borrow the next millisecond rather than wrapping the sequence
            self.last_stamp += 1;
            self.seq = 0;
        } else {
            self.seq += 1;
        }
        ReminderId(format!("reminder-{:013}-{:04}", self.last_stamp, self.seq))
    }
}


/// The persisted shape of a reminder.
///
/// It is more lenient than [`Reminder`], so that saves written by older versions still load.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReminder {
    id: ReminderId,
    date: NaiveDate,
    #[serde(with = "hh_mm")]
    time: NaiveTime,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    reminder_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_time: Option<i64>,
}

impl From<RawReminder> for Reminder {
    fn from(raw: RawReminder) -> Self {
        let kind = match raw.reminder_type.as_deref() {
            None | Some(ReminderKind::STANDARD_TAG) => ReminderKind::Standard,
            Some(ReminderKind::TIMED_LOCATION_TAG) => {
                let location_id = raw.location_id.filter(|id| id.as_str().is_empty() == false);
                let max_time = raw.max_time.filter(|t| *t > 0 && *t <= u32::MAX as i64);
                match (location_id, max_time) {
                    (Some(location_id), Some(max_time)) => ReminderKind::TimedLocation{ location_id, max_time: max_time as u32 },
                    _ => {
                        log::warn!("Timed-location reminder {} has no valid location or max time. Loading it as a standard reminder", raw.id);
                        ReminderKind::Standard
                    },
                }
            },
            Some(other) => {
                log::warn!("Unknown reminder type {:?} for reminder {}. Loading it as a standard reminder", other, raw.id);
                ReminderKind::Standard
            },
        };

        Reminder {
            id: raw.id,
            date: raw.date,
            time: raw.time,
            title: raw.title,
            description: raw.description,
            kind,
        }
    }
}

impl From<Reminder> for RawReminder {
    fn from(reminder: Reminder) -> Self {
        let reminder_type = Some(reminder.kind.tag().to_string());
        let (location_id, max_time) = match reminder.kind {
            ReminderKind::Standard => (None, None),
            ReminderKind::TimedLocation{ location_id, max_time } => (Some(location_id), Some(max_time as i64)),
        };
        RawReminder {
            id: reminder.id,
            date: reminder.date,
            time: reminder.time,
            title: reminder.title,
            description: reminder.description,
            reminder_type,
            location_id,
            max_time,
        }
    }
}


/// (De)serializes a `NaiveTime` as `HH:MM`
pub(crate) mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn parse(s: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(s, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid time {:?}, expected HH:MM", s)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn legacy_record_defaults_to_standard() {
        let json = r#"{"id":"r1","date":"2024-06-01","time":"08:00","title":"Take Morning Medication","description":""}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert_eq!(reminder.kind(), &ReminderKind::Standard);
        assert_eq!(reminder.date(), date("2024-06-01"));
        assert_eq!(reminder.time_label(), "08:00");
    }

    #[test]
    fn timed_location_persisted_shape() {
        let reminder = Reminder::new(
            ReminderId::from("r2"), date("2024-06-01"), NaiveTime::from_hms_opt(17, 5, 0).unwrap(),
            "Visit to Society Park".to_string(), String::new(),
            ReminderKind::TimedLocation{ location_id: LocationId::from("loc-4"), max_time: 45 },
        );
        let value = serde_json::to_value(&reminder).unwrap();
        assert_eq!(value["reminderType"], "timed-location");
        assert_eq!(value["locationId"], "loc-4");
        assert_eq!(value["maxTime"], 45);
        assert_eq!(value["time"], "17:05");
        assert_eq!(value["date"], "2024-06-01");

        let back: Reminder = serde_json::from_value(value).unwrap();
        assert_eq!(back, reminder);
    }

    #[test]
    fn standard_record_has_no_location_fields() {
        let reminder = ReminderDraft::new(date("2024-06-01"), NaiveTime::from_hms_opt(8, 0, 0).unwrap(), "Walk".to_string())
            .to_reminder(ReminderId::from("r3"), date("2024-06-01"));
        let value = serde_json::to_value(&reminder).unwrap();
        assert_eq!(value["reminderType"], "standard");
        assert!(value.get("locationId").is_none());
        assert!(value.get("maxTime").is_none());
    }

    #[test]
    fn incomplete_timed_location_loads_as_standard() {
        let json = r#"{"id":"r4","date":"2024-06-01","time":"09:00","title":"Visit Park","description":"","reminderType":"timed-location","locationId":"","maxTime":60}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert!(reminder.kind().is_standard());

        let json = r#"{"id":"r5","date":"2024-06-01","time":"09:00","title":"Visit Park","description":"","reminderType":"timed-location","locationId":"loc-1","maxTime":0}"#;
        let reminder: Reminder = serde_json::from_str(json).unwrap();
        assert!(reminder.kind().is_standard());
    }

    #[test]
    fn ids_increase_within_the_same_millisecond() {
        let mut generator = ReminderIdGenerator::new();
        let a = generator.next_at(1_717_228_800_000);
        let b = generator.next_at(1_717_228_800_000);
        let c = generator.next_at(1_717_228_799_999);
        let d = generator.next_at(1_717_228_800_001);
        assert!(a < b && b < c && c < d);
        assert!(a.as_str() < b.as_str() && b.as_str() < c.as_str() && c.as_str() < d.as_str());
        assert_eq!(a.as_str(), "reminder-1717228800000-0000");
    }

    #[test]
    fn sequence_overflow_moves_to_next_millisecond() {
        let mut generator = ReminderIdGenerator::new();
        let mut previous = generator.next_at(5);
        for _ in 0..(MAX_SEQ + 5) {
            let id = generator.next_at(5);
            assert!(previous < id);
            previous = id;
        }
        assert!(previous.as_str().starts_with("reminder-0000000000006-"));
    }
}
