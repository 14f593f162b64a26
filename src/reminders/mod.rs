//! The reminder store, that owns every reminder and guarantees their ids are unique

use chrono::NaiveDate;

use crate::collection::Collection;
use crate::reminder::{Reminder, ReminderDraft, ReminderId, ReminderIdGenerator, Recurrence};

pub mod recurrence;


/// Owns the full collection of reminders.
///
/// This does not validate anything: drafts are supposed to have been checked by the [`form`](crate::form) layer already.
#[derive(Debug, Default)]
pub struct ReminderStore {
    reminders: Collection<Reminder>,
    ids: ReminderIdGenerator,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from previously persisted reminders
    pub fn from_reminders(reminders: Collection<Reminder>) -> Self {
        Self {
            reminders,
            ids: ReminderIdGenerator::new(),
        }
    }

    /// Create or update reminders.
    ///
    /// * a new standard reminder with a positive `recurrence` is expanded to one reminder per day, starting at the date of the draft
    /// * otherwise, a draft with an id replaces the reminder with that id (or is appended if no such reminder exists)
    /// * and a draft without id is given a fresh id and appended
    ///
    /// Returns the ids of the reminders that have been written, in order
    pub fn upsert(&mut self, draft: ReminderDraft, recurrence: Option<Recurrence>) -> Vec<ReminderId> {
        if let Some(days) = recurrence::expansion_days(&draft, recurrence) {
            let mut written = Vec::new();
            for date in recurrence::consecutive_dates(draft.date, days) {
                let id = self.mint_id();
                self.reminders.upsert(draft.to_reminder(id.clone(), date));
                written.push(id);
            }
            log::debug!("Created {} daily instances of {:?} from {}", written.len(), draft.title, draft.date);
            return written;
        }

        let id = match &draft.id {
            Some(id) => id.clone(),
            None => self.mint_id(),
        };
        let outcome = self.reminders.upsert(draft.to_reminder(id.clone(), draft.date));
        log::debug!("Reminder {} {:?}", id, outcome);
        vec![id]
    }

    /// Delete a reminder. Deleting an unknown id does nothing
    pub fn remove(&mut self, id: &ReminderId) -> bool {
        let removed = self.reminders.remove(id);
        if removed == false {
            log::debug!("No reminder {} to remove", id);
        }
        removed
    }

    /// Returns the reminders on `date`, earliest first.
    ///
    /// Reminders at the same time keep their relative order in the collection
    pub fn query(&self, date: NaiveDate) -> Vec<&Reminder> {
        let mut found: Vec<&Reminder> = self.reminders.iter()
            .filter(|r| r.date() == date)
            .collect();
        found.sort_by_key(|r| r.time());
        found
    }

    pub fn get(&self, id: &ReminderId) -> Option<&Reminder> {
        self.reminders.get(id)
    }

    pub fn all(&self) -> &Collection<Reminder> {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }

    fn mint_id(&mut self) -> ReminderId {
        loop {
            let id = self.ids.next_id();
            if self.reminders.contains(&id) == false {
                return id;
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use crate::{ReminderKind, LocationId};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn draft(day: &str, at: &str, title: &str) -> ReminderDraft {
        ReminderDraft::new(date(day), time(at), title.to_string())
    }

    #[test]
    fn recurring_creation_makes_one_reminder_per_day() {
        let mut store = ReminderStore::new();
        let ids = store.upsert(draft("2024-06-01", "08:00", "Take Morning Medication"), Some(Recurrence::days(3)));

        assert_eq!(ids.len(), 3);
        assert_eq!(store.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let dates: Vec<NaiveDate> = store.all().iter().map(|r| r.date()).collect();
        assert_eq!(dates, vec![date("2024-06-01"), date("2024-06-02"), date("2024-06-03")]);
        assert!(store.all().iter().all(|r| r.title() == "Take Morning Medication" && r.time() == time("08:00")));
    }

    #[test]
    fn huge_recurrence_is_capped() {
        let mut store = ReminderStore::new();
        let ids = store.upsert(draft("2024-06-01", "08:00", "Meds"), Some(Recurrence::days(99_999_999_999)));

        assert_eq!(ids.len() as i64, crate::config::MAX_RECURRENCE_DAYS);
        assert_eq!(store.len() as i64, crate::config::MAX_RECURRENCE_DAYS);
        assert_eq!(store.query(date("2025-05-31")).len(), 1);
        assert!(store.query(date("2025-06-01")).is_empty());
    }

    #[test]
    fn recurrence_is_ignored_when_editing() {
        let mut store = ReminderStore::new();
        let id = store.upsert(draft("2024-06-01", "08:00", "Walk"), None).remove(0);

        let edited = draft("2024-06-01", "09:30", "Long walk").with_id(id.clone());
        let ids = store.upsert(edited, Some(Recurrence::days(5)));

        assert_eq!(ids, vec![id.clone()]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().title(), "Long walk");
    }

    #[test]
    fn recurrence_is_ignored_for_timed_location() {
        let mut store = ReminderStore::new();
        let timed = draft("2024-06-01", "17:00", "Visit to Society Park")
            .with_kind(ReminderKind::TimedLocation{ location_id: LocationId::from("loc-4"), max_time: 60 });
        store.upsert(timed, Some(Recurrence::days(4)));
        assert_eq!(store.len(), 1);

        store.upsert(draft("2024-06-01", "08:00", "Meds"), Some(Recurrence::days(0)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_keeps_position() {
        let mut store = ReminderStore::new();
        store.upsert(draft("2024-06-01", "08:00", "A"), None);
        let b = store.upsert(draft("2024-06-01", "09:00", "B"), None).remove(0);
        store.upsert(draft("2024-06-01", "10:00", "C"), None);

        store.upsert(draft("2024-06-02", "11:00", "B2").with_id(b), None);
        let titles: Vec<&str> = store.all().iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["A", "B2", "C"]);
    }

    #[test]
    fn rapid_creations_never_share_an_id() {
        let mut store = ReminderStore::new();
        for _ in 0..200 {
            store.upsert(draft("2024-06-01", "08:00", "Same"), None);
        }
        let mut ids: Vec<&ReminderId> = store.all().iter().map(|r| r.id()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn query_sorts_by_time_and_is_stable() {
        let mut store = ReminderStore::new();
        store.upsert(draft("2024-06-01", "20:00", "Evening"), None);
        store.upsert(draft("2024-06-02", "07:00", "Other day"), None);
        store.upsert(draft("2024-06-01", "08:00", "First at eight"), None);
        store.upsert(draft("2024-06-01", "08:00", "Second at eight"), None);

        let found: Vec<(String, &str)> = store.query(date("2024-06-01")).iter()
            .map(|r| (r.time_label(), r.title()))
            .collect();
        assert_eq!(found, vec![
            ("08:00".to_string(), "First at eight"),
            ("08:00".to_string(), "Second at eight"),
            ("20:00".to_string(), "Evening"),
        ]);
        assert!(store.query(date("2024-06-03")).is_empty());
    }

    #[test]
    fn removing_unknown_reminder_is_harmless() {
        let mut store = ReminderStore::new();
        store.upsert(draft("2024-06-01", "08:00", "A"), None);
        assert_eq!(store.remove(&ReminderId::from("nope")), false);
        assert_eq!(store.len(), 1);
    }
}
