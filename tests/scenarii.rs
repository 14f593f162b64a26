//! End-to-end scenarios, going through the state owner and a storage, the way an app would

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};

use mano_mitra::AppState;
use mano_mitra::calendar::{DayClass, MonthView, Selection};
use mano_mitra::config;
use mano_mitra::form::{KindChoice, ReminderForm, SaveBlockers};
use mano_mitra::storage::{FolderStorage, MemoryStorage};
use mano_mitra::traits::Storage;
use mano_mitra::{LocationId, ReminderDraft, ReminderId, ReminderKind, Recurrence};


fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

/// A state with no reminders at all (but the default caregivers and locations)
fn empty_state() -> AppState<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    storage.set(config::REMINDERS_KEY, "[]").unwrap();
    AppState::load(storage, date("2024-05-30"))
}

fn temp_folder() -> PathBuf {
    std::env::temp_dir().join(format!("mano-mitra-scenarii-{}", uuid::Uuid::new_v4()))
}


#[test]
fn recurring_medication_over_three_days() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut state = empty_state();

    let draft = ReminderDraft::new(date("2024-06-01"), time("08:00"), "Take Morning Medication".to_string());
    let ids = state.save_reminder(draft, Some(Recurrence::days(3)));

    assert_eq!(ids.len(), 3);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);

    for (i, day) in ["2024-06-01", "2024-06-02", "2024-06-03"].iter().enumerate() {
        let found = state.reminders_on(date(day));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title(), "Take Morning Medication");
        assert_eq!(found[0].id(), &ids[i]);
    }
    assert!(state.reminders_on(date("2024-06-04")).is_empty());
}

#[test]
fn recurrence_of_any_length() {
    for n in 1..=10 {
        let mut state = empty_state();
        let ids = state.save_reminder(
            ReminderDraft::new(date("2024-06-25"), time("08:00"), "Meds".to_string()),
            Some(Recurrence::days(n)),
        );
        assert_eq!(ids.len() as i64, n);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));

        let dates: Vec<NaiveDate> = ids.iter().map(|id| state.reminder(id).unwrap().date()).collect();
        for (i, d) in dates.iter().enumerate() {
            assert_eq!(*d, date("2024-06-25") + chrono::Duration::days(i as i64));
        }
    }
}

#[test]
fn day_view_is_sorted_by_time() {
    let mut state = empty_state();
    state.save_reminder(ReminderDraft::new(date("2024-06-01"), time("20:00"), "Evening".to_string()), None);
    state.save_reminder(ReminderDraft::new(date("2024-06-01"), time("08:00"), "Morning".to_string()), None);

    let times: Vec<String> = state.reminders_on(date("2024-06-01")).iter().map(|r| r.time_label()).collect();
    assert_eq!(times, vec!["08:00", "20:00"]);
}

#[test]
fn timed_location_without_location_cannot_be_saved() {
    let mut form = ReminderForm::new(None);
    form.kind = KindChoice::TimedLocation;
    form.title = "Visit Park".to_string();
    form.location_id = String::new();
    form.max_time = "60".to_string();

    assert!(form.is_save_disabled());
    assert!(form.blockers().contains(SaveBlockers::MISSING_LOCATION));
    assert!(form.submit(date("2024-06-01")).is_err());
}

#[test]
fn form_to_store_roundtrip() {
    let mut state = empty_state();

    let mut form = ReminderForm::new(Some(time("17:00")));
    form.kind = KindChoice::TimedLocation;
    form.choose_location("loc-4", state.locations());
    form.max_time = "45".to_string();
    form.recurring = true;
    form.recurrence_days = "5".to_string();

    let (draft, recurrence) = form.submit(date("2024-06-01")).unwrap();
    let ids = state.save_reminder(draft, recurrence);
    assert_eq!(ids.len(), 1);

    let saved = state.reminder(&ids[0]).unwrap();
    assert_eq!(saved.title(), "Visit to Society Park");
    assert_eq!(saved.kind(), &ReminderKind::TimedLocation{ location_id: LocationId::from("loc-4"), max_time: 45 });

    // Edit it through the form
    let mut form = ReminderForm::edit(saved);
    form.max_time = "90".to_string();
    let (draft, recurrence) = form.submit(date("2024-06-01")).unwrap();
    state.save_reminder(draft, recurrence);
    assert_eq!(state.reminders().len(), 1);
    assert_eq!(state.reminder(&ids[0]).unwrap().kind().max_time(), Some(90));

    // Deleting the location leaves a dangling reference
    assert!(state.delete_location(&LocationId::from("loc-4")));
    assert_eq!(state.reminder(&ids[0]).unwrap().kind().location_id(), Some(&LocationId::from("loc-4")));
}

#[test]
fn legacy_reminders_are_migrated_on_load() {
    let _ = env_logger::builder().is_test(true).try_init();

    let folder = temp_folder();
    let mut storage = FolderStorage::new(&folder);
    storage.set(config::REMINDERS_KEY, r#"[
        {"id":"reminder-1","date":"2024-06-01","time":"08:00","title":"Take Morning Medication","description":"Blue pills"},
        {"id":"reminder-2","date":"2024-06-01","time":"17:00","title":"Visit to Society Park","description":"","reminderType":"timed-location","locationId":"loc-4","maxTime":60}
    ]"#).unwrap();

    let state = AppState::load(storage, date("2024-06-01"));
    assert_eq!(state.reminders().len(), 2);
    assert!(state.reminder(&ReminderId::from("reminder-1")).unwrap().kind().is_standard());
    assert_eq!(state.reminder(&ReminderId::from("reminder-2")).unwrap().kind().max_time(), Some(60));

    // The migrated collection has been written back with explicit types
    let written = state.storage().get(config::REMINDERS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value[0]["reminderType"], "standard");

    let _ = std::fs::remove_dir_all(&folder);
}

#[test]
fn state_survives_a_restart() {
    let folder = temp_folder();

    let mut state = AppState::load(FolderStorage::new(&folder), date("2024-06-01"));
    let ids = state.save_reminder(ReminderDraft::new(date("2024-06-10"), time("09:15"), "Haircut".to_string()), None);
    state.delete_reminder(&ReminderId::from("reminder-walk"));
    state.delete_reminder(&ReminderId::from("does-not-exist"));
    drop(state);

    let state = AppState::load(FolderStorage::new(&folder), date("2024-06-02"));
    assert_eq!(state.reminder(&ids[0]).unwrap().title(), "Haircut");
    assert!(state.reminder(&ReminderId::from("reminder-walk")).is_none());
    // Seeded data was not regenerated
    assert_eq!(state.reminder(&ReminderId::from("reminder-meds-0")).unwrap().date(), date("2024-06-01"));

    let _ = std::fs::remove_dir_all(&folder);
}

#[test]
fn calendar_month_marks() {
    let mut state = empty_state();
    let today = date("2024-06-10");
    state.save_reminder(ReminderDraft::new(date("2024-06-03"), time("08:00"), "Past".to_string()), None);
    state.save_reminder(ReminderDraft::new(date("2024-06-20"), time("08:00"), "Future".to_string()), None);

    let mut selection = Selection::new(today);
    assert!(selection.select(date("2024-06-03"), today) == false);
    assert!(selection.select(date("2024-06-20"), today));

    let index = state.calendar_index();
    let cells = MonthView::containing(today).cells(&index, today, Some(selection.date()));
    let marked: Vec<(u32, DayClass)> = cells.iter()
        .filter(|c| c.has_reminders)
        .map(|c| (chrono::Datelike::day(&c.date), c.class))
        .collect();
    assert_eq!(marked, vec![(3, DayClass::Past), (20, DayClass::Future)]);

    let day = state.reminders_on(selection.date());
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].title(), "Future");
}
