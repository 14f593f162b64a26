//! The state owner of the app
//!
//! Presentation layers never touch the collections directly: every change goes through an [`AppState`], that writes the affected collections back to its [`Storage`] right away.

use std::error::Error;

use chrono::{NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::calendar::CalendarIndex;
use crate::calendar::day_view::DaySchedule;
use crate::collection::{Collection, Upserted};
use crate::config::{CAREGIVERS_KEY, LOCATIONS_KEY, PRIMARY_CAREGIVER_KEY, REMINDERS_KEY, FALLBACK_MAP_CENTER};
use crate::reminders::ReminderStore;
use crate::seed;
use crate::traits::Storage;
use crate::{Caregiver, CaregiverId};
use crate::{Location, LocationDraft, LocationId};
use crate::{Reminder, ReminderDraft, ReminderId, Recurrence};


/// Every reminder, caregiver and location of the app, and the storage they are persisted to
#[derive(Debug)]
pub struct AppState<S: Storage> {
    storage: S,

    reminders: ReminderStore,
    caregivers: Collection<Caregiver>,
    locations: Collection<Location>,
    primary_caregiver: Option<CaregiverId>,
}

impl<S: Storage> AppState<S> {
    /// Load everything from `storage`.
    ///
    /// Each collection is loaded on its own. A collection that has never been saved, or that cannot be read back, is replaced by the built-in dataset (relative to `today`). \
    /// Whatever has been loaded is then written back, so that the storage always mirrors this state.
    pub fn load(storage: S, today: NaiveDate) -> Self {
        let reminders = load_collection(&storage, REMINDERS_KEY, || seed::reminders(today));
        let caregivers = load_collection(&storage, CAREGIVERS_KEY, seed::caregivers);
        let locations = load_collection(&storage, LOCATIONS_KEY, seed::locations);

        let primary_caregiver = match storage.get(PRIMARY_CAREGIVER_KEY) {
            Ok(Some(id)) if id.is_empty() == false => Some(CaregiverId::from(id)),
            Ok(_) => None,
            Err(err) => {
                log::warn!("Unable to read the primary caregiver: {}", err);
                None
            },
        };

        log::info!("Loaded {} reminders, {} caregivers and {} locations", reminders.len(), caregivers.len(), locations.len());

        let mut state = Self {
            storage,
            reminders: ReminderStore::from_reminders(reminders),
            caregivers,
            locations,
            primary_caregiver,
        };
        state.recompute_primary_caregiver();
        state.save_all();
        state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to load it again later
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Write every collection to the storage
    pub fn save_all(&mut self) {
        persist(&mut self.storage, REMINDERS_KEY, self.reminders.all());
        persist(&mut self.storage, CAREGIVERS_KEY, &self.caregivers);
        persist(&mut self.storage, LOCATIONS_KEY, &self.locations);
        persist_primary(&mut self.storage, self.primary_caregiver.as_ref());
    }


    // Reminders

    pub fn reminders(&self) -> &ReminderStore {
        &self.reminders
    }

    pub fn reminder(&self, id: &ReminderId) -> Option<&Reminder> {
        self.reminders.get(id)
    }

    /// See [`ReminderStore::upsert`]
    pub fn save_reminder(&mut self, draft: ReminderDraft, recurrence: Option<Recurrence>) -> Vec<ReminderId> {
        let ids = self.reminders.upsert(draft, recurrence);
        persist(&mut self.storage, REMINDERS_KEY, self.reminders.all());
        ids
    }

    /// Deleting an unknown reminder is not an error
    pub fn delete_reminder(&mut self, id: &ReminderId) -> bool {
        let removed = self.reminders.remove(id);
        persist(&mut self.storage, REMINDERS_KEY, self.reminders.all());
        removed
    }

    /// The reminders of a day, earliest first
    pub fn reminders_on(&self, date: NaiveDate) -> Vec<&Reminder> {
        self.reminders.query(date)
    }

    pub fn calendar_index(&self) -> CalendarIndex {
        CalendarIndex::build(self.reminders.all())
    }

    /// The reminders of a day, laid out in hourly slots
    pub fn day_schedule(&self, date: NaiveDate, now: NaiveDateTime) -> DaySchedule<'_> {
        DaySchedule::build(date, &self.reminders.query(date), now)
    }


    // Caregivers

    pub fn caregivers(&self) -> &Collection<Caregiver> {
        &self.caregivers
    }

    /// Add or update a caregiver.
    ///
    /// If there is no primary caregiver at this point, the first caregiver becomes the primary one
    pub fn save_caregiver(&mut self, caregiver: Caregiver) -> Upserted {
        let outcome = self.caregivers.upsert(caregiver);
        self.recompute_primary_caregiver();
        persist(&mut self.storage, CAREGIVERS_KEY, &self.caregivers);
        persist_primary(&mut self.storage, self.primary_caregiver.as_ref());
        outcome
    }

    /// Remove a caregiver.
    ///
    /// Removing the primary caregiver leaves the app without primary caregiver: no one else is promoted until the next load or addition
    pub fn delete_caregiver(&mut self, id: &CaregiverId) -> bool {
        let removed = self.caregivers.remove(id);
        if self.primary_caregiver.as_ref() == Some(id) {
            log::info!("Primary caregiver {} has been removed", id);
            self.primary_caregiver = None;
        }
        persist(&mut self.storage, CAREGIVERS_KEY, &self.caregivers);
        persist_primary(&mut self.storage, self.primary_caregiver.as_ref());
        removed
    }

    pub fn set_primary_caregiver(&mut self, id: &CaregiverId) -> Result<(), Box<dyn Error>> {
        if self.caregivers.contains(id) == false {
            return Err(format!("No caregiver with id {}", id).into());
        }
        self.primary_caregiver = Some(id.clone());
        persist_primary(&mut self.storage, self.primary_caregiver.as_ref());
        Ok(())
    }

    pub fn primary_caregiver_id(&self) -> Option<&CaregiverId> {
        self.primary_caregiver.as_ref()
    }

    /// `None` as well when the primary id points to a caregiver that does not exist (anymore)
    pub fn primary_caregiver(&self) -> Option<&Caregiver> {
        self.primary_caregiver.as_ref().and_then(|id| self.caregivers.get(id))
    }

    fn recompute_primary_caregiver(&mut self) {
        if self.caregivers.is_empty() {
            self.primary_caregiver = None;
        } else if self.primary_caregiver.is_none() {
            self.primary_caregiver = self.caregivers.first().map(|c| c.id().clone());
        }
    }


    // Locations

    pub fn locations(&self) -> &Collection<Location> {
        &self.locations
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    /// Add a location, or update the location with the id of the draft.
    ///
    /// Returns the id of the saved location, or `None` if the draft refers to a location that does not exist
    pub fn save_location(&mut self, draft: LocationDraft) -> Option<LocationId> {
        let saved = match draft.id.clone() {
            Some(id) => match self.locations.get_mut(&id) {
                Some(existing) => {
                    existing.merge(draft);
                    Some(id)
                },
                None => {
                    log::warn!("Cannot update unknown location {}", id);
                    None
                },
            },
            None => {
                let id = LocationId::random();
                self.locations.upsert(draft.into_location(id.clone()));
                Some(id)
            },
        };
        persist(&mut self.storage, LOCATIONS_KEY, &self.locations);
        saved
    }

    /// Remove a location. Reminders that point to it are left untouched
    pub fn delete_location(&mut self, id: &LocationId) -> bool {
        let removed = self.locations.remove(id);
        persist(&mut self.storage, LOCATIONS_KEY, &self.locations);
        removed
    }

    /// The location named "Home", if any
    pub fn home_location(&self) -> Option<&Location> {
        self.locations.iter().find(|l| l.is_home())
    }

    /// Where maps should be centered: home, or a default place
    pub fn map_center(&self) -> (f64, f64) {
        self.home_location()
            .map(|home| home.coords())
            .unwrap_or(FALLBACK_MAP_CENTER)
    }
}


fn load_collection<S, T, F>(storage: &S, key: &str, seed: F) -> T
where
    S: Storage,
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match storage.get(key) {
        Ok(Some(json)) if json.is_empty() == false => match serde_json::from_str(&json) {
            Ok(data) => data,
            Err(err) => {
                log::error!("Failed to parse {} from storage: {}. Using the built-in dataset", key, err);
                seed()
            },
        },
        Ok(_) => {
            log::info!("Nothing saved for {} yet. Using the built-in dataset", key);
            seed()
        },
        Err(err) => {
            log::error!("Unable to read {} from storage: {}. Using the built-in dataset", key, err);
            seed()
        },
    }
}

/// Overwrite `key` with the whole collection. Failures are only logged: the in-memory state remains valid anyway
fn persist<S, T>(storage: &mut S, key: &str, data: &T)
where
    S: Storage,
    T: Serialize + ?Sized,
{
    let json = match serde_json::to_string(data) {
        Err(err) => {
            log::warn!("Unable to serialize {}: {}", key, err);
            return;
        },
        Ok(json) => json,
    };

    if let Err(err) = storage.set(key, &json) {
        log::warn!("Unable to save {}: {}", key, err);
    }
}

/// The primary caregiver is stored as a bare id, and removed altogether when there is none
fn persist_primary<S: Storage>(storage: &mut S, primary: Option<&CaregiverId>) {
    let result = match primary {
        Some(id) => storage.set(PRIMARY_CAREGIVER_KEY, id.as_str()),
        None => storage.remove(PRIMARY_CAREGIVER_KEY),
    };
    if let Err(err) = result {
        log::warn!("Unable to save the primary caregiver: {}", err);
    }
}
