//! Edition forms, that gather user input into drafts
//!
//! Stores never validate what they are given. Instead, forms refuse to produce a draft (i.e. the "save" button is disabled) until every required field is filled.

use bitflags::bitflags;
use chrono::{NaiveDate, NaiveTime};

use crate::collection::Collection;
use crate::config;
use crate::geocoding::resolve_address;
use crate::traits::Geocoder;
use crate::{Caregiver, CaregiverId};
use crate::{Location, LocationDraft, LocationId};
use crate::{Reminder, ReminderDraft, ReminderId, ReminderKind, Recurrence};


bitflags! {
    /// The reasons why a reminder cannot be saved yet
    pub struct SaveBlockers: u8 {
        /// Every reminder needs a title
        const MISSING_TITLE = 1;
        /// A timed-location reminder needs a location
        const MISSING_LOCATION = 2;
        /// A timed-location reminder needs a max time that is a positive number of minutes
        const INVALID_MAX_TIME = 4;
        /// A recurring reminder cannot span more than a year
        const RECURRENCE_TOO_LONG = 8;
    }
}


/// The reminder type picked in the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindChoice {
    Standard,
    TimedLocation,
}


/// The content of the "add/edit reminder" dialog.
///
/// Text fields hold what the user typed, they are only parsed on save.
#[derive(Clone, Debug, PartialEq)]
pub struct ReminderForm {
    editing: Option<ReminderId>,

    pub title: String,
    pub description: String,
    pub time: NaiveTime,
    pub kind: KindChoice,

    // Timed-location fields. An empty location id means "no location chosen"
    pub location_id: String,
    pub max_time: String,

    // Only for new standard reminders
    pub recurring: bool,
    pub recurrence_days: String,
}

impl ReminderForm {
    /// A blank form, to create a reminder at `time` (or at the default time)
    pub fn new(time: Option<NaiveTime>) -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            time: time.unwrap_or_else(config::default_reminder_time),
            kind: KindChoice::Standard,
            location_id: String::new(),
            max_time: config::DEFAULT_MAX_TIME_MINUTES.to_string(),
            recurring: false,
            recurrence_days: config::DEFAULT_RECURRENCE_DAYS.to_string(),
        }
    }

    /// A form prefilled with an existing reminder
    pub fn edit(reminder: &Reminder) -> Self {
        let mut form = Self::new(Some(reminder.time()));
        form.editing = Some(reminder.id().clone());
        form.title = reminder.title().to_string();
        form.description = reminder.description().to_string();

        if let ReminderKind::TimedLocation{ location_id, max_time } = reminder.kind() {
            form.kind = KindChoice::TimedLocation;
            form.location_id = location_id.to_string();
            form.max_time = max_time.to_string();
        }
        form
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The reminder a "delete" button would remove. New reminders cannot be deleted
    pub fn delete_target(&self) -> Option<&ReminderId> {
        self.editing.as_ref()
    }

    /// Pick the location of a timed-location reminder.
    ///
    /// This also names the reminder after the location (and clears the title when no location is chosen)
    pub fn choose_location(&mut self, location_id: &str, locations: &Collection<Location>) {
        self.location_id = location_id.to_string();
        if location_id.is_empty() {
            self.title.clear();
            return;
        }
        if let Some(location) = locations.get(&LocationId::from(location_id)) {
            self.title = format!("Visit to {}", location.name());
        }
    }

    /// Everything that currently prevents saving. Empty when the form can be saved
    pub fn blockers(&self) -> SaveBlockers {
        let mut blockers = SaveBlockers::empty();
        if self.title.is_empty() {
            blockers.insert(SaveBlockers::MISSING_TITLE);
        }
        if self.kind == KindChoice::TimedLocation {
            if self.location_id.is_empty() {
                blockers.insert(SaveBlockers::MISSING_LOCATION);
            }
            if self.parsed_max_time().is_none() {
                blockers.insert(SaveBlockers::INVALID_MAX_TIME);
            }
        }
        if let Some(days) = self.recurrence_count() {
            if days > config::MAX_RECURRENCE_DAYS {
                blockers.insert(SaveBlockers::RECURRENCE_TOO_LONG);
            }
        }
        blockers
    }

    pub fn is_save_disabled(&self) -> bool {
        self.blockers().is_empty() == false
    }

    /// The number of days a new reminder recurs for, or `None` when it does not recur
    fn recurrence_count(&self) -> Option<i64> {
        match (self.kind, self.is_editing(), self.recurring) {
            // An empty or zero count still means "today only"
            (KindChoice::Standard, false, true) => {
                Some(self.recurrence_days.trim().parse::<i64>().ok().filter(|d| *d != 0).unwrap_or(1))
            },
            _ => None,
        }
    }

    fn parsed_max_time(&self) -> Option<u32> {
        self.max_time.trim().parse::<u32>().ok().filter(|minutes| *minutes > 0)
    }

    /// Turn this form into a draft on `date`, and the recurrence to apply (if any).
    ///
    /// Fails with the blockers when the form cannot be saved yet
    pub fn submit(&self, date: NaiveDate) -> Result<(ReminderDraft, Option<Recurrence>), SaveBlockers> {
        let blockers = self.blockers();
        if blockers.is_empty() == false {
            return Err(blockers);
        }

        let kind = match self.kind {
            KindChoice::Standard => ReminderKind::Standard,
            KindChoice::TimedLocation => ReminderKind::TimedLocation {
                location_id: LocationId::from(self.location_id.as_str()),
                max_time: self.parsed_max_time().unwrap_or(config::DEFAULT_MAX_TIME_MINUTES),
            },
        };

        let draft = ReminderDraft {
            id: self.editing.clone(),
            date,
            time: self.time,
            title: self.title.clone(),
            description: self.description.clone(),
            kind,
        };

        Ok((draft, self.recurrence_count().map(Recurrence::days)))
    }
}


/// The content of the "add/edit caregiver" dialog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaregiverForm {
    editing: Option<CaregiverId>,
    pub name: String,
    pub relation: String,
    pub contact: String,
}

impl CaregiverForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(caregiver: &Caregiver) -> Self {
        Self {
            editing: Some(caregiver.id().clone()),
            name: caregiver.name().to_string(),
            relation: caregiver.relation().to_string(),
            contact: caregiver.contact().to_string(),
        }
    }

    pub fn delete_target(&self) -> Option<&CaregiverId> {
        self.editing.as_ref()
    }

    /// Name, relation and contact are all required
    pub fn is_save_disabled(&self) -> bool {
        self.name.is_empty() || self.relation.is_empty() || self.contact.is_empty()
    }

    /// Returns the caregiver to save. New caregivers are given a fresh id
    pub fn submit(&self) -> Option<Caregiver> {
        if self.is_save_disabled() {
            return None;
        }
        let id = self.editing.clone().unwrap_or_else(CaregiverId::random);
        Some(Caregiver::new(id, self.name.clone(), self.relation.clone(), self.contact.clone()))
    }
}


/// The content of the "add/edit location" dialog
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationForm {
    editing: Option<LocationId>,
    pub name: String,
    pub address: String,
    coords: Option<(f64, f64)>,
    geocoding: bool,
}

impl LocationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(location: &Location) -> Self {
        Self {
            editing: Some(location.id().clone()),
            name: location.name().to_string(),
            address: location.address().to_string(),
            coords: Some(location.coords()),
            geocoding: false,
        }
    }

    pub fn delete_target(&self) -> Option<&LocationId> {
        self.editing.as_ref()
    }

    pub fn coords(&self) -> Option<(f64, f64)> {
        self.coords
    }

    pub fn is_geocoding(&self) -> bool {
        self.geocoding
    }

    /// Record a click on the map, and look up the address of that point
    pub async fn pick_on_map<G>(&mut self, lat: f64, lng: f64, geocoder: &G)
    where
        G: Geocoder + ?Sized,
    {
        self.begin_lookup(lat, lng);
        let address = resolve_address(geocoder, lat, lng).await;
        self.finish_lookup(address);
    }

    pub fn begin_lookup(&mut self, lat: f64, lng: f64) {
        self.coords = Some((lat, lng));
        self.geocoding = true;
        self.address = config::ADDRESS_PENDING.to_string();
    }

    pub fn finish_lookup(&mut self, address: String) {
        self.address = address;
        self.geocoding = false;
    }

    /// Name, address and a point on the map are required, and no address lookup must be pending
    pub fn is_save_disabled(&self) -> bool {
        self.name.is_empty() || self.address.is_empty() || self.coords.is_none() || self.geocoding
    }

    pub fn submit(&self) -> Option<LocationDraft> {
        if self.is_save_disabled() {
            return None;
        }
        let (lat, lng) = self.coords?;
        let mut draft = LocationDraft::new(self.name.clone(), self.address.clone(), lat, lng);
        draft.id = self.editing.clone();
        Some(draft)
    }
}
