//! This crate provides the data model of a caregiving companion app for memory-impaired users.
//!
//! The central piece is the [`Reminder`] and its store, in the [`reminders`] module, that handles creation, edition and recurrence expansion. \
//! The [`calendar`] module buckets reminders by date to drive month and day views.
//!
//! Caregivers and locations are simpler entities, kept in a generic [`Collection`](collection::Collection). \
//! Everything is owned by an [`AppState`](state::AppState), that persists each collection to a [`Storage`](traits::Storage) on every change.

pub mod traits;
pub mod config;

mod reminder;
pub use reminder::{Reminder, ReminderId, ReminderKind, ReminderDraft, ReminderIdGenerator, Recurrence};
mod caregiver;
pub use caregiver::{Caregiver, CaregiverId};
mod location;
pub use location::{Location, LocationId, LocationDraft};

pub mod collection;
pub mod reminders;
pub mod calendar;
pub mod assistance;
pub mod form;
pub mod geocoding;
pub mod storage;
pub mod seed;
pub mod state;
pub use state::AppState;

pub mod utils;
