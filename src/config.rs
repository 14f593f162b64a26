//! Support for library configuration options

use std::sync::{Arc, Mutex};

use chrono::NaiveTime;
use once_cell::sync::Lazy;
use url::Url;

/// The reverse-geocoding endpoint used by [`NominatimGeocoder::default`](crate::geocoding::NominatimGeocoder).
/// Feel free to override it when initing this library.
pub static GEOCODING_URL: Lazy<Arc<Mutex<Url>>> = Lazy::new(|| {
    let url = Url::parse("https://nominatim.openstreetmap.org/reverse")
        .unwrap(/* this is a valid constant URL */);
    Arc::new(Mutex::new(url))
});

/// The `User-Agent` sent to the geocoding service (Nominatim rejects anonymous requests).
/// Feel free to override it when initing this library.
pub static USER_AGENT: Lazy<Arc<Mutex<String>>> = Lazy::new(|| Arc::new(Mutex::new(format!("ManoMitra/{}", env!("CARGO_PKG_VERSION")))));


/// Storage key of the reminders collection
pub const REMINDERS_KEY: &str = "manoMitraReminders";
/// Storage key of the caregivers collection
pub const CAREGIVERS_KEY: &str = "manoMitraCaregivers";
/// Storage key of the locations collection
pub const LOCATIONS_KEY: &str = "manoMitraLocations";
/// Storage key of the primary caregiver id. This is a bare string, not JSON
pub const PRIMARY_CAREGIVER_KEY: &str = "manoMitraPrimaryCaregiver";

/// How many days a new recurring reminder spans, unless told otherwise
pub const DEFAULT_RECURRENCE_DAYS: i64 = 7;
/// The longest span a recurring reminder can be created for, in days
pub const MAX_RECURRENCE_DAYS: i64 = 365;
/// Default dwell time of a timed-location reminder, in minutes
pub const DEFAULT_MAX_TIME_MINUTES: u32 = 60;

/// The time a new reminder is prefilled with
pub fn default_reminder_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap(/* valid constant time */)
}

/// Where maps are centered when no "Home" location exists (New Delhi)
pub const FALLBACK_MAP_CENTER: (f64, f64) = (28.6139, 77.2090);

/// Displayed while a reverse-geocoding lookup is pending
pub const ADDRESS_PENDING: &str = "Finding address...";
/// Used when the geocoding service answered, but without an address
pub const ADDRESS_NOT_FOUND: &str = "Could not find address";
/// Used when the geocoding lookup failed
pub const ADDRESS_LOOKUP_FAILED: &str = "Could not find address. Please enter manually.";
