//! Named places, such as "Home" or "Hospital"

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::Entity;


#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    /// Generate a random LocationId
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self(format!("loc-{}", random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for LocationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// A named place on the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: LocationId,
    name: String,
    address: String,
    lat: f64,
    lng: f64,
}

impl Location {
    pub fn new(id: LocationId, name: String, address: String, lat: f64, lng: f64) -> Self {
        Self { id, name, address, lat, lng }
    }

    pub fn id(&self) -> &LocationId { &self.id      }
    pub fn name(&self) -> &str      { &self.name    }
    pub fn address(&self) -> &str   { &self.address }
    pub fn lat(&self) -> f64        { self.lat      }
    pub fn lng(&self) -> f64        { self.lng      }
    pub fn coords(&self) -> (f64, f64) { (self.lat, self.lng) }

    /// Whether this is the user's home. There is no flag for that, the location just has to be named "Home"
    pub fn is_home(&self) -> bool {
        self.name.to_lowercase() == "home"
    }

    /// Apply the fields of a draft, keeping the current id
    pub(crate) fn merge(&mut self, draft: LocationDraft) {
        self.name = draft.name;
        self.address = draft.address;
        self.lat = draft.lat;
        self.lng = draft.lng;
    }
}

impl Entity for Location {
    type Id = LocationId;

    fn id(&self) -> &LocationId {
        &self.id
    }
}


/// A location that may not have an id yet (i.e. that is being created)
#[derive(Clone, Debug, PartialEq)]
pub struct LocationDraft {
    pub id: Option<LocationId>,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

impl LocationDraft {
    pub fn new(name: String, address: String, lat: f64, lng: f64) -> Self {
        Self { id: None, name, address, lat, lng }
    }

    pub(crate) fn into_location(self, id: LocationId) -> Location {
        Location::new(id, self.name, self.address, self.lat, self.lng)
    }
}
