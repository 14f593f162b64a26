//! Caregivers (people the user can turn to)

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::traits::Entity;


#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaregiverId(String);

impl CaregiverId {
    /// Generate a random CaregiverId
    pub fn random() -> Self {
        let random = Uuid::new_v4().to_hyphenated().to_string();
        Self(format!("cg-{}", random))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for CaregiverId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for CaregiverId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for CaregiverId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// A caregiver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Caregiver {
    id: CaregiverId,
    name: String,
    /// How they relate to the user, e.g. "Daughter" or "Nurse"
    relation: String,
    /// Usually a phone number
    contact: String,
}

impl Caregiver {
    pub fn new(id: CaregiverId, name: String, relation: String, contact: String) -> Self {
        Self { id, name, relation, contact }
    }

    pub fn id(&self) -> &CaregiverId    { &self.id       }
    pub fn name(&self) -> &str          { &self.name     }
    pub fn relation(&self) -> &str      { &self.relation }
    pub fn contact(&self) -> &str       { &self.contact  }
}

impl Entity for Caregiver {
    type Id = CaregiverId;

    fn id(&self) -> &CaregiverId {
        &self.id
    }
}
