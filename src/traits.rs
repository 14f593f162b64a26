use std::error::Error;
use std::fmt::Display;

use async_trait::async_trait;

/// Anything that can be stored in a [`Collection`](crate::collection::Collection)
pub trait Entity: Clone {
    type Id: Clone + PartialEq + Display;

    /// Returns the stable identifier of this entity
    fn id(&self) -> &Self::Id;
}

/// A durable key-value store of string blobs.
///
/// Every collection is stored under its own key, and is overwritten as a whole on every change.
pub trait Storage {
    /// Returns the blob stored at `key`, or `None` if nothing has ever been stored there
    fn get(&self, key: &str) -> Result<Option<String>, Box<dyn Error>>;
    /// Replaces the blob stored at `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn Error>>;
    /// Removes `key` entirely. Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<(), Box<dyn Error>>;
}

/// Turns coordinates into a human-readable address
#[async_trait]
pub trait Geocoder {
    /// Look up the address of a point.
    ///
    /// Callers usually do not want to handle failures themselves, see [`resolve_address`](crate::geocoding::resolve_address)
    async fn reverse(&self, lat: f64, lng: f64) -> Result<String, Box<dyn Error>>;
}
