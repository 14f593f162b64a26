//! Utilities to compare custom types
//!
//! These can be used to sort results, e.g. by passing them to `sort_by`

use crate::{Caregiver, Location};

/// Compare caregivers alphabetically, ignoring case
pub fn compare_caregivers_alpha(left: &&Caregiver, right: &&Caregiver) -> std::cmp::Ordering {
    Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase())
}

/// Compare locations alphabetically, ignoring case. "Home" always comes first
pub fn compare_locations_alpha(left: &&Location, right: &&Location) -> std::cmp::Ordering {
    right.is_home().cmp(&left.is_home())
        .then_with(|| Ord::cmp(&left.name().to_lowercase(), &right.name().to_lowercase()))
}
