//! Sort keys for ordering a catalogue.

use std::cmp::Ordering;
use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::error::{CatalogueError, CatalogueResult};
use crate::object::CelestialObject;

/// Parameter a catalogue can be asked to sort by.
///
/// `CelestialType`, `HubbleType` and `StellarType` only apply to subsets of a
/// catalogue and are rejected by [`SortKey::comparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum SortKey {
    Name,
    CelestialType,
    HubbleType,
    StellarType,
    Redshift,
    Distance,
    Mass,
    RotationalVelocity,
    MemberCount,
}

/// Ordering between two objects for a supported key.
pub type Comparator = fn(&CelestialObject, &CelestialObject) -> Ordering;

fn by_name(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.name().to_lowercase().cmp(&b.name().to_lowercase())
}

fn by_redshift(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.redshift().total_cmp(&b.redshift())
}

fn by_distance(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.distance().total_cmp(&b.distance())
}

fn by_mass(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.mass().total_cmp(&b.mass())
}

fn by_rotational_velocity(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.rotational_velocity().total_cmp(&b.rotational_velocity())
}

fn by_member_count(a: &CelestialObject, b: &CelestialObject) -> Ordering {
    a.member_count().cmp(&b.member_count())
}

impl SortKey {
    /// Ascending comparator for this key.
    ///
    /// # Errors
    /// Returns [`CatalogueError::UnsupportedSortKey`] for keys that cannot order
    /// a whole catalogue.
    pub fn comparator(self) -> CatalogueResult<Comparator> {
        match self {
            SortKey::Name => Ok(by_name),
            SortKey::Redshift => Ok(by_redshift),
            SortKey::Distance => Ok(by_distance),
            SortKey::Mass => Ok(by_mass),
            SortKey::RotationalVelocity => Ok(by_rotational_velocity),
            SortKey::MemberCount => Ok(by_member_count),
            SortKey::CelestialType | SortKey::HubbleType | SortKey::StellarType => {
                Err(CatalogueError::UnsupportedSortKey(self.to_string()))
            }
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Case-insensitive; underscores and dashes are ignored, so `member_count`,
    /// `member-count` and `MemberCount` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        SortKey::iter()
            .find(|key| key.to_string().to_lowercase() == wanted)
            .ok_or_else(|| format!("Invalid sort key: {s}"))
    }
}
