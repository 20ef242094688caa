//! Closed set of celestial object kinds and their subtype relationships.
//!
//! Every object in a catalogue carries one [`ObjectKind`]. Kinds form a small
//! fixed hierarchy used by selection queries: querying `Star` also returns
//! main sequence stars, red giants and the stellar remnants that still carry a
//! spectral classification, querying `Planet` returns every planet subtype,
//! and `Unassigned` matches everything.

use std::str::FromStr;

use strum::IntoEnumIterator;

/// Object kind tag.
///
/// The record token of each kind is its variant name (see [`ObjectKind::token`]).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
pub enum ObjectKind {
    /// Query-only kind matching every object. Objects cannot be created with it.
    Unassigned,
    Galaxy,
    Star,
    MainSequenceStar,
    RedGiantStar,
    Planet,
    TerrestrialPlanet,
    GaseousPlanet,
    DwarfPlanet,
    Moon,
    Comet,
    Asteroid,
    /// Artificial satellite.
    Satellite,
    StellarRemnant,
    Supernova,
    NeutronStar,
    Pulsar,
    BlackHole,
}

/// Shape of the kind-specific payload an object of a given kind carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// No fields beyond the common physical properties.
    Plain,
    /// Stellar mass fraction and Hubble type.
    Galaxy,
    /// Spectral classification and magnitudes.
    Stellar,
}

impl ObjectKind {
    /// Token used for this kind in object records.
    pub fn token(self) -> &'static str {
        self.into()
    }

    /// Resolve a record token against the closed kind table.
    ///
    /// Accepts the legacy spaced spelling `Dwarf Planet` as well.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "Dwarf Planet" {
            return Some(ObjectKind::DwarfPlanet);
        }
        ObjectKind::iter().find(|kind| kind.token() == token)
    }

    /// Payload shape carried by objects of this kind, or `None` for
    /// [`ObjectKind::Unassigned`] which cannot be instantiated.
    pub fn payload_shape(self) -> Option<PayloadShape> {
        use ObjectKind::*;
        match self {
            Unassigned => None,
            Galaxy => Some(PayloadShape::Galaxy),
            Star | MainSequenceStar | RedGiantStar | StellarRemnant | Supernova | NeutronStar
            | Pulsar => Some(PayloadShape::Stellar),
            Planet | TerrestrialPlanet | GaseousPlanet | DwarfPlanet | Moon | Comet | Asteroid
            | Satellite | BlackHole => Some(PayloadShape::Plain),
        }
    }

    /// Whether an object of kind `self` is selected by a query for `query`.
    ///
    /// Supernovae carry a stellar payload but are absent from the
    /// `Star` and `StellarRemnant` groups, so they only match themselves.
    pub fn matches_query(self, query: ObjectKind) -> bool {
        use ObjectKind::*;
        match query {
            Unassigned => true,
            Star => matches!(
                self,
                Star | MainSequenceStar | RedGiantStar | StellarRemnant | NeutronStar | Pulsar
            ),
            StellarRemnant => matches!(self, StellarRemnant | NeutronStar | Pulsar),
            NeutronStar => matches!(self, NeutronStar | Pulsar),
            Planet => matches!(self, Planet | TerrestrialPlanet | GaseousPlanet | DwarfPlanet),
            other => self == other,
        }
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectKind::from_token(s).ok_or_else(|| format!("Unknown object kind: {s}"))
    }
}
