//! Celestial objects and the satellite bindings between them.
//!
//! An object is one entity type: a [`ObjectKind`] tag, the common
//! [`PhysicalProperties`], and a kind-specific [`KindDetails`] payload.
//! Parent and child links are [`ObjectId`] keys into the owning
//! [`Catalogue`](crate::Catalogue); objects never own each other.

use crate::classification::{HubbleType, LuminosityClass, SpectralType};
use crate::codec::DELIMITER;
use crate::error::{CatalogueError, CatalogueResult};
use crate::kind::{ObjectKind, PayloadShape};

/// Stable key of an object inside a catalogue arena.
///
/// The generation distinguishes a removed object from whatever later reuses
/// its slot, so a stale id never resolves to the wrong object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Physical properties shared by every kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhysicalProperties {
    /// Redshift z, valid range -1..=14
    pub redshift: f64,
    /// Distance from the Solar System in parsecs
    pub distance: f64,
    /// Mass in solar masses
    pub mass: f64,
    /// Rotational velocity in rad/s
    pub rotational_velocity: f64,
}

impl PhysicalProperties {
    /// Create a new set of physical properties
    pub fn new(redshift: f64, distance: f64, mass: f64, rotational_velocity: f64) -> Self {
        Self {
            redshift,
            distance,
            mass,
            rotational_velocity,
        }
    }

    /// Check every value lies in its physical domain.
    pub fn validate(&self) -> Result<(), String> {
        if !(-1.0..=14.0).contains(&self.redshift) {
            return Err(format!("redshift {} outside [-1, 14]", self.redshift));
        }
        if !(self.distance >= 0.0) {
            return Err(format!("distance {} is negative", self.distance));
        }
        if !(self.mass >= 0.0) {
            return Err(format!("mass {} is negative", self.mass));
        }
        if !(self.rotational_velocity >= 0.0) {
            return Err(format!(
                "rotational velocity {} is negative",
                self.rotational_velocity
            ));
        }
        Ok(())
    }
}

/// Galaxy-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GalaxyDetails {
    /// Fraction of the total mass in stars
    pub stellar_mass_fraction: f64,
    pub hubble_type: HubbleType,
}

/// Spectral classification and magnitudes of a luminous stellar object.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StellarDetails {
    pub spectral_type: SpectralType,
    /// Subclass digit, 0..=9
    pub spectral_digit: u8,
    pub luminosity_class: LuminosityClass,
    pub absolute_magnitude: f64,
    pub apparent_magnitude: f64,
}

/// Kind-specific payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindDetails {
    Plain,
    Galaxy(GalaxyDetails),
    Stellar(StellarDetails),
}

impl KindDetails {
    /// Shape of this payload, for matching against [`ObjectKind::payload_shape`].
    pub fn shape(&self) -> PayloadShape {
        match self {
            KindDetails::Plain => PayloadShape::Plain,
            KindDetails::Galaxy(_) => PayloadShape::Galaxy,
            KindDetails::Stellar(_) => PayloadShape::Stellar,
        }
    }

    /// Check the payload values lie in their domains.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            KindDetails::Plain => Ok(()),
            KindDetails::Galaxy(g) => {
                if !(0.0..=1.0).contains(&g.stellar_mass_fraction) {
                    return Err(format!(
                        "stellar mass fraction {} outside [0, 1]",
                        g.stellar_mass_fraction
                    ));
                }
                Ok(())
            }
            KindDetails::Stellar(s) => {
                if s.spectral_digit > 9 {
                    return Err(format!("spectral digit {} outside 0-9", s.spectral_digit));
                }
                Ok(())
            }
        }
    }
}

/// Orbital parameters of a satellite binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Orbit distance (semi-major axis) in parsecs
    pub distance: f64,
    /// Orbit tilt in degrees, -180..=180
    pub tilt: f64,
    pub eccentricity: f64,
}

impl Orbit {
    /// Create a new orbit
    pub fn new(distance: f64, tilt: f64, eccentricity: f64) -> Self {
        Self {
            distance,
            tilt,
            eccentricity,
        }
    }

    /// Check the orbital parameters lie in their domains.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.distance >= 0.0) {
            return Err(format!("orbit distance {} is negative", self.distance));
        }
        if !(-180.0..=180.0).contains(&self.tilt) {
            return Err(format!("orbit tilt {} outside [-180, 180]", self.tilt));
        }
        if !(self.eccentricity >= 0.0) {
            return Err(format!("orbit eccentricity {} is negative", self.eccentricity));
        }
        Ok(())
    }
}

impl Default for Orbit {
    /// Unit distance, no tilt, eccentricity 1.
    fn default() -> Self {
        Self {
            distance: 1.0,
            tilt: 0.0,
            eccentricity: 1.0,
        }
    }
}

/// Directed parent-to-child binding carrying orbital data.
///
/// Holds the child's id only; the child itself stays owned by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Satellite {
    object: ObjectId,
    orbit: Orbit,
}

impl Satellite {
    pub(crate) fn new(object: ObjectId, orbit: Orbit) -> Self {
        Self { object, orbit }
    }

    /// Id of the bound child object
    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn orbit(&self) -> Orbit {
        self.orbit
    }

    pub fn orbit_distance(&self) -> f64 {
        self.orbit.distance
    }

    pub fn orbit_tilt(&self) -> f64 {
        self.orbit.tilt
    }

    pub fn orbit_eccentricity(&self) -> f64 {
        self.orbit.eccentricity
    }
}

/// Check a name can be written to and read back from a record line.
///
/// Names must be non-empty, free of surrounding whitespace, and contain
/// neither the record delimiter nor a line break.
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("empty object name".to_string());
    }
    if name.trim() != name {
        return Err(format!(
            "object name '{name}' has leading or trailing whitespace"
        ));
    }
    if name.contains([DELIMITER, '\n', '\r']) {
        return Err(format!(
            "object name '{}' contains '{DELIMITER}' or a line break",
            name.escape_debug()
        ));
    }
    Ok(())
}

/// A catalogued astronomical object.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialObject {
    name: String,
    kind: ObjectKind,
    properties: PhysicalProperties,
    details: KindDetails,
    parent: Option<ObjectId>,
    members: Vec<Satellite>,
}

impl CelestialObject {
    /// Create an unparented object.
    ///
    /// # Errors
    /// Returns [`CatalogueError::InvalidKind`] if `kind` is `Unassigned` or the
    /// payload shape does not belong to `kind`, and
    /// [`CatalogueError::InvalidAttribute`] if the name or any value fails
    /// [`validate_name`], [`PhysicalProperties::validate`] or
    /// [`KindDetails::validate`].
    pub fn new(
        name: impl Into<String>,
        kind: ObjectKind,
        properties: PhysicalProperties,
        details: KindDetails,
    ) -> CatalogueResult<Self> {
        match kind.payload_shape() {
            None => {
                return Err(CatalogueError::InvalidKind(format!(
                    "cannot create an object of kind {kind}"
                )))
            }
            Some(shape) if shape != details.shape() => {
                return Err(CatalogueError::InvalidKind(format!(
                    "{kind} expects a {shape:?} payload, got {:?}",
                    details.shape()
                )))
            }
            Some(_) => {}
        }

        let name = name.into();
        validate_name(&name).map_err(CatalogueError::InvalidAttribute)?;
        properties
            .validate()
            .map_err(CatalogueError::InvalidAttribute)?;
        details.validate().map_err(CatalogueError::InvalidAttribute)?;

        Ok(Self {
            name,
            kind,
            properties,
            details,
            parent: None,
            members: Vec::new(),
        })
    }

    /// Create a galaxy
    pub fn galaxy(
        name: impl Into<String>,
        properties: PhysicalProperties,
        details: GalaxyDetails,
    ) -> CatalogueResult<Self> {
        Self::new(name, ObjectKind::Galaxy, properties, KindDetails::Galaxy(details))
    }

    /// Create an object of one of the stellar kinds.
    pub fn stellar(
        name: impl Into<String>,
        kind: ObjectKind,
        properties: PhysicalProperties,
        details: StellarDetails,
    ) -> CatalogueResult<Self> {
        Self::new(name, kind, properties, KindDetails::Stellar(details))
    }

    /// Create an object of a kind without additional fields (planets, moons, ...).
    pub fn plain(
        name: impl Into<String>,
        kind: ObjectKind,
        properties: PhysicalProperties,
    ) -> CatalogueResult<Self> {
        Self::new(name, kind, properties, KindDetails::Plain)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn properties(&self) -> &PhysicalProperties {
        &self.properties
    }

    pub fn details(&self) -> &KindDetails {
        &self.details
    }

    pub fn redshift(&self) -> f64 {
        self.properties.redshift
    }

    pub fn distance(&self) -> f64 {
        self.properties.distance
    }

    pub fn mass(&self) -> f64 {
        self.properties.mass
    }

    pub fn rotational_velocity(&self) -> f64 {
        self.properties.rotational_velocity
    }

    /// Id of the logical parent, if any
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Number of satellites bound to this object
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Satellite at `index`.
    ///
    /// # Errors
    /// Returns [`CatalogueError::IndexOutOfRange`] if `index >= member_count()`.
    pub fn get_member(&self, index: usize) -> CatalogueResult<&Satellite> {
        self.members
            .get(index)
            .ok_or(CatalogueError::IndexOutOfRange {
                index,
                len: self.members.len(),
            })
    }

    /// All satellites in binding order
    pub fn get_all_members(&self) -> &[Satellite] {
        &self.members
    }

    /// Human-readable kind-specific properties.
    pub fn get_additional_properties(&self) -> String {
        match &self.details {
            KindDetails::Plain => "No additional properties.".to_string(),
            KindDetails::Galaxy(g) => format!(
                "Hubble Type: {}\nStellar Mass Fraction: {}",
                g.hubble_type, g.stellar_mass_fraction
            ),
            KindDetails::Stellar(s) => format!(
                "Stellar Classification: {}{}{}\nMagnitudes: {} (absolute), {} (apparent)",
                s.spectral_type,
                s.spectral_digit,
                s.luminosity_class,
                s.absolute_magnitude,
                s.apparent_magnitude
            ),
        }
    }

    /// Copy of this object with no parent and no satellites, ready to be
    /// added to another catalogue.
    pub fn to_unlinked(&self) -> Self {
        Self {
            parent: None,
            members: Vec::new(),
            ..self.clone()
        }
    }

    /// True if the object has a parent or any satellites.
    pub fn is_linked(&self) -> bool {
        self.parent.is_some() || !self.members.is_empty()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<ObjectId>) {
        self.parent = parent;
    }

    pub(crate) fn push_member(&mut self, satellite: Satellite) {
        self.members.push(satellite);
    }

    /// Drop the binding to `child`, returning it if present.
    pub(crate) fn take_member(&mut self, child: ObjectId) -> Option<Satellite> {
        let position = self.members.iter().position(|s| s.object == child)?;
        Some(self.members.remove(position))
    }

    /// Clear all links, used when the object leaves its catalogue.
    pub(crate) fn unlink(&mut self) -> Vec<Satellite> {
        self.parent = None;
        std::mem::take(&mut self.members)
    }
}
