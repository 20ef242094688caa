//! Human-readable property dumps.

use std::fmt;

use crate::catalogue::Catalogue;
use crate::error::CatalogueResult;
use crate::object::CelestialObject;

const RULE: &str = "----------------------------";

/// Property dump of one object, including a summary of its satellites.
pub struct ObjectReport<'a> {
    catalogue: &'a Catalogue,
    object: &'a CelestialObject,
}

impl fmt::Display for ObjectReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let object = self.object;
        writeln!(f, "Name: {}", object.name())?;
        writeln!(f, "Object Type: {}", object.kind())?;
        writeln!(f, "Mass: {} M_Sun", object.mass())?;
        writeln!(f, "Rotational Velocity: {} rad/s", object.rotational_velocity())?;
        writeln!(f, "Distance from Solar System: {} pc", object.distance())?;
        writeln!(f, "Redshift: {}", object.redshift())?;
        writeln!(f, "{}", object.get_additional_properties())?;

        let members = object.get_all_members();
        if members.is_empty() {
            writeln!(f, "No child objects.")?;
        } else {
            writeln!(f, "Children:")?;
            for satellite in members {
                let Some(child) = self.catalogue.member_object(satellite) else {
                    continue;
                };
                writeln!(
                    f,
                    "- Name: {}, Type: {}, Number of Children: {}",
                    child.name(),
                    child.kind(),
                    child.member_count()
                )?;
                writeln!(
                    f,
                    "  Orbital Distance: {} pc, Orbital Tilt: {} deg, Orbital Eccentricity: {}",
                    satellite.orbit_distance(),
                    satellite.orbit_tilt(),
                    satellite.orbit_eccentricity()
                )?;
            }
        }
        write!(f, "{RULE}")
    }
}

/// Header plus one [`ObjectReport`] per object in current order.
pub struct CatalogueReport<'a> {
    catalogue: &'a Catalogue,
}

impl fmt::Display for CatalogueReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Catalogue: {}", self.catalogue.name())?;
        writeln!(f, "Total number of objects: {}", self.catalogue.len())?;
        writeln!(f, "Object information:")?;
        writeln!(f, "{RULE}")?;
        for object in self.catalogue.objects() {
            writeln!(
                f,
                "{}",
                ObjectReport {
                    catalogue: self.catalogue,
                    object,
                }
            )?;
        }
        Ok(())
    }
}

impl Catalogue {
    /// Lazily formatted report of the object named `name`.
    pub fn object_report(&self, name: &str) -> CatalogueResult<ObjectReport<'_>> {
        Ok(ObjectReport {
            catalogue: self,
            object: self.get_object(name)?,
        })
    }

    /// Lazily formatted report of the whole catalogue.
    pub fn report(&self) -> CatalogueReport<'_> {
        CatalogueReport { catalogue: self }
    }

    /// Full report of every object in current order.
    pub fn generate_report(&self) -> String {
        self.report().to_string()
    }
}
