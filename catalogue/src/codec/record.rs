//! Line formats for object and relationship records.
//!
//! Object record:
//! ```text
//! <Kind>:<Name>:<Redshift>:<Distance>:<Mass>:<RotationalVelocity>[:<kind fields>]
//! ```
//! Galaxies append `:<StellarMassFraction>:<HubbleType>`, stellar kinds append
//! `:<SpectralType>:<SpectralDigit>:<LuminosityClass>:<AbsMag>:<AppMag>`.
//!
//! Relationship record:
//! ```text
//! <ParentName>:<ChildName>:<OrbitDistance>:<OrbitTilt>:<OrbitEccentricity>
//! ```
//!
//! Fields are not escaped, so names must not contain the delimiter. Names are
//! trimmed on decode, matching the kind token.

use std::str::FromStr;

use crate::classification::{HubbleType, LuminosityClass, SpectralType};
use crate::error::{CatalogueError, CatalogueResult};
use crate::kind::{ObjectKind, PayloadShape};
use crate::object::{
    CelestialObject, GalaxyDetails, KindDetails, Orbit, PhysicalProperties, StellarDetails,
};

/// Field delimiter shared by both record formats.
pub const DELIMITER: char = ':';

const BASE_FIELDS: usize = 6;
const GALAXY_FIELDS: usize = BASE_FIELDS + 2;
const STELLAR_FIELDS: usize = BASE_FIELDS + 5;
const RELATIONSHIP_FIELDS: usize = 5;

/// Encode one object as a record line (without trailing newline).
pub fn object_record(object: &CelestialObject) -> String {
    let p = object.properties();
    let mut line = format!(
        "{}:{}:{}:{}:{}:{}",
        object.kind().token(),
        object.name(),
        p.redshift,
        p.distance,
        p.mass,
        p.rotational_velocity
    );

    match object.details() {
        KindDetails::Plain => {}
        KindDetails::Galaxy(g) => {
            line.push_str(&format!(
                ":{}:{}",
                g.stellar_mass_fraction,
                g.hubble_type.token()
            ));
        }
        KindDetails::Stellar(s) => {
            line.push_str(&format!(
                ":{}:{}:{}:{}:{}",
                s.spectral_type.token(),
                s.spectral_digit,
                s.luminosity_class.token(),
                s.absolute_magnitude,
                s.apparent_magnitude
            ));
        }
    }
    line
}

/// Encode one parent/child binding as a relationship line.
pub fn relationship_record(parent: &str, child: &str, orbit: &Orbit) -> String {
    format!(
        "{parent}:{child}:{}:{}:{}",
        orbit.distance, orbit.tilt, orbit.eccentricity
    )
}

/// Decoded relationship line.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipRecord {
    pub parent: String,
    pub child: String,
    pub orbit: Orbit,
}

fn malformed(message: impl Into<String>) -> CatalogueError {
    CatalogueError::MalformedRecord(message.into())
}

fn parse_field<T>(field: &str, what: &str) -> CatalogueResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    field
        .trim()
        .parse::<T>()
        .map_err(|e| malformed(format!("invalid {what} '{field}': {e}")))
}

fn split_line(line: &str) -> Vec<&str> {
    line.trim_end_matches(['\r', '\n']).split(DELIMITER).collect()
}

/// Decode an object record into an unparented object.
///
/// # Errors
/// Returns [`CatalogueError::MalformedRecord`] for an unknown kind token, a wrong
/// field count, an unparsable value, or a value outside its physical domain.
pub fn parse_object_record(line: &str) -> CatalogueResult<CelestialObject> {
    let fields = split_line(line);

    let kind = ObjectKind::from_token(fields[0])
        .ok_or_else(|| malformed(format!("unknown object kind '{}'", fields[0])))?;
    let shape = kind
        .payload_shape()
        .ok_or_else(|| malformed(format!("cannot create an object of kind {kind}")))?;

    let expected = match shape {
        PayloadShape::Plain => BASE_FIELDS,
        PayloadShape::Galaxy => GALAXY_FIELDS,
        PayloadShape::Stellar => STELLAR_FIELDS,
    };
    if fields.len() != expected {
        return Err(malformed(format!(
            "{kind} record needs {expected} fields, found {}",
            fields.len()
        )));
    }

    let name = fields[1].trim();
    if name.is_empty() {
        return Err(malformed("empty object name"));
    }

    let properties = PhysicalProperties {
        redshift: parse_field(fields[2], "redshift")?,
        distance: parse_field(fields[3], "distance")?,
        mass: parse_field(fields[4], "mass")?,
        rotational_velocity: parse_field(fields[5], "rotational velocity")?,
    };
    properties.validate().map_err(malformed)?;

    let details = match shape {
        PayloadShape::Plain => KindDetails::Plain,
        PayloadShape::Galaxy => KindDetails::Galaxy(GalaxyDetails {
            stellar_mass_fraction: parse_field(fields[6], "stellar mass fraction")?,
            hubble_type: parse_field::<HubbleType>(fields[7], "Hubble type")?,
        }),
        PayloadShape::Stellar => KindDetails::Stellar(StellarDetails {
            spectral_type: parse_field::<SpectralType>(fields[6], "spectral type")?,
            spectral_digit: parse_field(fields[7], "spectral digit")?,
            luminosity_class: parse_field::<LuminosityClass>(fields[8], "luminosity class")?,
            absolute_magnitude: parse_field(fields[9], "absolute magnitude")?,
            apparent_magnitude: parse_field(fields[10], "apparent magnitude")?,
        }),
    };
    details.validate().map_err(malformed)?;

    CelestialObject::new(name, kind, properties, details).map_err(|e| match e {
        CatalogueError::InvalidAttribute(message) => malformed(message),
        other => other,
    })
}

/// Decode a relationship record.
pub fn parse_relationship_record(line: &str) -> CatalogueResult<RelationshipRecord> {
    let fields = split_line(line);
    if fields.len() != RELATIONSHIP_FIELDS {
        return Err(malformed(format!(
            "relationship record needs {RELATIONSHIP_FIELDS} fields, found {}",
            fields.len()
        )));
    }

    let orbit = Orbit {
        distance: parse_field(fields[2], "orbit distance")?,
        tilt: parse_field(fields[3], "orbit tilt")?,
        eccentricity: parse_field(fields[4], "orbit eccentricity")?,
    };
    orbit.validate().map_err(malformed)?;

    Ok(RelationshipRecord {
        parent: fields[0].trim().to_string(),
        child: fields[1].trim().to_string(),
        orbit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_encode_galaxy() {
        let galaxy = CelestialObject::galaxy(
            "G1",
            PhysicalProperties::new(0.0, 0.0, 1e12, 0.001),
            GalaxyDetails {
                stellar_mass_fraction: 0.05,
                hubble_type: HubbleType::Sc,
            },
        )
        .unwrap();
        assert_eq!(object_record(&galaxy), "Galaxy:G1:0:0:1000000000000:0.001:0.05:Sc");
    }

    #[test]
    fn test_decode_stellar() {
        let object =
            parse_object_record("Pulsar:PSR B1919+21:0:700:1.4:8.4:O:5:Ia+:-2.5:12.25\r\n")
                .unwrap();
        assert_eq!(object.kind(), ObjectKind::Pulsar);
        assert_eq!(object.name(), "PSR B1919+21");
        assert_relative_eq!(object.rotational_velocity(), 8.4);
        match object.details() {
            KindDetails::Stellar(s) => {
                assert_eq!(s.spectral_type, SpectralType::O);
                assert_eq!(s.spectral_digit, 5);
                assert_eq!(s.luminosity_class, LuminosityClass::IaPlus);
                assert_relative_eq!(s.apparent_magnitude, 12.25);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_decode_legacy_dwarf_planet_token() {
        let object = parse_object_record("Dwarf Planet:Pluto:0:0.0002:6.5e-9:0").unwrap();
        assert_eq!(object.kind(), ObjectKind::DwarfPlanet);
        assert_eq!(object_record(&object), "DwarfPlanet:Pluto:0:0.0002:0.0000000065:0");
    }

    #[test]
    fn test_rejects_malformed_objects() {
        let bad = [
            "Quasar:Q1:1:1:1:1",
            "Unassigned:U1:0:0:0:0",
            "Planet:P1:0:0:1",
            "Planet:P1:0:0:1:0:extra",
            "Planet:P1:zero:0:1:0",
            "Planet:P1:20:0:1:0",
            "Planet::0:0:1:0",
            "Planet:   :0:0:1:0",
            "Galaxy:G1:0:0:1:0:0.1:Sz",
            "Star:S1:0:0:1:0:G:2:V:4.8",
            "Star:S1:0:0:1:0:G:12:V:4.8:1.0",
            "",
        ];
        for line in bad {
            assert!(
                matches!(
                    parse_object_record(line),
                    Err(CatalogueError::MalformedRecord(_))
                ),
                "line '{line}' should be rejected"
            );
        }
    }

    #[test]
    fn test_names_are_trimmed() {
        let object = parse_object_record("Planet: Earth :0:0:0.000003:0").unwrap();
        assert_eq!(object.name(), "Earth");
        assert_eq!(object_record(&object), "Planet:Earth:0:0:0.000003:0");

        let record = parse_relationship_record(" Sun :Earth:1:0:0").unwrap();
        assert_eq!(record.parent, "Sun");
        assert_eq!(record.child, "Earth");
    }

    #[test]
    fn test_relationship_lines() {
        let orbit = Orbit::new(1.0, 4.3, 0.43);
        let line = relationship_record("G1", "P1", &orbit);
        assert_eq!(line, "G1:P1:1:4.3:0.43");

        let record = parse_relationship_record(&line).unwrap();
        assert_eq!(record.parent, "G1");
        assert_eq!(record.child, "P1");
        assert_eq!(record.orbit, orbit);

        assert!(parse_relationship_record("G1:P1:1:4.3").is_err());
        assert!(parse_relationship_record("G1:P1:1:270:0.1").is_err());
    }
}
