//! Shared object builders for integration tests.

#![allow(dead_code)]

use catalogue::{
    Catalogue, CelestialObject, GalaxyDetails, HubbleType, LuminosityClass, ObjectKind,
    PhysicalProperties, SpectralType, StellarDetails,
};

pub fn props(distance: f64, mass: f64) -> PhysicalProperties {
    PhysicalProperties::new(0.0, distance, mass, 0.0)
}

pub fn plain(name: &str, kind: ObjectKind) -> CelestialObject {
    CelestialObject::plain(name, kind, props(1.0, 1.0)).unwrap()
}

pub fn star(name: &str, kind: ObjectKind) -> CelestialObject {
    CelestialObject::stellar(
        name,
        kind,
        props(10.0, 1.0),
        StellarDetails {
            spectral_type: SpectralType::G,
            spectral_digit: 2,
            luminosity_class: LuminosityClass::V,
            absolute_magnitude: 4.83,
            apparent_magnitude: 0.5,
        },
    )
    .unwrap()
}

pub fn galaxy(name: &str) -> CelestialObject {
    CelestialObject::galaxy(
        name,
        PhysicalProperties::new(0.0, 0.0, 1e12, 0.001),
        GalaxyDetails {
            stellar_mass_fraction: 0.05,
            hubble_type: HubbleType::Sc,
        },
    )
    .unwrap()
}

/// Planets named `names`, added in order.
pub fn planets(names: &[&str]) -> Catalogue {
    let mut catalogue = Catalogue::new("Test");
    for name in names {
        catalogue
            .add_object(plain(name, ObjectKind::Planet))
            .unwrap();
    }
    catalogue
}
