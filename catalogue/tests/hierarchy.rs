//! Parenting, selection and ordering through the public API.

mod common;

use approx::assert_relative_eq;
use catalogue::{
    Catalogue, CatalogueError, CelestialObject, ObjectKind, Orbit, PhysicalProperties, SortKey,
};
use common::{galaxy, plain, planets, star};
use rstest::rstest;

#[test]
fn test_two_object_cycle_rejected() {
    let mut catalogue = planets(&["A", "B"]);
    catalogue.add_member("A", "B").unwrap();

    let err = catalogue.add_member("B", "A").unwrap_err();
    assert!(matches!(err, CatalogueError::CyclicParentage { .. }));
    assert_eq!(catalogue.get_object("B").unwrap().member_count(), 0);
    assert!(catalogue.parent_of("A").unwrap().is_none());
}

#[test]
fn test_three_object_cycle_rejected() {
    let mut catalogue = planets(&["A", "B", "C"]);
    catalogue.add_member("A", "B").unwrap();
    catalogue.add_member("B", "C").unwrap();

    let err = catalogue.add_member("C", "A").unwrap_err();
    assert!(matches!(err, CatalogueError::CyclicParentage { .. }));
    assert_eq!(catalogue.get_object("C").unwrap().member_count(), 0);
}

#[test]
fn test_second_binding_of_same_child() {
    let mut catalogue = planets(&["A", "B"]);
    catalogue.add_member("A", "B").unwrap();

    let err = catalogue.add_member("A", "B").unwrap_err();
    assert!(matches!(err, CatalogueError::AlreadyParented { .. }));
    assert_eq!(catalogue.get_object("A").unwrap().member_count(), 1);
}

#[test]
fn test_duplicate_add_keeps_count() {
    let mut catalogue = planets(&["A"]);
    let err = catalogue
        .add_object(plain("A", ObjectKind::Moon))
        .unwrap_err();
    assert!(matches!(err, CatalogueError::DuplicateName(_)));
    assert_eq!(catalogue.len(), 1);
    assert_eq!(catalogue.get_object("A").unwrap().kind(), ObjectKind::Planet);
}

#[test]
fn test_subselect_stars_keeps_insertion_order() {
    let mut catalogue = Catalogue::new("Mixed");
    catalogue.add_object(star("S", ObjectKind::Star)).unwrap();
    catalogue
        .add_object(star("M", ObjectKind::MainSequenceStar))
        .unwrap();
    catalogue.add_object(star("P", ObjectKind::Pulsar)).unwrap();
    catalogue.add_object(plain("X", ObjectKind::Planet)).unwrap();

    let names: Vec<_> = catalogue
        .subselect(ObjectKind::Star)
        .iter()
        .map(|o| o.name())
        .collect();
    assert_eq!(names, vec!["S", "M", "P"]);
}

#[rstest]
#[case(ObjectKind::Unassigned, 6)]
#[case(ObjectKind::Star, 2)]
#[case(ObjectKind::StellarRemnant, 1)]
#[case(ObjectKind::Supernova, 1)]
#[case(ObjectKind::Planet, 2)]
#[case(ObjectKind::GaseousPlanet, 1)]
#[case(ObjectKind::BlackHole, 0)]
fn test_subselect_counts(#[case] query: ObjectKind, #[case] expected: usize) {
    let mut catalogue = Catalogue::new("Mixed");
    catalogue.add_object(galaxy("G")).unwrap();
    catalogue
        .add_object(star("Sun", ObjectKind::MainSequenceStar))
        .unwrap();
    catalogue
        .add_object(star("Vela", ObjectKind::NeutronStar))
        .unwrap();
    catalogue
        .add_object(star("SN 1987A", ObjectKind::Supernova))
        .unwrap();
    catalogue
        .add_object(plain("Jupiter", ObjectKind::GaseousPlanet))
        .unwrap();
    catalogue
        .add_object(plain("Ceres", ObjectKind::DwarfPlanet))
        .unwrap();

    assert_eq!(catalogue.subselect(query).len(), expected);
}

#[test]
fn test_name_sort_ignores_case() {
    let mut catalogue = planets(&["Bravo", "alpha", "Alpha2"]);
    catalogue.sort(SortKey::Name).unwrap();
    let names: Vec<_> = catalogue.names().collect();
    assert_eq!(names, vec!["alpha", "Alpha2", "Bravo"]);
}

#[test]
fn test_sort_key_from_text() {
    let mut catalogue = planets(&["B", "A"]);
    let key: SortKey = "NAME".parse().unwrap();
    catalogue.sort(key).unwrap();
    assert_eq!(catalogue.get_object_at(0).unwrap().name(), "A");

    let key: SortKey = "stellar_type".parse().unwrap();
    assert!(matches!(
        catalogue.sort(key),
        Err(CatalogueError::UnsupportedSortKey(_))
    ));
}

#[test]
fn test_galaxy_planet_scenario() {
    let mut catalogue = Catalogue::new("Test");
    catalogue.add_object(galaxy("G1")).unwrap();
    catalogue
        .add_object(
            CelestialObject::plain(
                "P1",
                ObjectKind::Planet,
                PhysicalProperties::new(0.0, 0.0, 1e-5, 0.0012),
            )
            .unwrap(),
        )
        .unwrap();

    catalogue
        .add_member_with_orbit("G1", "P1", Orbit::new(1.0, 4.3, 0.43))
        .unwrap();

    let planets = catalogue.subselect(ObjectKind::Planet);
    assert_eq!(planets.len(), 1);
    assert_eq!(planets[0].name(), "P1");

    let g1 = catalogue.get_object("G1").unwrap();
    let members = g1.get_all_members();
    assert_eq!(members.len(), 1);
    let child = catalogue.member_object(&members[0]).unwrap();
    assert_eq!(child.name(), "P1");
    assert_relative_eq!(members[0].orbit_distance(), 1.0);
    assert_relative_eq!(members[0].orbit_tilt(), 4.3);
    assert_relative_eq!(members[0].orbit_eccentricity(), 0.43);
}

#[test]
fn test_default_orbit() {
    let mut catalogue = planets(&["A", "B"]);
    catalogue.add_member("A", "B").unwrap();
    let satellite = catalogue.get_object("A").unwrap().get_member(0).unwrap();
    assert_eq!(satellite.orbit(), Orbit::new(1.0, 0.0, 1.0));
    assert!(matches!(
        catalogue.get_object("A").unwrap().get_member(1),
        Err(CatalogueError::IndexOutOfRange { index: 1, len: 1 })
    ));
}

#[test]
fn test_removal_frees_children_for_reparenting() {
    let mut catalogue = planets(&["Root", "Mid", "Leaf", "Other"]);
    catalogue.add_member("Root", "Mid").unwrap();
    catalogue.add_member("Mid", "Leaf").unwrap();

    catalogue.remove_object("Mid").unwrap();

    assert_eq!(catalogue.len(), 3);
    assert_eq!(catalogue.get_object("Root").unwrap().member_count(), 0);
    assert!(catalogue.parent_of("Leaf").unwrap().is_none());
    assert!(matches!(
        catalogue.get_object("Mid"),
        Err(CatalogueError::NotFound(_))
    ));

    catalogue.add_member("Other", "Leaf").unwrap();
    assert_eq!(catalogue.root_of("Leaf").unwrap().name(), "Other");
}
