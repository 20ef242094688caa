//! Celestial object catalogue.
//!
//! A [`Catalogue`] owns a named, ordered set of [`CelestialObject`]s and
//! arranges them in a single-parent tree of [`Satellite`] bindings. Parenting
//! is checked so the tree never gains a cycle, a self-parented object or a
//! second parent. Objects can be selected by kind using the subtype rules of
//! [`ObjectKind`], sorted by any of the [`SortKey`]s that apply to a whole
//! catalogue, and persisted as `:`-delimited text records (see [`codec`]).
//!
//! # Modules
//! - [`kind`] / [`classification`]: closed token tables
//! - [`object`]: objects, payloads, orbits and satellite bindings
//! - [`catalogue`]: the owning arena and every cross-object operation
//! - [`sort`]: sort keys and comparators
//! - [`codec`]: record format, batch import/export, catalogue files
//! - [`report`]: human-readable property dumps
//! - [`config`]: JSON-persisted file settings
//!
//! # Example
//! ```
//! use catalogue::{Catalogue, CelestialObject, GalaxyDetails, HubbleType, ObjectKind, Orbit,
//!     PhysicalProperties};
//!
//! let mut cat = Catalogue::new("Test");
//! cat.add_object(CelestialObject::galaxy(
//!     "G1",
//!     PhysicalProperties::new(0.0, 0.0, 1e12, 0.001),
//!     GalaxyDetails { stellar_mass_fraction: 0.05, hubble_type: HubbleType::Sc },
//! )?)?;
//! cat.add_object(CelestialObject::plain(
//!     "P1",
//!     ObjectKind::Planet,
//!     PhysicalProperties::new(0.0, 0.0, 1e-5, 0.0012),
//! )?)?;
//! cat.add_member_with_orbit("G1", "P1", Orbit::new(1.0, 4.3, 0.43))?;
//!
//! assert_eq!(cat.subselect(ObjectKind::Planet).len(), 1);
//! assert_eq!(cat.get_object("G1")?.member_count(), 1);
//! # Ok::<(), catalogue::CatalogueError>(())
//! ```

pub mod catalogue;
pub mod classification;
pub mod codec;
pub mod config;
pub mod error;
pub mod kind;
pub mod object;
pub mod report;
pub mod sort;

pub use catalogue::Catalogue;
pub use classification::{HubbleType, LuminosityClass, SpectralType};
pub use codec::{ConflictPolicy, ImportReport};
pub use config::CatalogueConfig;
pub use error::{CatalogueError, CatalogueResult};
pub use kind::{ObjectKind, PayloadShape};
pub use object::{
    CelestialObject, GalaxyDetails, KindDetails, ObjectId, Orbit, PhysicalProperties, Satellite,
    StellarDetails,
};
pub use sort::SortKey;
