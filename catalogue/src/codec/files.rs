//! Catalogue files on disk.
//!
//! A catalogue named `N` lives in two files side by side: `N.dat` holding
//! object records and `N_relationships.dat` holding relationship records.
//! The extension and suffix come from [`CatalogueConfig`].

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::batch::ImportReport;
use crate::catalogue::Catalogue;
use crate::config::CatalogueConfig;
use crate::error::{CatalogueError, CatalogueResult};

/// What export does when a destination file already exists.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ConflictPolicy {
    /// Refuse and write nothing.
    #[default]
    Fail,
    /// Replace existing files.
    Overwrite,
    /// Write under `<name>_<YYYYmmdd_HHMMSS>` instead.
    Timestamp,
}

/// Paths of the two files backing one catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueFiles {
    pub objects: PathBuf,
    pub relationships: PathBuf,
}

impl CatalogueFiles {
    /// Files for catalogue `name` inside `dir`.
    pub fn in_dir(dir: &Path, name: &str, config: &CatalogueConfig) -> Self {
        Self {
            objects: dir.join(format!("{name}.{}", config.object_extension)),
            relationships: dir.join(format!(
                "{name}{}.{}",
                config.relationship_suffix, config.object_extension
            )),
        }
    }

    /// Files paired with an object file path.
    ///
    /// The catalogue name is the file stem.
    pub fn for_object_file(path: &Path, config: &CatalogueConfig) -> Self {
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let name = catalogue_name(path);
        Self {
            objects: path.to_path_buf(),
            relationships: dir.join(format!(
                "{name}{}.{}",
                config.relationship_suffix, config.object_extension
            )),
        }
    }

    fn any_exists(&self) -> bool {
        self.objects.exists() || self.relationships.exists()
    }
}

/// Open for writing without discarding existing contents.
fn open_destination(path: &Path) -> CatalogueResult<File> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?)
}

fn catalogue_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Import the catalogue stored at `path` and its sibling relationship file.
///
/// A missing relationship file is not an error; the catalogue is loaded
/// without bindings.
pub fn import_from_path(
    path: &Path,
    config: &CatalogueConfig,
) -> CatalogueResult<(Catalogue, ImportReport)> {
    let files = CatalogueFiles::for_object_file(path, config);
    let mut objects = BufReader::new(File::open(&files.objects)?);

    if files.relationships.exists() {
        let mut relationships = BufReader::new(File::open(&files.relationships)?);
        Catalogue::import(catalogue_name(path), &mut objects, Some(&mut relationships))
    } else {
        warn!(
            "No relationship file at {}, importing objects only",
            files.relationships.display()
        );
        Catalogue::import(catalogue_name(path), &mut objects, None)
    }
}

/// Export `catalogue` into `dir`, resolving name clashes with the configured policy.
///
/// Returns the files actually written.
///
/// # Errors
/// [`CatalogueError::DestinationExists`] under [`ConflictPolicy::Fail`] when
/// either file exists; nothing is written in that case.
pub fn export_to_dir(
    catalogue: &Catalogue,
    dir: &Path,
    config: &CatalogueConfig,
) -> CatalogueResult<CatalogueFiles> {
    let mut files = CatalogueFiles::in_dir(dir, catalogue.name(), config);

    if files.any_exists() {
        match config.on_conflict {
            ConflictPolicy::Fail => {
                let existing = if files.objects.exists() {
                    files.objects
                } else {
                    files.relationships
                };
                return Err(CatalogueError::DestinationExists(existing));
            }
            ConflictPolicy::Overwrite => {
                warn!("Overwriting catalogue files in {}", dir.display());
            }
            ConflictPolicy::Timestamp => {
                let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
                let name = format!("{}_{stamp}", catalogue.name());
                files = CatalogueFiles::in_dir(dir, &name, config);
                if files.any_exists() {
                    return Err(CatalogueError::DestinationExists(files.objects));
                }
            }
        }
    }

    std::fs::create_dir_all(dir)?;
    let objects_file = open_destination(&files.objects)?;
    let relationships_file = open_destination(&files.relationships)?;
    // Truncate only once both destinations are open, so a failed open
    // leaves any previous pair intact.
    objects_file.set_len(0)?;
    relationships_file.set_len(0)?;

    let mut objects = BufWriter::new(objects_file);
    let mut relationships = BufWriter::new(relationships_file);
    catalogue.export(&mut objects, &mut relationships)?;
    objects.flush()?;
    relationships.flush()?;

    info!(
        "Wrote {} and {}",
        files.objects.display(),
        files.relationships.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ObjectKind;
    use crate::object::{CelestialObject, PhysicalProperties};
    use tempfile::tempdir;

    fn small_catalogue() -> Catalogue {
        let mut catalogue = Catalogue::new("Sol");
        for (name, kind) in [("Jupiter", ObjectKind::GaseousPlanet), ("Io", ObjectKind::Moon)] {
            catalogue
                .add_object(
                    CelestialObject::plain(name, kind, PhysicalProperties::new(0.0, 0.0, 1.0, 0.0))
                        .unwrap(),
                )
                .unwrap();
        }
        catalogue.add_member("Jupiter", "Io").unwrap();
        catalogue
    }

    #[test]
    fn test_file_names() {
        let config = CatalogueConfig::default();
        let files = CatalogueFiles::in_dir(Path::new("/data"), "Sol", &config);
        assert_eq!(files.objects, PathBuf::from("/data/Sol.dat"));
        assert_eq!(files.relationships, PathBuf::from("/data/Sol_relationships.dat"));

        let paired = CatalogueFiles::for_object_file(Path::new("/data/Sol.dat"), &config);
        assert_eq!(paired, files);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Overwrite".parse::<ConflictPolicy>(), Ok(ConflictPolicy::Overwrite));
        assert_eq!(ConflictPolicy::Timestamp.to_string(), "timestamp");
        assert!("skip".parse::<ConflictPolicy>().is_err());
    }

    #[test]
    fn test_export_then_import() {
        let dir = tempdir().unwrap();
        let config = CatalogueConfig::default();
        let files = export_to_dir(&small_catalogue(), dir.path(), &config).unwrap();

        let (loaded, report) = import_from_path(&files.objects, &config).unwrap();
        assert!(report.is_clean());
        assert_eq!(loaded.name(), "Sol");
        assert_eq!(loaded.parent_of("Io").unwrap().unwrap().name(), "Jupiter");
    }

    #[test]
    fn test_missing_relationship_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Lone.dat");
        std::fs::write(&path, "Comet:Halley:0:0:0.0000000000001:0\n").unwrap();

        let (loaded, report) = import_from_path(&path, &CatalogueConfig::default()).unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_overwrite_keeps_old_pair_when_a_destination_cannot_open() {
        let dir = tempdir().unwrap();
        let config = CatalogueConfig {
            on_conflict: ConflictPolicy::Overwrite,
            ..CatalogueConfig::default()
        };
        let files = CatalogueFiles::in_dir(dir.path(), "Sol", &config);
        std::fs::write(&files.objects, "previous").unwrap();
        std::fs::create_dir(&files.relationships).unwrap();

        let err = export_to_dir(&small_catalogue(), dir.path(), &config).unwrap_err();
        assert!(matches!(err, CatalogueError::Io(_)));
        assert_eq!(std::fs::read_to_string(&files.objects).unwrap(), "previous");
    }

    #[test]
    fn test_overwrite_replaces_longer_contents() {
        let dir = tempdir().unwrap();
        let config = CatalogueConfig {
            on_conflict: ConflictPolicy::Overwrite,
            ..CatalogueConfig::default()
        };
        let files = CatalogueFiles::in_dir(dir.path(), "Sol", &config);
        std::fs::write(&files.objects, "x".repeat(4096)).unwrap();
        std::fs::write(&files.relationships, "y".repeat(4096)).unwrap();

        export_to_dir(&small_catalogue(), dir.path(), &config).unwrap();
        let (loaded, report) = import_from_path(&files.objects, &config).unwrap();
        assert!(report.is_clean(), "{:?}", report.issues);
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_conflict_policies() {
        let dir = tempdir().unwrap();
        let catalogue = small_catalogue();
        let mut config = CatalogueConfig::default();

        let first = export_to_dir(&catalogue, dir.path(), &config).unwrap();
        std::fs::write(&first.objects, "sentinel").unwrap();

        let err = export_to_dir(&catalogue, dir.path(), &config).unwrap_err();
        assert!(matches!(err, CatalogueError::DestinationExists(_)));
        assert_eq!(std::fs::read_to_string(&first.objects).unwrap(), "sentinel");

        config.on_conflict = ConflictPolicy::Timestamp;
        let stamped = export_to_dir(&catalogue, dir.path(), &config).unwrap();
        assert_ne!(stamped.objects, first.objects);
        assert!(stamped
            .objects
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Sol_"));

        config.on_conflict = ConflictPolicy::Overwrite;
        let replaced = export_to_dir(&catalogue, dir.path(), &config).unwrap();
        assert_eq!(replaced, first);
        assert!(std::fs::read_to_string(&first.objects)
            .unwrap()
            .starts_with("GaseousPlanet:Jupiter"));
    }
}
