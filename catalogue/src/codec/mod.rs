//! Text persistence for catalogues.
//!
//! - [`record`]: single-line encode/decode of objects and relationships
//! - [`batch`]: resilient import from readers, export to writers
//! - [`files`]: the on-disk file pair and export conflict handling

pub mod batch;
pub mod files;
pub mod record;

pub use batch::{ImportIssue, ImportReport, RecordSource};
pub use files::{export_to_dir, import_from_path, CatalogueFiles, ConflictPolicy};
pub use record::{
    object_record, parse_object_record, parse_relationship_record, relationship_record,
    RelationshipRecord, DELIMITER,
};
