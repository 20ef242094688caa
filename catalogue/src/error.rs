//! Error types for catalogue operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::ObjectKind;

/// Errors that can occur while building, querying or serializing a catalogue.
///
/// Structural failures (parenting, lookup, sort key selection) leave the
/// catalogue untouched. Import collects these per line instead of aborting,
/// see [`ImportReport`](crate::codec::ImportReport).
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// An object with this name is already in the catalogue.
    #[error("an object named '{0}' already exists in the catalogue")]
    DuplicateName(String),

    /// No object with this name is in the catalogue.
    #[error("object '{0}' not found")]
    NotFound(String),

    /// Positional lookup outside `[0, len)`.
    #[error("index {index} out of range for size {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The child already belongs to another object.
    #[error("object '{child}' is already parented to {parent_kind} '{parent}'")]
    AlreadyParented {
        child: String,
        parent: String,
        parent_kind: ObjectKind,
    },

    /// An object cannot be its own parent.
    #[error("cannot parent '{0}' to itself")]
    SelfParentParadox(String),

    /// Attaching would close a loop in the parent chain.
    #[error("cannot parent '{child}' to '{parent}': a closed parent/child loop would be created")]
    CyclicParentage { parent: String, child: String },

    /// The sort parameter cannot order a whole catalogue.
    #[error("cannot sort a full catalogue by {0}")]
    UnsupportedSortKey(String),

    /// A record line could not be decoded.
    #[error("malformed record: {0}")]
    MalformedRecord(String),

    /// A relationship line names an object that does not exist.
    #[error("relationship endpoint '{0}' does not exist")]
    UnresolvedRelationshipEndpoint(String),

    /// The kind cannot be constructed, or does not match the supplied payload.
    #[error("invalid kind: {0}")]
    InvalidKind(String),

    /// A name or value cannot be stored in a catalogue record.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// The object still carries parent or satellite links, e.g. from another catalogue.
    #[error("object '{0}' is still linked; add an unlinked copy instead")]
    LinkedObject(String),

    /// An export destination already exists and the policy forbids replacing it.
    #[error("destination '{}' already exists", .0.display())]
    DestinationExists(PathBuf),

    /// Low-level I/O error while reading or writing catalogue files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be encoded or decoded.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for catalogue operations.
pub type CatalogueResult<T> = Result<T, CatalogueError>;
