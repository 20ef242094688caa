//! Bulk import and export of catalogues over readers and writers.
//!
//! Import is resilient: a bad line is logged, recorded in the
//! [`ImportReport`], and skipped. Only an unreadable stream aborts the batch.

use std::io::{BufRead, ErrorKind, Write};

use log::{info, warn};

use super::record::{object_record, parse_object_record, parse_relationship_record, relationship_record};
use crate::catalogue::Catalogue;
use crate::error::{CatalogueError, CatalogueResult};

/// Which of the two record streams a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RecordSource {
    Objects,
    Relationships,
}

/// A skipped import line and why it was skipped.
#[derive(Debug)]
pub struct ImportIssue {
    pub source: RecordSource,
    /// 1-based line number within its stream
    pub line: usize,
    pub error: CatalogueError,
}

/// Outcome of a batch import.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub objects_loaded: usize,
    pub relationships_loaded: usize,
    pub issues: Vec<ImportIssue>,
}

impl ImportReport {
    /// True if every line was applied
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn skip(&mut self, source: RecordSource, line: usize, error: CatalogueError) {
        warn!("{source} line {line} skipped: {error}");
        self.issues.push(ImportIssue {
            source,
            line,
            error,
        });
    }
}

/// Visit every non-blank line of `reader` with its 1-based number.
///
/// Lines that are not valid UTF-8 are reported and skipped; any other read
/// failure aborts.
fn for_each_line<F>(
    reader: &mut dyn BufRead,
    source: RecordSource,
    report: &mut ImportReport,
    mut visit: F,
) -> CatalogueResult<()>
where
    F: FnMut(&str, usize, &mut ImportReport),
{
    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => visit(&line, number, report),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                report.skip(source, number, CatalogueError::MalformedRecord(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Append every valid object record in `reader` to `catalogue`.
pub fn import_objects(
    catalogue: &mut Catalogue,
    reader: &mut dyn BufRead,
    report: &mut ImportReport,
) -> CatalogueResult<()> {
    for_each_line(reader, RecordSource::Objects, report, |line, number, report| {
        let added = parse_object_record(line).and_then(|object| catalogue.add_object(object));
        match added {
            Ok(_) => report.objects_loaded += 1,
            Err(e) => report.skip(RecordSource::Objects, number, e),
        }
    })
}

/// Apply every valid relationship record in `reader` to objects already in
/// `catalogue`.
pub fn import_relationships(
    catalogue: &mut Catalogue,
    reader: &mut dyn BufRead,
    report: &mut ImportReport,
) -> CatalogueResult<()> {
    for_each_line(
        reader,
        RecordSource::Relationships,
        report,
        |line, number, report| {
            let applied = parse_relationship_record(line).and_then(|record| {
                for endpoint in [&record.parent, &record.child] {
                    if !catalogue.contains(endpoint) {
                        return Err(CatalogueError::UnresolvedRelationshipEndpoint(
                            endpoint.clone(),
                        ));
                    }
                }
                catalogue.add_member_with_orbit(&record.parent, &record.child, record.orbit)
            });
            match applied {
                Ok(()) => report.relationships_loaded += 1,
                Err(e) => report.skip(RecordSource::Relationships, number, e),
            }
        },
    )
}

impl Catalogue {
    /// Build a catalogue from an object stream and an optional relationship stream.
    ///
    /// Relationships are applied after every object is loaded, so their order
    /// relative to the object records does not matter.
    pub fn import(
        name: impl Into<String>,
        objects: &mut dyn BufRead,
        relationships: Option<&mut dyn BufRead>,
    ) -> CatalogueResult<(Catalogue, ImportReport)> {
        let mut catalogue = Catalogue::new(name);
        let mut report = ImportReport::default();

        import_objects(&mut catalogue, objects, &mut report)?;
        if let Some(reader) = relationships {
            import_relationships(&mut catalogue, reader, &mut report)?;
        }

        info!(
            "Imported catalogue '{}': {} objects, {} relationships, {} lines skipped",
            catalogue.name(),
            report.objects_loaded,
            report.relationships_loaded,
            report.issues.len()
        );
        Ok((catalogue, report))
    }

    /// Write one object record per object, in current order.
    ///
    /// Returns the number of records written.
    pub fn export_objects(&self, sink: &mut dyn Write) -> CatalogueResult<usize> {
        let mut written = 0;
        for object in self.objects() {
            writeln!(sink, "{}", object_record(object))?;
            written += 1;
        }
        Ok(written)
    }

    /// Write one relationship record per satellite, grouped by parent in current order.
    ///
    /// Returns the number of records written.
    pub fn export_relationships(&self, sink: &mut dyn Write) -> CatalogueResult<usize> {
        let mut written = 0;
        for object in self.objects() {
            for satellite in object.get_all_members() {
                let Some(child) = self.member_object(satellite) else {
                    continue;
                };
                writeln!(
                    sink,
                    "{}",
                    relationship_record(object.name(), child.name(), &satellite.orbit())
                )?;
                written += 1;
            }
        }
        Ok(written)
    }

    /// Write the whole catalogue to an object sink and a relationship sink.
    pub fn export(
        &self,
        objects: &mut dyn Write,
        relationships: &mut dyn Write,
    ) -> CatalogueResult<()> {
        let object_count = self.export_objects(objects)?;
        let relationship_count = self.export_relationships(relationships)?;
        objects.flush()?;
        relationships.flush()?;
        info!(
            "Exported catalogue '{}': {object_count} objects, {relationship_count} relationships",
            self.name()
        );
        Ok(())
    }

    /// Object record of `name` followed by one relationship line per satellite.
    pub fn export_record(&self, name: &str) -> CatalogueResult<String> {
        let object = self.get_object(name)?;
        let mut text = object_record(object);
        for (child, orbit) in self.members_of(name)? {
            text.push('\n');
            text.push_str(&relationship_record(name, &child, &orbit));
        }
        Ok(text)
    }
}
