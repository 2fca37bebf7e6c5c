use crate::evolution::FieldDiffEntry;
use crate::evolution::FieldStatus;
use crate::evolution::SchemaDiff;
use crate::schema::SchemaSnapshot;
use crate::schema::SchemaType;
use rayon::prelude::*;

/// Computes the full [`SchemaDiff`] between two snapshots.
///
/// * A `(type, field)` key only in `old` is `REMOVED`; only in `new` it is
///   `ADDED`.
/// * A key in both whose field is deprecated in `new` but not in `old` is
///   `DEPRECATED`, carrying the new deprecation reason.
/// * Types only in one snapshot, or whose kind differs between the two, are
///   reported at type level and their fields produce no entries.
///
/// Shared types are diffed in parallel; the result is sorted, so it does
/// not depend on scheduling.
pub fn diff_snapshots(old: &SchemaSnapshot, new: &SchemaSnapshot) -> SchemaDiff {
    let mut removed_types = vec![];
    let mut replaced_types = vec![];
    let mut shared_types = vec![];
    for (name, old_type) in old.types() {
        match new.get_type(name) {
            None => removed_types.push(name.to_string()),
            Some(new_type) if new_type.kind != old_type.kind => replaced_types.push(name.to_string()),
            Some(new_type) => shared_types.push((old_type, new_type)),
        }
    }
    let mut added_types: Vec<String> = new.types().keys()
        .filter(|name| !old.has_type(name))
        .cloned()
        .collect();

    let mut entries: Vec<FieldDiffEntry> = shared_types
        .par_iter()
        .flat_map_iter(|(old_type, new_type)| diff_type(old_type, new_type))
        .collect();
    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    added_types.sort();
    removed_types.sort();
    replaced_types.sort();

    let diff = SchemaDiff {
        old_version: old.version().to_string(),
        new_version: new.version().to_string(),
        added_types,
        removed_types,
        replaced_types,
        entries,
    };
    log::debug!(
        "Diffed schema {} against {}: {}.",
        diff.old_version,
        diff.new_version,
        diff.summary(),
    );
    diff
}

fn diff_type(old_type: &SchemaType, new_type: &SchemaType) -> Vec<FieldDiffEntry> {
    let mut entries = vec![];

    for (field_name, old_field) in old_type.fields() {
        match new_type.field(field_name) {
            None => entries.push(FieldDiffEntry::new(
                old_type.name.as_str(),
                field_name.as_str(),
                FieldStatus::Removed,
                old_field.deprecation_reason.clone(),
            )),
            Some(new_field) if new_field.deprecated && !old_field.deprecated => {
                entries.push(FieldDiffEntry::new(
                    old_type.name.as_str(),
                    field_name.as_str(),
                    FieldStatus::Deprecated,
                    new_field.deprecation_reason.clone(),
                ));
            },
            Some(_) => (),
        }
    }

    for field_name in new_type.fields().keys() {
        if old_type.field(field_name).is_none() {
            entries.push(FieldDiffEntry::new(
                new_type.name.as_str(),
                field_name.as_str(),
                FieldStatus::Added,
                None,
            ));
        }
    }

    entries
}
