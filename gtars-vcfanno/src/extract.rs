//! Decoding of a candidate's raw INFO value into the string copied onto a query
//! allele.

use log::debug;

use crate::models::{FieldCount, FieldDescriptor, FieldValue, VariantRecord};

///
/// Derive the value to emit for `descriptor` from a candidate record.
///
/// - Scalars are emitted as-is.
/// - Lists are emitted whole (comma-joined) when query and candidate are both
///   biallelic, since there is only one allele the values can belong to.
/// - Otherwise `A` fields yield the element at `candidate_alt_index`, `R` fields the
///   element at `candidate_alt_index + 1` (slot 0 is the reference and is never
///   emitted), and every other count is emitted whole.
///
/// An index past the end of the list falls back to the field's default.
///
pub fn extract_value(
    query: &VariantRecord,
    candidate: &VariantRecord,
    descriptor: &FieldDescriptor,
    value: &FieldValue,
    candidate_alt_index: usize,
) -> String {
    let values = match value {
        FieldValue::Scalar(scalar) => return scalar.clone(),
        FieldValue::List(values) => values,
    };

    if query.is_biallelic() && candidate.is_biallelic() {
        return values.join(",");
    }

    let idx = match descriptor.count {
        FieldCount::PerAlt => candidate_alt_index,
        FieldCount::PerAllele => candidate_alt_index + 1,
        FieldCount::PerGenotype | FieldCount::Fixed(_) | FieldCount::Variable => {
            return values.join(",");
        }
    };

    match values.get(idx) {
        Some(value) => value.clone(),
        None => {
            debug!(
                "{} has {} values at {}:{}, no element {}; using default",
                descriptor.name,
                values.len(),
                candidate.contig(),
                candidate.start(),
                idx
            );
            descriptor.default.clone()
        }
    }
}
