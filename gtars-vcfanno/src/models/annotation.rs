use std::collections::BTreeMap;

use crate::models::variant::Allele;

///
/// Annotation produced for one query alternate allele.
///
/// `fields` is keyed by namespaced field name. Every name shares the source
/// prefix, so the map's ordering is the lexicographic order of the raw ids.
///
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnnotationRecord {
    pub allele: Allele,
    pub alt_index: usize,
    pub source: String,
    pub fields: BTreeMap<String, String>,
}

impl AnnotationRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}
