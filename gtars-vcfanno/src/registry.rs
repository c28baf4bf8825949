//! The fixed set of output fields an annotator produces.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::header::InfoDeclaration;
use crate::models::FieldDescriptor;

///
/// Namespaced field descriptors, ordered by raw INFO id.
///
/// Built once from the source's INFO declarations and never modified afterwards.
///
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    source_name: String,
    fields: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
    by_raw_name: HashMap<String, usize>,
}

impl FieldRegistry {
    ///
    /// Build the registry for `source_name`.
    ///
    /// Declaration order is ignored: fields are sorted by raw id. When an id is
    /// declared more than once, the last declaration wins. `overrides` replaces the
    /// default of the named (namespaced) fields; names that are not declared are
    /// ignored.
    ///
    pub fn new(
        source_name: &str,
        declarations: &[InfoDeclaration],
        overrides: &HashMap<String, String>,
    ) -> Self {
        let mut sorted: BTreeMap<&str, &InfoDeclaration> = BTreeMap::new();
        for declaration in declarations {
            sorted.insert(declaration.id.as_str(), declaration);
        }

        let mut fields: Vec<FieldDescriptor> = sorted
            .into_values()
            .map(|d| FieldDescriptor::new(source_name, &d.id, d.ty, d.number, &d.description))
            .collect();

        let mut by_name = HashMap::with_capacity(fields.len());
        let mut by_raw_name = HashMap::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            by_name.insert(field.name.clone(), idx);
            by_raw_name.insert(field.raw_name.clone(), idx);
        }

        for (name, default) in overrides {
            match by_name.get(name) {
                Some(&idx) => fields[idx].default = default.clone(),
                None => debug!("Ignoring override for unknown field {}", name),
            }
        }

        if fields.is_empty() {
            warn!("{} declares no INFO fields; nothing will be annotated from it", source_name);
        }

        FieldRegistry {
            source_name: source_name.to_string(),
            fields,
            by_name,
            by_raw_name,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Namespaced field names in output order.
    pub fn supported_fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a descriptor by namespaced name.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.by_name.get(name).map(|&idx| &self.fields[idx])
    }

    /// Look up a descriptor by the raw INFO id used in the source records.
    pub fn descriptor_for_raw(&self, raw_name: &str) -> Option<&FieldDescriptor> {
        self.by_raw_name.get(raw_name).map(|&idx| &self.fields[idx])
    }

    /// Namespaced name to default value, for every field.
    pub fn defaults(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
