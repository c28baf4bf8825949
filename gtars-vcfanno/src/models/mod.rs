pub mod annotation;
pub mod field;
pub mod variant;

// re-exports
pub use self::annotation::AnnotationRecord;
pub use self::field::{FieldCount, FieldDescriptor, FieldType};
pub use self::variant::{Allele, ContextWindow, FieldValue, VariantRecord};
