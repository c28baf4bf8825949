//! # Allele-aware variant annotation from a VCF source
//!
//! This crate copies INFO values from the records of an auxiliary VCF (gnomAD,
//! dbSNP, ClinVar, ...) onto the alternate alleles of a query variant. It is part
//! of the [gtars](https://github.com/databio/gtars) project.
//!
//! The caller supplies the source records overlapping the query; the annotator
//! decides which of their alleles are the query's alleles, decodes each INFO value
//! according to its declared `Number=`, and fills unmatched alleles with defaults.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use gtars_vcfanno::{ContextWindow, VariantRecord, VcfAnnotator, VcfHeader};
//!
//! let header_text = [
//!     "##fileformat=VCFv4.2",
//!     "##INFO=<ID=AF,Number=A,Type=Float,Description=\"Allele frequency\">",
//!     "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
//! ]
//! .join("\n");
//! let header = VcfHeader::parse(&header_text).unwrap();
//! let mut annotator = VcfAnnotator::from_header("gnomAD", "4.1", &header, &HashMap::new());
//!
//! let query = VariantRecord::new("chr1", 1000, 1000, "A", vec!["C".into(), "G".into()]);
//! let candidate = VariantRecord::new("chr1", 1000, 1000, "A", vec!["C".into()])
//!     .with_field("AF", "0.1");
//!
//! let context = ContextWindow::around(&query);
//! let annotations = annotator.annotate(&query, &context, &[candidate], None);
//! assert_eq!(annotations[0].get("gnomAD_AF"), Some("0.1"));
//! assert_eq!(annotations[1].get("gnomAD_AF"), Some(""));
//!
//! annotator.close();
//! ```
//!
//! ## Caching
//!
//! Results are memoized per (query, context, candidates) in a bounded cache. The
//! default policy evicts in insertion order ([`EvictionPolicy::Fifo`]); reads do not
//! extend an entry's life. [`EvictionPolicy::Lru`] is available as an opt-in.

pub mod annotator;
pub mod cache;
pub mod config;
pub mod consts;
pub mod errors;
pub mod extract;
pub mod header;
pub mod matching;
pub mod models;
pub mod normalize;
pub mod registry;

// re-exports
pub use annotator::{CacheKey, VcfAnnotator, VcfAnnotatorBuilder};
pub use cache::{BoundedCache, CacheStats, EvictionPolicy};
pub use config::AnnotatorConfig;
pub use errors::{Result, VcfAnnoError};
pub use extract::extract_value;
pub use header::{InfoDeclaration, VcfHeader};
pub use matching::match_alleles;
pub use models::*;
pub use normalize::{BiallelicPair, decompose, trim_pair};
pub use registry::FieldRegistry;
